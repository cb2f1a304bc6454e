use spacefight_common::{EntityId, NodeId};
use spacefight_scene::{NodeTemplate, SceneGraph};
use std::fmt;

use crate::Engine;

/// Per-frame behavior of an entity, chosen when the entity is spawned.
///
/// `update` runs once per frame with the entity's own id and mutable access to
/// the rest of the engine. While it runs, the behavior is detached from its
/// entity, so the engine (including this entity's node) is freely usable.
pub trait Behavior {
    fn update(&mut self, me: EntityId, engine: &mut Engine);
}

impl<F> Behavior for F
where
    F: FnMut(EntityId, &mut Engine),
{
    fn update(&mut self, me: EntityId, engine: &mut Engine) {
        self(me, engine)
    }
}

/// Behavior that does nothing. Used when none is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Behavior for Idle {
    fn update(&mut self, _me: EntityId, _engine: &mut Engine) {}
}

/// Everything needed to spawn an entity.
pub struct EntityDesc {
    pub(crate) node: Option<NodeTemplate>,
    pub(crate) tag: Option<&'static str>,
    pub(crate) behavior: Box<dyn Behavior>,
}

impl EntityDesc {
    /// Entity rendered by a fresh instance of `node`.
    pub fn new(node: NodeTemplate) -> Self {
        Self {
            node: Some(node),
            tag: None,
            behavior: Box::new(Idle),
        }
    }

    /// Entity with an empty placeholder node (controllers, managers).
    pub fn empty() -> Self {
        Self {
            node: None,
            tag: None,
            behavior: Box::new(Idle),
        }
    }

    /// Label other behaviors can query, e.g. to find collision targets.
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }
}

/// A game object: a primary scene node, ordered sub-nodes, a removal flag and
/// a behavior.
pub struct Entity {
    id: EntityId,
    node: NodeId,
    sub_nodes: Vec<NodeId>,
    tag: Option<&'static str>,
    /// Set to have the entity removed at the end of the current frame.
    pub pending_removal: bool,
    behavior: Option<Box<dyn Behavior>>,
}

impl Entity {
    pub(crate) fn new(
        id: EntityId,
        node: NodeId,
        tag: Option<&'static str>,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            id,
            node,
            sub_nodes: Vec::new(),
            tag,
            pending_removal: false,
            behavior: Some(behavior),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's primary node; its transform is the entity's position and rotation.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn sub_nodes(&self) -> &[NodeId] {
        &self.sub_nodes
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag == Some(tag)
    }

    pub(crate) fn push_sub_node(&mut self, node: NodeId) {
        self.sub_nodes.push(node);
    }

    /// Forget a sub-node by identity. Returns false when it is not one of ours.
    pub(crate) fn forget_sub_node(&mut self, node: NodeId) -> bool {
        match self.sub_nodes.iter().position(|n| *n == node) {
            Some(index) => {
                self.sub_nodes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Detach and free every sub-node, then the primary node.
    pub(crate) fn dispose(self, scene: &mut SceneGraph) {
        for node in self.sub_nodes.iter().chain(std::iter::once(&self.node)) {
            if let Err(err) = scene.remove(*node) {
                tracing::warn!(entity = %self.id, %err, "node already gone while disposing");
            }
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("node", &self.node)
            .field("sub_nodes", &self.sub_nodes)
            .field("tag", &self.tag)
            .field("pending_removal", &self.pending_removal)
            .finish_non_exhaustive()
    }
}

/// Live entities in spawn order.
///
/// Ids increase with spawn order and removal never reorders, so the list is
/// always sorted by id and lookups are a binary search. Only the end-of-frame
/// sweep removes entries.
#[derive(Debug, Default)]
pub struct EntityList {
    entities: Vec<Entity>,
    next_id: u64,
}

impl EntityList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(|i| &mut self.entities[i])
    }

    /// Position of an entity in update order.
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// Entities carrying `tag`, in list order.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.has_tag(tag))
    }

    pub fn pending_removal(&self) -> usize {
        self.entities.iter().filter(|e| e.pending_removal).count()
    }

    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a freshly spawned entity. Returns its index.
    pub(crate) fn push(&mut self, entity: Entity) -> usize {
        debug_assert!(self.entities.last().is_none_or(|last| last.id < entity.id));
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Detach the behavior at `index` so it can run with `&mut Engine`.
    pub(crate) fn take_behavior(&mut self, index: usize) -> Option<(EntityId, Box<dyn Behavior>)> {
        let entity = self.entities.get_mut(index)?;
        let behavior = entity.behavior.take()?;
        Some((entity.id, behavior))
    }

    pub(crate) fn restore_behavior(&mut self, index: usize, behavior: Box<dyn Behavior>) {
        if let Some(entity) = self.entities.get_mut(index) {
            entity.behavior = Some(behavior);
        }
    }

    /// Remove every flagged entity, walking from the back so earlier indices
    /// stay valid, and dispose of its nodes. Returns how many were removed.
    pub(crate) fn sweep(&mut self, scene: &mut SceneGraph) -> usize {
        let mut removed = 0;
        for index in (0..self.entities.len()).rev() {
            if self.entities[index].pending_removal {
                let entity = self.entities.remove(index);
                let id = entity.id;
                entity.dispose(scene);
                removed += 1;
                tracing::debug!(entity = %id, "deleted entity at index {index}");
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(scene: &mut SceneGraph, count: usize) -> EntityList {
        let mut list = EntityList::new();
        for _ in 0..count {
            let node = scene.instantiate(&NodeTemplate::empty());
            scene.add(node).unwrap();
            let id = list.allocate_id();
            list.push(Entity::new(id, node, None, Box::new(Idle)));
        }
        list
    }

    #[test]
    fn ids_increase_and_lookup_by_id() {
        let mut scene = SceneGraph::new();
        let list = list_with(&mut scene, 5);
        let ids = list.ids();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(list.index_of(ids[3]), Some(3));
        assert!(list.get(EntityId(99)).is_none());
    }

    #[test]
    fn sweep_removes_flagged_and_preserves_order() {
        let mut scene = SceneGraph::new();
        let mut list = list_with(&mut scene, 6);
        let ids = list.ids();
        let doomed = [ids[0], ids[2], ids[5]];
        let doomed_nodes: Vec<NodeId> = doomed
            .iter()
            .map(|id| list.get(*id).unwrap().node())
            .collect();
        for id in doomed {
            list.get_mut(id).unwrap().pending_removal = true;
        }

        assert_eq!(list.pending_removal(), 3);
        assert_eq!(list.sweep(&mut scene), 3);
        assert_eq!(list.ids(), vec![ids[1], ids[3], ids[4]]);
        for node in doomed_nodes {
            assert!(!scene.contains(node));
        }
        // lookups still work after compaction
        assert_eq!(list.index_of(ids[4]), Some(2));
    }

    #[test]
    fn dispose_frees_sub_nodes() {
        let mut scene = SceneGraph::new();
        let mut list = list_with(&mut scene, 1);
        let id = list.ids()[0];
        let primary = list.get(id).unwrap().node();
        let sub = scene.instantiate(&NodeTemplate::empty());
        scene.attach(primary, sub).unwrap();
        list.get_mut(id).unwrap().push_sub_node(sub);

        list.get_mut(id).unwrap().pending_removal = true;
        list.sweep(&mut scene);
        assert!(!scene.contains(sub));
        assert!(!scene.contains(primary));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn forget_sub_node_by_identity() {
        let mut scene = SceneGraph::new();
        let mut list = list_with(&mut scene, 1);
        let entity = list.get_mut(EntityId(0)).unwrap();
        let a = NodeId::new();
        let b = NodeId::new();
        entity.push_sub_node(a);
        entity.push_sub_node(b);
        assert!(entity.forget_sub_node(a));
        assert!(!entity.forget_sub_node(a));
        assert_eq!(entity.sub_nodes(), &[b]);
    }

    #[test]
    fn tagged_filters_in_order() {
        let mut scene = SceneGraph::new();
        let mut list = EntityList::new();
        for tag in [Some("asteroid"), None, Some("asteroid"), Some("laser")] {
            let node = scene.instantiate(&NodeTemplate::empty());
            let id = list.allocate_id();
            list.push(Entity::new(id, node, tag, Box::new(Idle)));
        }
        let hits: Vec<EntityId> = list.tagged("asteroid").map(|e| e.id()).collect();
        assert_eq!(hits, vec![EntityId(0), EntityId(2)]);
    }
}
