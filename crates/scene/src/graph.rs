use glam::Mat4;
use spacefight_common::{NodeId, Transform};
use std::collections::BTreeMap;

use crate::node::{Node, NodeKind, NodeTemplate};

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("the scene root cannot be detached or removed")]
    RootIsFixed,
}

/// Scene graph: node storage plus parent/child links.
///
/// Nodes live in storage from `instantiate` until `remove`. Attaching and
/// detaching only changes links, so a detached subtree can be re-attached.
/// Uses BTreeMap so lookups and iteration are deterministic.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a scene containing only the root group.
    pub fn new() -> Self {
        let root = NodeId::new();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                id: root,
                name: "scene".into(),
                kind: NodeKind::Group,
                transform: Transform::default(),
                render_order: 0,
                parent: None,
                children: Vec::new(),
            },
        );
        Self { root, nodes }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of stored nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Stamp out a fresh, detached copy of `template`. Returns the subtree root.
    pub fn instantiate(&mut self, template: &NodeTemplate) -> NodeId {
        let id = NodeId::new();
        let children = template
            .children
            .iter()
            .map(|child| {
                let child_id = self.instantiate(child);
                if let Some(node) = self.nodes.get_mut(&child_id) {
                    node.parent = Some(id);
                }
                child_id
            })
            .collect();
        self.nodes.insert(
            id,
            Node {
                id,
                name: template.name.clone(),
                kind: template.kind.clone(),
                transform: template.transform,
                render_order: template.render_order,
                parent: None,
                children,
            },
        );
        tracing::trace!(node = %id.short(), name = %template.name, "instantiated node");
        id
    }

    /// Attach a node directly under the scene root.
    pub fn add(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.attach(self.root, id)
    }

    /// Make `child` the last child of `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if child == self.root {
            return Err(SceneError::RootIsFixed);
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlink a node from its parent. Returns whether it had one.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|n| n.parent.take()) else {
            return false;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|c| *c != id);
        }
        true
    }

    /// Detach a node and drop it and all its descendants from storage.
    /// Returns the number of nodes freed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::RootIsFixed);
        }
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        self.detach(id);
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children);
                freed += 1;
            }
        }
        Ok(freed)
    }

    /// Whether the node is stored (attached or not).
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Whether the node is reachable from the root, i.e. would be rendered.
    pub fn is_in_scene(&self, id: NodeId) -> bool {
        self.is_ancestor_or_self(self.root, id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(&id).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(&id).map(|n| &mut n.transform)
    }

    /// Local-to-world matrix composed up the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.nodes.get(&id)?;
        let mut matrix = node.transform.matrix();
        while let Some(parent) = node.parent.and_then(|p| self.nodes.get(&p)) {
            matrix = parent.transform.matrix() * matrix;
            node = parent;
        }
        Some(matrix)
    }

    /// Depth-first walk from the root in child order, yielding `(depth, node)`.
    pub fn traverse(&self) -> Vec<(usize, &Node)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(0usize, self.root)];
        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, *child));
            }
        }
        out
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.nodes.get(&id).and_then(|n| n.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn ship_template() -> NodeTemplate {
        NodeTemplate::group("ship")
            .with_child(NodeTemplate::empty())
            .with_child(NodeTemplate::empty())
    }

    #[test]
    fn scene_starts_with_root_only() {
        let scene = SceneGraph::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.is_empty());
        assert!(scene.is_in_scene(scene.root()));
    }

    #[test]
    fn instantiate_is_detached_until_added() {
        let mut scene = SceneGraph::new();
        let id = scene.instantiate(&ship_template());
        assert_eq!(scene.len(), 4);
        assert!(scene.contains(id));
        assert!(!scene.is_in_scene(id));

        scene.add(id).unwrap();
        assert!(scene.is_in_scene(id));
        for child in scene.get(id).unwrap().children() {
            assert!(scene.is_in_scene(*child));
        }
    }

    #[test]
    fn instances_do_not_share_state() {
        let mut scene = SceneGraph::new();
        let template = ship_template();
        let a = scene.instantiate(&template);
        let b = scene.instantiate(&template);
        assert_ne!(a, b);

        scene.transform_mut(a).unwrap().position = Vec3::X;
        assert_eq!(scene.transform(b).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn detach_keeps_storage() {
        let mut scene = SceneGraph::new();
        let id = scene.instantiate(&NodeTemplate::empty());
        scene.add(id).unwrap();
        assert!(scene.detach(id));
        assert!(!scene.detach(id));
        assert!(scene.contains(id));
        assert!(!scene.is_in_scene(id));
        assert!(scene.get(scene.root()).unwrap().children().is_empty());
    }

    #[test]
    fn remove_frees_subtree() {
        let mut scene = SceneGraph::new();
        let id = scene.instantiate(&ship_template());
        scene.add(id).unwrap();
        assert_eq!(scene.remove(id).unwrap(), 3);
        assert_eq!(scene.len(), 1);
        assert!(matches!(scene.remove(id), Err(SceneError::NodeNotFound(_))));
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        assert!(matches!(scene.remove(root), Err(SceneError::RootIsFixed)));
    }

    #[test]
    fn attach_reparents_and_refuses_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.instantiate(&NodeTemplate::empty());
        let b = scene.instantiate(&NodeTemplate::empty());
        scene.add(a).unwrap();
        scene.attach(a, b).unwrap();
        assert_eq!(scene.get(b).unwrap().parent(), Some(a));

        scene.add(b).unwrap();
        assert_eq!(scene.get(b).unwrap().parent(), Some(scene.root()));
        assert!(scene.get(a).unwrap().children().is_empty());

        scene.attach(b, a).unwrap();
        assert!(matches!(scene.attach(a, b), Err(SceneError::Cycle { .. })));
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = SceneGraph::new();
        let parent = scene.instantiate(
            &NodeTemplate::group("p")
                .with_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)))
                .with_child(
                    NodeTemplate::empty()
                        .with_transform(Transform::from_position(Vec3::new(0.0, 2.0, 0.0))),
                ),
        );
        let child = scene.get(parent).unwrap().children()[0];
        let world = scene.world_matrix(child).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn traverse_is_depth_first_in_child_order() {
        let mut scene = SceneGraph::new();
        let a = scene.instantiate(&NodeTemplate::group("a").with_child(NodeTemplate::group("a1")));
        let b = scene.instantiate(&NodeTemplate::group("b"));
        scene.add(a).unwrap();
        scene.add(b).unwrap();
        let names: Vec<(usize, &str)> = scene
            .traverse()
            .into_iter()
            .map(|(d, n)| (d, n.name.as_str()))
            .collect();
        assert_eq!(names, vec![(0, "scene"), (1, "a"), (2, "a1"), (1, "b")]);
    }
}
