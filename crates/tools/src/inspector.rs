use spacefight_common::EntityId;
use spacefight_engine::Engine;
use std::fmt;

/// Engine inspector for developer tooling.
///
/// Read-only queries against the engine state for debugging and the CLI.
pub struct EngineInspector;

impl EngineInspector {
    /// Produce a summary of the engine state.
    pub fn summary(engine: &Engine) -> EngineSummary {
        EngineSummary {
            tick: engine.tick(),
            dt: engine.dt(),
            fps: engine.fps(),
            entity_count: engine.entities().len(),
            node_count: engine.scene().len(),
            pending_removal: engine.entities().pending_removal(),
        }
    }

    pub fn inspect_entity(engine: &Engine, id: EntityId) -> Option<EntityInfo> {
        let entity = engine.entity(id)?;
        let transform = engine.transform(id).copied().unwrap_or_default();
        let p = transform.position;
        let s = transform.scale;
        Some(EntityInfo {
            id,
            tag: entity.tag(),
            position: [p.x, p.y, p.z],
            scale: [s.x, s.y, s.z],
            sub_nodes: entity.sub_nodes().len(),
            pending_removal: entity.pending_removal,
        })
    }

    /// Every live entity, in update order.
    pub fn list_entities(engine: &Engine) -> Vec<EntityInfo> {
        engine
            .entities()
            .iter()
            .filter_map(|e| Self::inspect_entity(engine, e.id()))
            .collect()
    }
}

/// Summary of engine state for the inspector.
#[derive(Debug, Clone)]
pub struct EngineSummary {
    pub tick: u64,
    pub dt: f32,
    pub fps: f32,
    pub entity_count: usize,
    pub node_count: usize,
    pub pending_removal: usize,
}

impl fmt::Display for EngineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Engine: tick={} dt={:.4} fps={:.1} entities={} nodes={} pending_removal={}",
            self.tick, self.dt, self.fps, self.entity_count, self.node_count, self.pending_removal
        )
    }
}

/// Detailed info about a single entity.
#[derive(Debug, Clone)]
pub struct EntityInfo {
    pub id: EntityId,
    pub tag: Option<&'static str>,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub sub_nodes: usize,
    pub pending_removal: bool,
}

impl fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity {} [{}] pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) sub_nodes={}",
            self.id,
            self.tag.unwrap_or("-"),
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
            self.sub_nodes,
        )?;
        if self.pending_removal {
            write!(f, " (removing)")?;
        }
        Ok(())
    }
}
