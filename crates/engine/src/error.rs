use spacefight_assets::{AssetError, LoadError};
use spacefight_common::{EntityId, NodeId};
use spacefight_scene::SceneError;

/// Errors surfaced by the engine and by gameplay code running inside it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
    #[error("node {node:?} is not a sub-node of entity {entity}")]
    SubNodeNotAttached { entity: EntityId, node: NodeId },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
