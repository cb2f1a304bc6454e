//! Asset pipeline: manifest, registry, sources and the loading barrier.
//!
//! The barrier fetches every manifest entry concurrently and hands over a
//! fully populated [`AssetRegistry`] exactly once. Consumers look assets up by
//! their manifest name, never by locator.
//!
//! # Invariants
//! - After the barrier resolves successfully, every manifest entry has a
//!   registry entry under its name and category.
//! - Duplicate names within a category overwrite; the last completed load wins.
//! - A failed or stalled load fails the barrier instead of hanging it.

mod asset;
mod barrier;
mod decode;
mod manifest;
mod registry;
mod source;

pub use asset::{Asset, AssetCategory, AudioClip, Texture};
pub use barrier::{DEFAULT_LOAD_TIMEOUT, LoadBarrier, LoadError};
pub use decode::{decode_model, decode_texture};
pub use manifest::{Manifest, ManifestEntry};
pub use registry::AssetRegistry;
pub use source::{AssetSource, FsAssetSource, MemoryAssetSource};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{category} \"{name}\" not found")]
    NotFound { category: AssetCategory, name: String },
    #[error("expected a {expected} for \"{name}\", source produced a {actual}")]
    CategoryMismatch {
        name: String,
        expected: AssetCategory,
        actual: AssetCategory,
    },
    #[error("glTF parse error: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("model \"{0}\" has no scene")]
    EmptyModel(String),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
