use spacefight_scene::NodeTemplate;
use std::collections::BTreeMap;

use crate::{Asset, AssetCategory, AssetError, AudioClip, Texture};

/// Loaded assets by category and manifest name.
///
/// Populated by the loading barrier as individual loads complete. Models are
/// handed out as fresh template copies so every entity gets independent nodes;
/// textures and audio share their underlying buffers.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    models: BTreeMap<String, NodeTemplate>,
    textures: BTreeMap<String, Texture>,
    audio: BTreeMap<String, AudioClip>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset under `name`. An existing asset of the same category and
    /// name is replaced.
    pub fn insert(&mut self, name: impl Into<String>, asset: Asset) {
        let name = name.into();
        let replaced = match asset {
            Asset::Model(m) => self.models.insert(name.clone(), m).is_some(),
            Asset::Texture(t) => self.textures.insert(name.clone(), t).is_some(),
            Asset::Audio(a) => self.audio.insert(name.clone(), a).is_some(),
        };
        if replaced {
            tracing::debug!(%name, "asset replaced by later load");
        }
    }

    /// A fresh copy of the model template.
    pub fn model(&self, name: &str) -> Result<NodeTemplate, AssetError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(AssetCategory::Model, name))
    }

    pub fn texture(&self, name: &str) -> Result<&Texture, AssetError> {
        self.textures
            .get(name)
            .ok_or_else(|| not_found(AssetCategory::Texture, name))
    }

    pub fn audio(&self, name: &str) -> Result<&AudioClip, AssetError> {
        self.audio
            .get(name)
            .ok_or_else(|| not_found(AssetCategory::Audio, name))
    }

    pub fn contains(&self, category: AssetCategory, name: &str) -> bool {
        match category {
            AssetCategory::Model => self.models.contains_key(name),
            AssetCategory::Texture => self.textures.contains_key(name),
            AssetCategory::Audio => self.audio.contains_key(name),
        }
    }

    /// Number of registered assets in one category.
    pub fn count(&self, category: AssetCategory) -> usize {
        match category {
            AssetCategory::Model => self.models.len(),
            AssetCategory::Texture => self.textures.len(),
            AssetCategory::Audio => self.audio.len(),
        }
    }

    /// Number of registered assets across all categories.
    pub fn len(&self) -> usize {
        self.models.len() + self.textures.len() + self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(category: AssetCategory, name: &str) -> AssetError {
    AssetError::NotFound {
        category,
        name: name.to_string(),
    }
}
