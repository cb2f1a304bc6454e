use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AssetCategory, AssetError};

/// One resource to load: logical name, where to fetch it from, and its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub locator: String,
    pub category: AssetCategory,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, locator: impl Into<String>, category: AssetCategory) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            category,
        }
    }
}

/// Ordered list of resources declared at startup.
///
/// Serialized as JSON:
/// ```text
/// { "entries": [ { "name": "spaceship", "locator": "models/spaceship.glb", "category": "model" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, name: &str, locator: &str) -> Self {
        self.entries
            .push(ManifestEntry::new(name, locator, AssetCategory::Model));
        self
    }

    pub fn texture(mut self, name: &str, locator: &str) -> Self {
        self.entries
            .push(ManifestEntry::new(name, locator, AssetCategory::Texture));
        self
    }

    pub fn audio(mut self, name: &str, locator: &str) -> Self {
        self.entries
            .push(ManifestEntry::new(name, locator, AssetCategory::Audio));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one category, in declaration order.
    pub fn of(&self, category: AssetCategory) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Load a manifest from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let manifest: Self = serde_json::from_reader(file)?;
        Ok(manifest)
    }

    /// Save the manifest as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let m = Manifest::new()
            .model("spaceship", "models/spaceship.glb")
            .texture("asteroid", "textures/asteroid.jpg")
            .texture("space", "textures/space.jpg");
        assert_eq!(m.len(), 3);
        let textures: Vec<&str> = m
            .of(AssetCategory::Texture)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(textures, vec!["asteroid", "space"]);
    }

    #[test]
    fn parses_lowercase_categories() {
        let json = r#"{"entries":[{"name":"laser","locator":"audio/laser.ogg","category":"audio"}]}"#;
        let m: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(m.entries[0].category, AssetCategory::Audio);
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let m = Manifest::new().model("ship", "ship.gltf");
        m.save(tmp.path()).unwrap();

        let loaded = Manifest::from_json_file(tmp.path()).unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Manifest::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}
