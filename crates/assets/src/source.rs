use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::decode::{decode_model, decode_texture};
use crate::{Asset, AssetCategory, AssetError, AudioClip, ManifestEntry};

/// Host-side loader for manifest entries.
///
/// `fetch` starts the request and returns a future resolving to the decoded
/// asset. Futures are single-threaded (`LocalBoxFuture`); the engine runs on one
/// cooperative execution context.
pub trait AssetSource {
    fn fetch(&self, entry: &ManifestEntry) -> LocalBoxFuture<'static, Result<Asset, AssetError>>;
}

/// Loads assets from files below a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsAssetSource {
    fn fetch(&self, entry: &ManifestEntry) -> LocalBoxFuture<'static, Result<Asset, AssetError>> {
        let path = self.root.join(&entry.locator);
        let name = entry.name.clone();
        let category = entry.category;
        async move {
            let bytes = tokio::fs::read(&path).await?;
            decode(category, &name, bytes)
        }
        .boxed_local()
    }
}

fn decode(category: AssetCategory, name: &str, bytes: Vec<u8>) -> Result<Asset, AssetError> {
    Ok(match category {
        AssetCategory::Model => Asset::Model(decode_model(name, &bytes)?),
        AssetCategory::Texture => Asset::Texture(decode_texture(&bytes)?),
        AssetCategory::Audio => Asset::Audio(AudioClip::new(bytes)),
    })
}

/// In-memory source keyed by locator, with optional per-locator latency.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Asset>,
    latency: HashMap<String, Duration>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl Into<String>, asset: Asset) -> Self {
        self.assets.insert(locator.into(), asset);
        self
    }

    /// Delay the completion of one locator's fetch.
    pub fn with_latency(mut self, locator: impl Into<String>, latency: Duration) -> Self {
        self.latency.insert(locator.into(), latency);
        self
    }

    pub fn insert(&mut self, locator: impl Into<String>, asset: Asset) {
        self.assets.insert(locator.into(), asset);
    }
}

impl AssetSource for MemoryAssetSource {
    fn fetch(&self, entry: &ManifestEntry) -> LocalBoxFuture<'static, Result<Asset, AssetError>> {
        let found = self.assets.get(&entry.locator).cloned();
        let latency = self.latency.get(&entry.locator).copied();
        let locator = entry.locator.clone();
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            found.ok_or_else(|| {
                AssetError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no in-memory asset at {locator}"),
                ))
            })
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Texture;

    #[tokio::test]
    async fn fs_source_reads_audio_bytes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("audio")).unwrap();
        std::fs::write(dir.path().join("audio/laser.ogg"), [7u8, 8, 9]).unwrap();

        let source = FsAssetSource::new(dir.path());
        let entry = ManifestEntry::new("laser", "audio/laser.ogg", AssetCategory::Audio);
        match source.fetch(&entry).await.unwrap() {
            Asset::Audio(clip) => assert_eq!(&*clip.bytes, &[7, 8, 9]),
            other => panic!("unexpected asset {other:?}"),
        }
    }

    #[tokio::test]
    async fn fs_source_decodes_textures() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]))
            .save(dir.path().join("space.png"))
            .unwrap();

        let source = FsAssetSource::new(dir.path());
        let entry = ManifestEntry::new("space", "space.png", AssetCategory::Texture);
        let asset = source.fetch(&entry).await.unwrap();
        assert!(matches!(asset, Asset::Texture(Texture { width: 4, height: 4, .. })));
    }

    #[tokio::test]
    async fn fs_source_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsAssetSource::new(dir.path());
        let entry = ManifestEntry::new("ship", "models/ship.glb", AssetCategory::Model);
        assert!(matches!(source.fetch(&entry).await, Err(AssetError::Io(_))));
    }

    #[tokio::test]
    async fn memory_source_serves_by_locator() {
        let source = MemoryAssetSource::new()
            .with("a.png", Asset::Texture(Texture::solid(1, 1, [0; 4])));
        let hit = ManifestEntry::new("a", "a.png", AssetCategory::Texture);
        let miss = ManifestEntry::new("b", "b.png", AssetCategory::Texture);
        assert!(source.fetch(&hit).await.is_ok());
        assert!(source.fetch(&miss).await.is_err());
    }
}
