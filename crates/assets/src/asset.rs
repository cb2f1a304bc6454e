use serde::{Deserialize, Serialize};
use spacefight_scene::NodeTemplate;
use std::fmt;
use std::sync::Arc;

/// Which registry map an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Model,
    Texture,
    Audio,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Texture => "texture",
            Self::Audio => "audio",
        })
    }
}

/// Decoded RGBA8 texture. Cloning shares the pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<[u8]>,
}

impl Texture {
    /// Single-color texture, used for placeholders.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let rgba: Vec<u8> = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            rgba: rgba.into(),
        }
    }
}

/// Encoded audio clip. Playback is the host's concern; the engine only queues cues.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Arc<[u8]>,
}

impl AudioClip {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

/// A loaded resource as produced by an [`AssetSource`](crate::AssetSource).
#[derive(Debug, Clone)]
pub enum Asset {
    Model(NodeTemplate),
    Texture(Texture),
    Audio(AudioClip),
}

impl Asset {
    pub fn category(&self) -> AssetCategory {
        match self {
            Self::Model(_) => AssetCategory::Model,
            Self::Texture(_) => AssetCategory::Texture,
            Self::Audio(_) => AssetCategory::Audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_texture_fills_every_pixel() {
        let t = Texture::solid(2, 3, [1, 2, 3, 4]);
        assert_eq!(t.rgba.len(), 24);
        assert_eq!(&t.rgba[20..24], &[1, 2, 3, 4]);
    }

    #[test]
    fn category_names() {
        assert_eq!(AssetCategory::Texture.to_string(), "texture");
        assert_eq!(Asset::Audio(AudioClip::new(vec![0u8])).category(), AssetCategory::Audio);
    }
}
