use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use glam::Vec3;
use spacefight_assets::{
    Asset, AssetCategory, AssetError, AssetSource, AudioClip, Manifest, ManifestEntry, Texture,
};
use spacefight_common::Transform;
use spacefight_scene::{Geometry, Material, NodeTemplate};

/// Assets the demo scene needs, by the names gameplay code looks up.
pub fn demo_manifest() -> Manifest {
    Manifest::new()
        .model("spaceship", "models/spaceship.glb")
        .texture("asteroid", "textures/asteroid.jpg")
        .texture("space", "textures/space.jpg")
        .audio("laser", "audio/laser.ogg")
}

/// Procedural stand-ins for the demo assets, for runs without an asset
/// directory. Entries are matched by category and name; the locator is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssetSource;

impl AssetSource for BuiltinAssetSource {
    fn fetch(&self, entry: &ManifestEntry) -> LocalBoxFuture<'static, Result<Asset, AssetError>> {
        future::ready(builtin(entry)).boxed_local()
    }
}

fn builtin(entry: &ManifestEntry) -> Result<Asset, AssetError> {
    match (entry.category, entry.name.as_str()) {
        (AssetCategory::Model, "spaceship") => Ok(Asset::Model(spaceship())),
        (AssetCategory::Texture, "asteroid") => {
            Ok(Asset::Texture(Texture::solid(8, 8, [118, 106, 96, 255])))
        }
        (AssetCategory::Texture, "space") => {
            Ok(Asset::Texture(Texture::solid(8, 8, [4, 4, 18, 255])))
        }
        (AssetCategory::Audio, "laser") => Ok(Asset::Audio(AudioClip::new(laser_chirp()))),
        (category, name) => Err(AssetError::NotFound {
            category,
            name: name.to_string(),
        }),
    }
}

/// Hull along +Z with two wing pods.
fn spaceship() -> NodeTemplate {
    let hull = NodeTemplate::mesh(
        "hull",
        Geometry::Cylinder {
            radius_top: 0.3,
            radius_bottom: 0.6,
            height: 3.0,
            segments: 12,
        },
        Material::unlit_rgb(0xb0b8c0),
    )
    .with_transform(Transform::default().with_rotation(glam::Quat::from_rotation_x(
        std::f32::consts::FRAC_PI_2,
    )));
    let pod = |name: &str, x: f32| {
        NodeTemplate::mesh(
            name,
            Geometry::Sphere {
                radius: 0.5,
                segments: 8,
            },
            Material::unlit_rgb(0x4060a0),
        )
        .with_transform(Transform::from_position(Vec3::new(x, 0.0, -0.5)))
    };
    NodeTemplate::group("spaceship").with_children([hull, pod("pod.left", 1.5), pod("pod.right", -1.5)])
}

/// Descending square-wave blip, 8-bit unsigned mono at 8 kHz.
fn laser_chirp() -> Vec<u8> {
    const RATE: f32 = 8000.0;
    (0..800u32)
        .map(|i| {
            let t = i as f32 / RATE;
            let freq = 1800.0 - 12_000.0 * t;
            if (t * freq).fract() < 0.5 { 192 } else { 64 }
        })
        .collect()
}
