use glam::{Quat, Vec3};
use spacefight_common::Transform;
use spacefight_scene::{Geometry, Material, NodeKind, NodeTemplate};

use crate::{AssetError, Texture};

/// Decode a glTF (`.gltf` JSON or `.glb` binary) into a node template.
///
/// The default scene (or the first one) becomes a group named `name` whose
/// children mirror the glTF node hierarchy. Mesh nodes keep their mesh name,
/// primitive count and vertex count; vertex data stays with the host renderer.
pub fn decode_model(name: &str, bytes: &[u8]) -> Result<NodeTemplate, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| AssetError::EmptyModel(name.to_string()))?;
    let children: Vec<NodeTemplate> = scene.nodes().map(|n| node_template(&n)).collect();
    Ok(NodeTemplate::group(name).with_children(children))
}

fn node_template(node: &gltf::Node<'_>) -> NodeTemplate {
    let (translation, rotation, scale) = node.transform().decomposed();
    let transform = Transform {
        position: Vec3::from_array(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from_array(scale),
    };
    let kind = match node.mesh() {
        Some(mesh) => {
            let vertex_count = mesh
                .primitives()
                .filter_map(|p| p.get(&gltf::Semantic::Positions))
                .map(|accessor| accessor.count())
                .sum();
            NodeKind::Mesh {
                geometry: Geometry::Imported {
                    mesh: mesh
                        .name()
                        .map(str::to_owned)
                        .unwrap_or_else(|| format!("mesh_{}", mesh.index())),
                    primitives: mesh.primitives().count(),
                    vertex_count,
                },
                material: Material::default(),
            }
        }
        None => NodeKind::Group,
    };
    let name = node
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("node_{}", node.index()));
    NodeTemplate::new(name, kind)
        .with_transform(transform)
        .with_children(node.children().map(|c| node_template(&c)))
}

/// Decode an encoded image (PNG, JPEG) into an RGBA8 texture.
pub fn decode_texture(bytes: &[u8]) -> Result<Texture, AssetError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(Texture {
        width,
        height,
        rgba: img.into_raw().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIP_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [
            { "name": "hull", "translation": [1.0, 2.0, 3.0], "children": [1] },
            { "name": "wing", "scale": [2.0, 2.0, 2.0] }
        ]
    }"#;

    #[test]
    fn gltf_hierarchy_becomes_template() {
        let t = decode_model("spaceship", SHIP_GLTF.as_bytes()).unwrap();
        assert_eq!(t.name, "spaceship");
        assert_eq!(t.kind, NodeKind::Group);
        assert_eq!(t.node_count(), 3);

        let hull = &t.children[0];
        assert_eq!(hull.name, "hull");
        assert_eq!(hull.transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(hull.children[0].transform.scale, Vec3::splat(2.0));
    }

    #[test]
    fn garbage_is_a_gltf_error() {
        let err = decode_model("x", b"not a model").unwrap_err();
        assert!(matches!(err, AssetError::Gltf(_)));
    }

    #[test]
    fn model_without_scene_is_rejected() {
        let json = r#"{ "asset": { "version": "2.0" } }"#;
        let err = decode_model("hollow", json.as_bytes()).unwrap_err();
        assert!(matches!(err, AssetError::EmptyModel(ref n) if n == "hollow"));
    }

    #[test]
    fn png_decodes_to_rgba() {
        let mut encoded = std::io::Cursor::new(Vec::new());
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut encoded, image::ImageFormat::Png)
            .unwrap();

        let t = decode_texture(encoded.get_ref()).unwrap();
        assert_eq!((t.width, t.height), (3, 2));
        assert_eq!(&t.rgba[..4], &[10, 20, 30, 255]);
    }
}
