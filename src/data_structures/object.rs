//! Declarative description of the things in a scene.

use cgmath::{Vector2, Vector3, Vector4};

use crate::{data_structures::transform::Transform, shader::MeshKind};

/// How an object's surface is coloured.
#[derive(Clone, Debug, PartialEq)]
pub enum Appearance {
    /// One RGBA colour over the whole surface.
    FlatColor(Vector4<f32>),
    /// Samples the texture registered under `tag`, tiled `uv_scale` times.
    Textured { tag: String, uv_scale: Vector2<f32> },
}

impl Appearance {
    pub fn color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Appearance::FlatColor(Vector4::new(r, g, b, a))
    }

    pub fn texture(tag: &str, u_scale: f32, v_scale: f32) -> Self {
        Appearance::Textured {
            tag: tag.to_string(),
            uv_scale: Vector2::new(u_scale, v_scale),
        }
    }
}

/// One entry of the flat scene list. The core only reads these.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableObject {
    pub transform: Transform,
    pub appearance: Appearance,
    pub material_tag: Option<String>,
    pub mesh: MeshKind,
}

impl RenderableObject {
    pub fn new(mesh: MeshKind, transform: Transform, appearance: Appearance) -> Self {
        Self {
            transform,
            appearance,
            material_tag: None,
            mesh,
        }
    }

    pub fn with_material(mut self, tag: &str) -> Self {
        self.material_tag = Some(tag.to_string());
        self
    }
}

/// A point light shared by every object of a render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLight {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    pub intensity: f32,
}

impl SceneLight {
    pub fn new(position: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity: intensity.max(0.0),
        }
    }
}
