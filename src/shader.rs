//! Seams to the shader program and mesh collaborators.
//!
//! The core never compiles shaders or uploads geometry. It only writes named
//! uniforms into a [`ShaderProgram`] and asks a [`MeshProvider`] to draw with
//! whatever state is currently bound.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

/// Uniform names shared by the scene shader.
pub mod uniforms {
    pub const MODEL: &str = "model";
    pub const OBJECT_COLOR: &str = "objectColor";
    pub const USE_TEXTURE: &str = "bUseTexture";
    pub const OBJECT_TEXTURE: &str = "objectTexture";
    pub const UV_SCALE: &str = "UVscale";

    pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
    pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
    pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
    pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
    pub const MATERIAL_SHININESS: &str = "material.shininess";

    pub const USE_LIGHTING: &str = "bUseLighting";
    pub const LIGHT_COUNT: &str = "lightCount";

    /// `lightSources[idx].position`
    pub fn light_position(idx: usize) -> String {
        format!("lightSources[{idx}].position")
    }

    /// `lightSources[idx].color`
    pub fn light_color(idx: usize) -> String {
        format!("lightSources[{idx}].color")
    }

    /// `lightSources[idx].intensity`
    pub fn light_intensity(idx: usize) -> String {
        format!("lightSources[{idx}].intensity")
    }
}

/// Uniform writes against an already linked and active shader program.
///
/// Implementations are expected to behave like GL uniforms: a value stays
/// set until it is overwritten, and writes to names the program does not know
/// are ignored.
pub trait ShaderProgram {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);

    fn set_float(&mut self, name: &str, value: f32);

    fn set_int(&mut self, name: &str, value: i32);
}

/// Pre-uploaded basic shapes a [`MeshProvider`] can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Cone,
    Sphere,
    HalfSphere,
    Torus,
    Prism,
    Pyramid3,
    Pyramid4,
}

/// Draws pre-uploaded geometry with the state currently bound in `program`.
pub trait MeshProvider<P: ShaderProgram + ?Sized> {
    fn draw(&mut self, mesh: MeshKind, program: &P);
}
