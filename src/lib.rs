//! scene-ngin
//!
//! Prepares and renders scenes made of a flat list of independently described
//! objects that all share one shader program. Each object carries its own
//! transform, a flat colour or a texture, and a material tag. Because the
//! program's uniforms persist from one draw call to the next, the crate's core
//! job is to write an object's complete uniform state right before it is
//! drawn so nothing bleeds over from the previous object.
//!
//! High-level modules
//! - `config`: settings the scene manager is created with
//! - `data_structures`: transforms, materials, texture slots and scene objects
//! - `error`: the failure taxonomy shared by preparation and rendering
//! - `pipelines`: light uniforms and the wgpu uniform mirror
//! - `render`: the per-object shader state binder
//! - `resources`: texture loading
//! - `scene`: scene preparation, rendering and teardown
//! - `shader`: seams to the shader program and mesh collaborators
//!

pub mod config;
pub mod data_structures;
pub mod error;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Vector2, Vector3, Vector4};
pub use config::SceneConfig;
pub use data_structures::{
    material::Material,
    object::{Appearance, RenderableObject, SceneLight},
    transform::Transform,
};
pub use error::SceneError;
pub use scene::{SceneDescription, SceneManager, TextureSource};
pub use shader::{MeshKind, MeshProvider, ShaderProgram};

/// Initialises `env_logger` once. Later calls are ignored.
pub fn init_logger() {
    if let Err(e) = env_logger::try_init() {
        log::debug!("logger already initialised: {e}");
    }
}
