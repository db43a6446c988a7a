//! GPU side of the scene shader.
//!
//! - `light` writes the scene-wide light uniforms and owns their GPU layout
//! - `object` mirrors named uniform writes into packed wgpu uniform blocks

pub mod light;
pub mod object;
