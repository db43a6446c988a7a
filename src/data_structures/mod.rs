//! Engine data structures: transforms, materials, textures and scene objects.
//!
//! - `transform` composes per-object model matrices
//! - `material` holds material definitions and the tag based registry
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `texture_slots` maps texture tags onto the shader's fixed binding slots
//! - `object` describes renderable objects and scene lights

pub mod material;
pub mod object;
pub mod texture;
pub mod texture_slots;
pub mod transform;
