//! Per-object shader state binding.
//!
//! The scene shader is one program whose uniforms persist between draw calls.
//! [`ShaderStateBinder`] therefore writes the complete state an object needs
//! (transform, the whole appearance block and all material fields) before
//! every draw, and never relies on what the previous object left behind.
//!
//! # Per-object states
//!
//! `Idle -> TransformSet -> AppearanceSet -> MaterialSet -> Drawn`. An object
//! whose texture cannot be resolved stops at `Skipped` and is not drawn; the
//! objects after it are bound and drawn as usual.

use cgmath::{Vector2, Vector4};

use crate::{
    data_structures::{
        material::{Material, MaterialRegistry},
        object::{Appearance, RenderableObject},
        texture_slots::TextureSlots,
    },
    error::SceneError,
    shader::{MeshProvider, ShaderProgram, uniforms},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectState {
    Idle,
    TransformSet,
    AppearanceSet,
    MaterialSet,
    Drawn,
    Skipped,
}

/// Everything the appearance step writes. Built in full for every object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppearanceState {
    pub use_texture: bool,
    pub texture_slot: i32,
    pub uv_scale: Vector2<f32>,
    pub color: Vector4<f32>,
}

impl AppearanceState {
    pub fn flat(color: Vector4<f32>) -> Self {
        Self {
            use_texture: false,
            texture_slot: 0,
            uv_scale: Vector2::new(1.0, 1.0),
            color,
        }
    }

    pub fn textured(slot: usize, uv_scale: Vector2<f32>) -> Self {
        Self {
            use_texture: true,
            texture_slot: slot as i32,
            uv_scale,
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    fn write<P: ShaderProgram + ?Sized>(&self, program: &mut P) {
        program.set_int(uniforms::USE_TEXTURE, self.use_texture as i32);
        program.set_int(uniforms::OBJECT_TEXTURE, self.texture_slot);
        program.set_vec2(uniforms::UV_SCALE, self.uv_scale);
        program.set_vec4(uniforms::OBJECT_COLOR, self.color);
    }
}

fn write_material<P: ShaderProgram + ?Sized>(program: &mut P, material: &Material) {
    program.set_float(uniforms::MATERIAL_AMBIENT_STRENGTH, material.ambient_strength);
    program.set_vec3(uniforms::MATERIAL_AMBIENT_COLOR, material.ambient_color);
    program.set_vec3(uniforms::MATERIAL_DIFFUSE_COLOR, material.diffuse_color);
    program.set_vec3(uniforms::MATERIAL_SPECULAR_COLOR, material.specular_color);
    program.set_float(uniforms::MATERIAL_SHININESS, material.shininess);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectOutcome {
    /// Position of the object in the scene list.
    pub index: usize,
    pub state: ObjectState,
}

/// Result of one render pass over the scene list.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub outcomes: Vec<ObjectOutcome>,
    pub errors: Vec<(usize, SceneError)>,
}

impl RenderReport {
    pub fn drawn(&self) -> usize {
        self.count(ObjectState::Drawn)
    }

    pub fn skipped(&self) -> usize {
        self.count(ObjectState::Skipped)
    }

    fn count(&self, state: ObjectState) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.state == state)
            .count()
    }
}

/// Binds objects one after another against a shared program.
pub struct ShaderStateBinder<'a> {
    textures: &'a TextureSlots,
    materials: &'a MaterialRegistry,
}

impl<'a> ShaderStateBinder<'a> {
    pub fn new(textures: &'a TextureSlots, materials: &'a MaterialRegistry) -> Self {
        Self {
            textures,
            materials,
        }
    }

    /// Resolves what the appearance step must write for `appearance`.
    pub fn resolve_appearance(&self, appearance: &Appearance) -> Result<AppearanceState, SceneError> {
        match appearance {
            Appearance::FlatColor(color) => Ok(AppearanceState::flat(*color)),
            Appearance::Textured { tag, uv_scale } => self
                .textures
                .slot_of(tag)
                .map(|slot| AppearanceState::textured(slot, *uv_scale))
                .map_err(|_| SceneError::UnresolvedTexture { tag: tag.clone() }),
        }
    }

    /// Runs the full binding sequence for one object and draws it.
    ///
    /// Returns the terminal state: `Drawn`, or `Skipped` together with the
    /// reason when the appearance could not be resolved.
    pub fn bind_and_draw<P, M>(
        &self,
        object: &RenderableObject,
        program: &mut P,
        meshes: &mut M,
    ) -> (ObjectState, Option<SceneError>)
    where
        P: ShaderProgram,
        M: MeshProvider<P>,
    {
        let mut state = ObjectState::Idle;

        program.set_mat4(uniforms::MODEL, object.transform.compose());
        state = advance(state, ObjectState::TransformSet);

        let appearance = match self.resolve_appearance(&object.appearance) {
            Ok(appearance) => appearance,
            Err(e) => return (advance(state, ObjectState::Skipped), Some(e)),
        };
        appearance.write(program);
        state = advance(state, ObjectState::AppearanceSet);

        let material = self.materials.resolve(object.material_tag.as_deref());
        write_material(program, material);
        state = advance(state, ObjectState::MaterialSet);

        meshes.draw(object.mesh, program);
        (advance(state, ObjectState::Drawn), None)
    }

    /// Binds and draws every object in list order. Failed objects are
    /// skipped individually; the pass always runs to the end of the list.
    pub fn render<P, M>(&self, objects: &[RenderableObject], program: &mut P, meshes: &mut M) -> RenderReport
    where
        P: ShaderProgram,
        M: MeshProvider<P>,
    {
        let mut report = RenderReport::default();
        for (index, object) in objects.iter().enumerate() {
            let (state, error) = self.bind_and_draw(object, program, meshes);
            if let Some(e) = error {
                log::warn!("object {index} not drawn: {e}");
                report.errors.push((index, e));
            }
            report.outcomes.push(ObjectOutcome { index, state });
        }
        log::debug!(
            "render pass finished: {} drawn, {} skipped",
            report.drawn(),
            report.skipped()
        );
        report
    }
}

fn advance(from: ObjectState, to: ObjectState) -> ObjectState {
    debug_assert!(
        matches!(
            (from, to),
            (ObjectState::Idle, ObjectState::TransformSet)
                | (ObjectState::TransformSet, ObjectState::AppearanceSet)
                | (ObjectState::TransformSet, ObjectState::Skipped)
                | (ObjectState::AppearanceSet, ObjectState::MaterialSet)
                | (ObjectState::MaterialSet, ObjectState::Drawn)
        ),
        "illegal object state transition {from:?} -> {to:?}"
    );
    to
}
