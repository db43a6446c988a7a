//! Scene preparation, rendering and teardown.
//!
//! # Lifecycle
//!
//! 1. [`SceneManager::prepare_scene`] loads textures, binds them to their
//!    slots, registers materials and applies lighting once
//! 2. [`SceneManager::render_scene`] binds and draws every object, in order,
//!    as often as the caller renders frames
//! 3. [`SceneManager::destroy_textures`] (or dropping the manager) releases
//!    the GPU textures
//!
//! Neither step aborts on the first failure. Preparation reports what could
//! not be loaded and renders with what could; rendering skips individual
//! objects.

use crate::{
    config::SceneConfig,
    data_structures::{
        material::{Material, MaterialRegistry},
        object::{RenderableObject, SceneLight},
        texture_slots::TextureSlots,
    },
    error::SceneError,
    pipelines::light::apply_lighting,
    render::{RenderReport, ShaderStateBinder},
    resources::texture::{TextureLoader, WgpuTextureLoader},
    shader::{MeshProvider, ShaderProgram},
};

/// An image to register under `tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSource {
    pub tag: String,
    pub source: String,
}

impl TextureSource {
    pub fn new(tag: &str, source: &str) -> Self {
        Self {
            tag: tag.to_string(),
            source: source.to_string(),
        }
    }
}

/// Everything [`SceneManager::prepare_scene`] sets up.
#[derive(Clone, Debug, Default)]
pub struct SceneDescription {
    pub textures: Vec<TextureSource>,
    pub materials: Vec<Material>,
    pub lights: Vec<SceneLight>,
}

#[derive(Debug, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    pub materials_registered: usize,
    pub lights_applied: usize,
    pub errors: Vec<SceneError>,
}

impl PrepareReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct SceneManager<L: TextureLoader> {
    config: SceneConfig,
    loader: L,
    textures: TextureSlots,
    materials: MaterialRegistry,
}

impl SceneManager<WgpuTextureLoader> {
    /// Manager that loads textures from `config.assets_dir` onto `device`.
    pub fn wgpu(device: &wgpu::Device, queue: &wgpu::Queue, config: SceneConfig) -> Self {
        let loader = WgpuTextureLoader::new(device, queue, config.assets_dir.clone());
        Self::new(config, loader)
    }
}

impl<L: TextureLoader> SceneManager<L> {
    pub fn new(config: SceneConfig, loader: L) -> Self {
        let materials = MaterialRegistry::new(config.default_material.clone());
        Self {
            config,
            loader,
            textures: TextureSlots::new(),
            materials,
        }
    }

    /// Loads textures, registers materials and applies lighting.
    ///
    /// A previously prepared scene is torn down first. Failed texture
    /// registrations are collected in the report and the remaining textures
    /// are still loaded.
    pub fn prepare_scene<P: ShaderProgram + ?Sized>(
        &mut self,
        description: &SceneDescription,
        program: &mut P,
    ) -> PrepareReport {
        self.destroy_textures();
        self.materials.clear();

        let mut report = PrepareReport::default();

        for texture in &description.textures {
            match self
                .textures
                .register(&texture.tag, &texture.source, &mut self.loader)
            {
                Ok(_) => report.textures_loaded += 1,
                Err(e) => {
                    log::error!("{e}");
                    report.errors.push(e);
                }
            }
        }
        self.textures.bind_all(&mut self.loader);

        for material in &description.materials {
            self.materials.register(material.clone());
            report.materials_registered += 1;
        }

        report.lights_applied = apply_lighting(program, &description.lights);

        log::info!(
            "scene prepared: {} textures, {} materials, {} lights, {} errors",
            report.textures_loaded,
            report.materials_registered,
            report.lights_applied,
            report.errors.len()
        );
        report
    }

    /// Binds and draws `objects` in order.
    pub fn render_scene<P, M>(
        &self,
        objects: &[RenderableObject],
        program: &mut P,
        meshes: &mut M,
    ) -> RenderReport
    where
        P: ShaderProgram,
        M: MeshProvider<P>,
    {
        ShaderStateBinder::new(&self.textures, &self.materials).render(objects, program, meshes)
    }

    /// Releases every loaded texture. Objects referencing textures render as
    /// skipped until the scene is prepared again.
    pub fn destroy_textures(&mut self) {
        if !self.textures.is_empty() {
            log::debug!("releasing {} textures", self.textures.len());
        }
        self.textures.release_all(&mut self.loader);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn textures(&self) -> &TextureSlots {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: TextureLoader> Drop for SceneManager<L> {
    fn drop(&mut self) {
        self.destroy_textures();
    }
}
