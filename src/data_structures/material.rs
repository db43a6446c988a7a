//! Material definitions and the tag based material registry.
//!
//! Materials describe how a surface responds to light. They are registered
//! once while a scene is prepared and looked up by tag for every object that
//! is drawn. Lookups that miss fall back to a default material.

use cgmath::Vector3;

/// Light response of a surface.
///
/// All colours are in `[0, 1]` per channel, `ambient_strength` is in `[0, 1]`
/// and `shininess` is never negative. The builders clamp into these ranges and
/// [`MaterialRegistry::register`] clamps materials built as struct literals.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub tag: String,
    pub ambient_strength: f32,
    pub ambient_color: Vector3<f32>,
    pub diffuse_color: Vector3<f32>,
    pub specular_color: Vector3<f32>,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            tag: "default".to_string(),
            ambient_strength: 0.3,
            ambient_color: Vector3::new(0.5, 0.5, 0.5),
            diffuse_color: Vector3::new(0.8, 0.8, 0.8),
            specular_color: Vector3::new(0.2, 0.2, 0.2),
            shininess: 16.0,
        }
    }
}

impl Material {
    /// Creates a material with neutral grey colours.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Builder pattern: Set ambient strength
    pub fn with_ambient_strength(mut self, strength: f32) -> Self {
        self.ambient_strength = strength;
        self.clamped()
    }

    /// Builder pattern: Set ambient colour
    pub fn with_ambient_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.ambient_color = Vector3::new(r, g, b);
        self.clamped()
    }

    /// Builder pattern: Set diffuse colour
    pub fn with_diffuse_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse_color = Vector3::new(r, g, b);
        self.clamped()
    }

    /// Builder pattern: Set specular colour
    pub fn with_specular_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular_color = Vector3::new(r, g, b);
        self.clamped()
    }

    /// Builder pattern: Set shininess
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self.clamped()
    }

    /// Pulls every field back into its valid range.
    pub fn clamped(mut self) -> Self {
        self.ambient_strength = self.ambient_strength.clamp(0.0, 1.0);
        self.ambient_color = clamp_color(self.ambient_color);
        self.diffuse_color = clamp_color(self.diffuse_color);
        self.specular_color = clamp_color(self.specular_color);
        self.shininess = self.shininess.max(0.0);
        self
    }
}

fn clamp_color(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|channel| channel.clamp(0.0, 1.0))
}

/// Ordered collection of materials looked up by tag.
///
/// Registering the same tag twice is allowed, but lookups always resolve to
/// the first registration.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    default_material: Material,
}

impl MaterialRegistry {
    pub fn new(default_material: Material) -> Self {
        Self {
            materials: Vec::new(),
            default_material: default_material.clamped(),
        }
    }

    /// Stores `material`, clamped into its valid ranges.
    pub fn register(&mut self, material: Material) {
        let material = material.clamped();
        if self.find_by_tag(&material.tag).is_some() {
            log::debug!(
                "material `{}` is already registered, lookups keep resolving to the first one",
                material.tag
            );
        }
        self.materials.push(material);
    }

    /// First material registered under `tag`.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    /// Material for an object, falling back to the default material when the
    /// object has no tag or the tag is unknown.
    pub fn resolve(&self, tag: Option<&str>) -> &Material {
        match tag {
            Some(tag) => self.find_by_tag(tag).unwrap_or_else(|| {
                log::warn!("unknown material `{tag}`, using the default material");
                &self.default_material
            }),
            None => &self.default_material,
        }
    }

    pub fn default_material(&self) -> &Material {
        &self.default_material
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
    }
}
