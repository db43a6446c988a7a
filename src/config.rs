use std::path::PathBuf;

use crate::data_structures::material::Material;

/// Environment variable that overrides [`SceneConfig::assets_dir`].
pub const ASSETS_ENV: &str = "SCENE_NGIN_ASSETS";

/// Settings a [`SceneManager`](crate::scene::SceneManager) is created with.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Directory texture sources are resolved against.
    pub assets_dir: PathBuf,
    /// Material used for objects without a material tag or with an unknown one.
    pub default_material: Material,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("./assets"),
            default_material: Material::default(),
        }
    }
}

impl SceneConfig {
    /// Defaults, with the assets directory taken from `SCENE_NGIN_ASSETS`
    /// when it is set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(ASSETS_ENV).filter(|dir| !dir.is_empty()) {
            config.assets_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_default_material(mut self, material: Material) -> Self {
        self.default_material = material;
        self
    }
}
