//! Error taxonomy for scene preparation and rendering.
//!
//! None of these errors abort a scene. Preparation collects them into a
//! [`PrepareReport`](crate::scene::PrepareReport) and keeps loading, rendering
//! collects them per object into a [`RenderReport`](crate::render::RenderReport).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("texture tags must not be empty")]
    EmptyTag,
    #[error("texture tag `{tag}` is already registered")]
    DuplicateTag { tag: String },
    #[error("cannot register texture `{tag}`: all {capacity} texture slots are occupied")]
    CapacityExceeded { tag: String, capacity: usize },
    #[error("failed to load texture `{tag}`")]
    TextureLoad {
        tag: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("no texture registered under `{tag}`")]
    TextureNotFound { tag: String },
    #[error("object references unknown texture `{tag}` and was skipped")]
    UnresolvedTexture { tag: String },
}

impl SceneError {
    /// The tag the failure is about, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            SceneError::EmptyTag => None,
            SceneError::DuplicateTag { tag }
            | SceneError::CapacityExceeded { tag, .. }
            | SceneError::TextureLoad { tag, .. }
            | SceneError::TextureNotFound { tag }
            | SceneError::UnresolvedTexture { tag } => Some(tag),
        }
    }
}

pub type SceneResult<T> = Result<T, SceneError>;
