//! Fixed capacity texture slot registry.
//!
//! Maps texture tags to loaded GPU textures and to the binding slot the
//! shader samples them from. The shader exposes [`MAX_TEXTURE_SLOTS`] slots,
//! so at most that many textures can be registered at a time. Lookups are a
//! linear scan over at most sixteen entries.

use crate::{
    error::{SceneError, SceneResult},
    resources::texture::{TextureHandle, TextureLoader},
};

/// Number of texture binding slots the scene shader declares.
pub const MAX_TEXTURE_SLOTS: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureEntry {
    pub tag: String,
    pub handle: TextureHandle,
}

/// Slot `i` is the `i`-th successfully registered texture. Slots are never
/// reassigned or compacted, so a failed registration leaves earlier lookups
/// untouched.
#[derive(Debug)]
pub struct TextureSlots {
    entries: Vec<TextureEntry>,
}

impl TextureSlots {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_TEXTURE_SLOTS),
        }
    }

    /// Loads `source` through `loader` and stores it under `tag`.
    ///
    /// The tag is validated and a free slot is checked for before the loader
    /// is called, so a rejected registration never creates a GPU texture.
    pub fn register(
        &mut self,
        tag: &str,
        source: &str,
        loader: &mut dyn TextureLoader,
    ) -> SceneResult<usize> {
        if tag.is_empty() {
            return Err(SceneError::EmptyTag);
        }
        if self.find_slot(tag).is_some() {
            return Err(SceneError::DuplicateTag {
                tag: tag.to_string(),
            });
        }
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(SceneError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }

        let handle = loader
            .load(tag, source)
            .map_err(|source| SceneError::TextureLoad {
                tag: tag.to_string(),
                source,
            })?;

        let slot = self.entries.len();
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            handle,
        });
        log::debug!("texture `{tag}` loaded from {source} into slot {slot}");
        Ok(slot)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tag == tag)
    }

    /// Like [`find_slot`](Self::find_slot) but reports a miss as an error.
    pub fn slot_of(&self, tag: &str) -> SceneResult<usize> {
        self.find_slot(tag).ok_or_else(|| SceneError::TextureNotFound {
            tag: tag.to_string(),
        })
    }

    pub fn handle(&self, slot: usize) -> Option<TextureHandle> {
        self.entries.get(slot).map(|entry| entry.handle)
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TextureEntry)> {
        self.entries.iter().enumerate()
    }

    /// Binds every registered texture to its slot.
    pub fn bind_all(&self, loader: &mut dyn TextureLoader) {
        for (slot, entry) in self.iter() {
            loader.bind_slot(slot, entry.handle);
        }
    }

    /// Hands every texture back to `loader` and empties the registry.
    pub fn release_all(&mut self, loader: &mut dyn TextureLoader) {
        for entry in self.entries.drain(..) {
            loader.release(entry.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_TEXTURE_SLOTS
    }
}

impl Default for TextureSlots {
    fn default() -> Self {
        Self::new()
    }
}
