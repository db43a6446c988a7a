use std::path::{Path, PathBuf};

use crate::data_structures::{
    texture::{Texture, create_default_sampler},
    texture_slots::MAX_TEXTURE_SLOTS,
};

/// Opaque identifier of a texture owned by a [`TextureLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Turns an image source into a GPU texture and binds it to shader slots.
///
/// Loading may be asynchronous inside the implementation, but `load` only
/// returns once the texture is ready or loading failed.
pub trait TextureLoader {
    fn load(&mut self, tag: &str, source: &str) -> anyhow::Result<TextureHandle>;

    /// Makes `handle` the texture sampled from binding slot `slot`.
    fn bind_slot(&mut self, slot: usize, handle: TextureHandle);

    /// Frees the GPU texture behind `handle`.
    fn release(&mut self, handle: TextureHandle);
}

pub async fn load_binary(assets_dir: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = assets_dir.join(file_name);
    let data = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;

    Ok(data)
}

/// Puts `value` into the first empty entry of `table`, appending only when
/// every entry is taken. Returns the index it was stored at.
pub fn store_in_free_entry<T>(table: &mut Vec<Option<T>>, value: T) -> usize {
    match table.iter().position(Option::is_none) {
        Some(idx) => {
            table[idx] = Some(value);
            idx
        }
        None => {
            table.push(Some(value));
            table.len() - 1
        }
    }
}

/// Layout of the texture slot bind group: one 2D texture per slot at
/// bindings `0..MAX_TEXTURE_SLOTS` followed by the shared sampler.
pub fn texture_slots_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let mut entries: Vec<wgpu::BindGroupLayoutEntry> = (0..MAX_TEXTURE_SLOTS as u32)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();
    entries.push(wgpu::BindGroupLayoutEntry {
        binding: MAX_TEXTURE_SLOTS as u32,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &entries,
        label: Some("texture_slots_layout"),
    })
}

/// [`TextureLoader`] that decodes image files from an assets directory and
/// uploads them with wgpu.
pub struct WgpuTextureLoader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    assets_dir: PathBuf,
    textures: Vec<Option<Texture>>,
    slots: [Option<TextureHandle>; MAX_TEXTURE_SLOTS],
    blank: Texture,
    sampler: wgpu::Sampler,
}

impl WgpuTextureLoader {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, assets_dir: impl Into<PathBuf>) -> Self {
        let blank = Texture::create_solid(1, 1, [255, 255, 255, 255], "blank texture slot", device, queue);
        let sampler = create_default_sampler(device);
        Self {
            device: device.clone(),
            queue: queue.clone(),
            assets_dir: assets_dir.into(),
            textures: Vec::new(),
            slots: [None; MAX_TEXTURE_SLOTS],
            blank,
            sampler,
        }
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures
            .get(handle.0 as usize)
            .and_then(|texture| texture.as_ref())
    }

    /// Bind group matching [`texture_slots_layout`]. Slots nothing is bound
    /// to sample a white texel.
    pub fn bind_group(&self, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        let views: Vec<&wgpu::TextureView> = self
            .slots
            .iter()
            .map(|slot| {
                slot.and_then(|handle| self.texture(handle))
                    .map_or(&self.blank.view, |texture| &texture.view)
            })
            .collect();

        let mut entries: Vec<wgpu::BindGroupEntry> = views
            .into_iter()
            .enumerate()
            .map(|(binding, view)| wgpu::BindGroupEntry {
                binding: binding as u32,
                resource: wgpu::BindingResource::TextureView(view),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: MAX_TEXTURE_SLOTS as u32,
            resource: wgpu::BindingResource::Sampler(&self.sampler),
        });

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &entries,
            label: Some("texture_slots_bind_group"),
        })
    }
}

impl TextureLoader for WgpuTextureLoader {
    fn load(&mut self, tag: &str, source: &str) -> anyhow::Result<TextureHandle> {
        let data = futures::executor::block_on(load_binary(&self.assets_dir, source))?;
        let format = Path::new(source).extension().and_then(|ext| ext.to_str());
        let texture = Texture::from_bytes(&self.device, &self.queue, &data, tag, format)?;

        let idx = store_in_free_entry(&mut self.textures, texture);
        Ok(TextureHandle(idx as u32))
    }

    fn bind_slot(&mut self, slot: usize, handle: TextureHandle) {
        match self.slots.get_mut(slot) {
            Some(bound) => *bound = Some(handle),
            None => log::warn!("texture slot {slot} does not exist, {handle:?} stays unbound"),
        }
    }

    fn release(&mut self, handle: TextureHandle) {
        if let Some(texture) = self
            .textures
            .get_mut(handle.0 as usize)
            .and_then(|texture| texture.take())
        {
            texture.texture.destroy();
        }
        self.slots
            .iter_mut()
            .filter(|bound| **bound == Some(handle))
            .for_each(|bound| *bound = None);
    }
}
