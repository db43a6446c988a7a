//! wgpu backend for the per-object uniforms.
//!
//! wgpu has no named uniforms, so [`UniformMirror`] keeps a CPU copy of the
//! scene shader's uniform blocks and maps every named write onto it. A
//! [`DrawRecorder`] snapshots the object block on every draw call; the
//! snapshots are uploaded into one buffer and replayed with dynamic offsets,
//! which gives each draw exactly the state that was bound when it was issued.

use std::{collections::HashMap, mem, num::NonZeroU64};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::{
    pipelines::light::{LightsUniform, MAX_LIGHTS},
    shader::{MeshKind, MeshProvider, ShaderProgram, uniforms},
};

/// Per-object uniform block. Layout matches the WGSL struct:
/// - model: mat4x4<f32> at offset 0
/// - object_color: vec4<f32> at offset 64
/// - uv_scale: vec2<f32> at offset 80, use_texture and texture_slot follow
/// - ambient_color / ambient_strength at offset 96
/// - diffuse_color / shininess at offset 112
/// - specular_color at offset 128, padded to 144 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub texture_slot: u32,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub _padding: f32,
}

impl Default for ObjectUniform {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LightField {
    Position,
    Color,
    Intensity,
}

/// `lightSources[i].field` -> `(i, field)`
fn parse_light_uniform(name: &str) -> Option<(usize, LightField)> {
    let (idx, field) = name.strip_prefix("lightSources[")?.split_once("].")?;
    let idx: usize = idx.parse().ok()?;
    if idx >= MAX_LIGHTS {
        return None;
    }
    let field = match field {
        "position" => LightField::Position,
        "color" => LightField::Color,
        "intensity" => LightField::Intensity,
        _ => return None,
    };
    Some((idx, field))
}

/// CPU copy of the scene shader's uniforms.
#[derive(Debug, Default, Clone)]
pub struct UniformMirror {
    object: ObjectUniform,
    lights: LightsUniform,
}

impl UniformMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self) -> &ObjectUniform {
        &self.object
    }

    pub fn lights(&self) -> &LightsUniform {
        &self.lights
    }

    pub fn write_lights(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, bytemuck::bytes_of(&self.lights));
    }

    fn ignore(name: &str, kind: &str) {
        log::warn!("the scene shader has no {kind} uniform named `{name}`, write ignored");
    }
}

impl ShaderProgram for UniformMirror {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        match name {
            uniforms::MODEL => self.object.model = value.into(),
            _ => Self::ignore(name, "mat4"),
        }
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        match name {
            uniforms::UV_SCALE => self.object.uv_scale = value.into(),
            _ => Self::ignore(name, "vec2"),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        match name {
            uniforms::MATERIAL_AMBIENT_COLOR => self.object.ambient_color = value.into(),
            uniforms::MATERIAL_DIFFUSE_COLOR => self.object.diffuse_color = value.into(),
            uniforms::MATERIAL_SPECULAR_COLOR => self.object.specular_color = value.into(),
            _ => match parse_light_uniform(name) {
                Some((idx, LightField::Position)) => self.lights.lights[idx].position = value.into(),
                Some((idx, LightField::Color)) => self.lights.lights[idx].color = value.into(),
                _ => Self::ignore(name, "vec3"),
            },
        }
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        match name {
            uniforms::OBJECT_COLOR => self.object.object_color = value.into(),
            _ => Self::ignore(name, "vec4"),
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        match name {
            uniforms::MATERIAL_AMBIENT_STRENGTH => self.object.ambient_strength = value,
            uniforms::MATERIAL_SHININESS => self.object.shininess = value,
            _ => match parse_light_uniform(name) {
                Some((idx, LightField::Intensity)) => self.lights.lights[idx].intensity = value,
                _ => Self::ignore(name, "float"),
            },
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        let Ok(unsigned) = u32::try_from(value) else {
            log::warn!("negative value {value} for `{name}`, write ignored");
            return;
        };
        match name {
            uniforms::USE_TEXTURE => self.object.use_texture = unsigned,
            uniforms::OBJECT_TEXTURE => self.object.texture_slot = unsigned,
            uniforms::USE_LIGHTING => self.lights.use_lighting = unsigned,
            uniforms::LIGHT_COUNT => self.lights.count = unsigned,
            _ => Self::ignore(name, "int"),
        }
    }
}

/// Uploaded geometry of one basic shape.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

pub type MeshBuffers = HashMap<MeshKind, GpuMesh>;

/// Size of one object uniform rounded up to the device's dynamic offset
/// alignment.
pub fn aligned_stride(min_uniform_buffer_offset_alignment: u32) -> u64 {
    let size = mem::size_of::<ObjectUniform>() as u64;
    let align = u64::from(min_uniform_buffer_offset_alignment.max(1));
    size.div_ceil(align) * align
}

pub fn object_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: NonZeroU64::new(mem::size_of::<ObjectUniform>() as u64),
            },
            count: None,
        }],
        label: Some("object_bind_group_layout"),
    })
}

/// Records draw calls against a [`UniformMirror`] and replays them into a
/// render pass.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    draws: Vec<(MeshKind, ObjectUniform)>,
    buffer: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    stride: u64,
    // Draws recorded since the last upload; the buffer still holds older snapshots.
    pending: bool,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws recorded since the last [`clear`](Self::clear), in issue order.
    pub fn draws(&self) -> &[(MeshKind, ObjectUniform)] {
        &self.draws
    }

    pub fn clear(&mut self) {
        self.draws.clear();
        self.pending = false;
    }

    /// Whether draws were recorded after the last [`upload`](Self::upload).
    pub fn needs_upload(&self) -> bool {
        self.pending
    }

    /// Writes every recorded snapshot into the object uniform buffer, growing
    /// it when the frame has more draws than the buffer has room for.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, layout: &wgpu::BindGroupLayout) {
        self.pending = false;
        if self.draws.is_empty() {
            return;
        }
        self.stride = aligned_stride(device.limits().min_uniform_buffer_offset_alignment);
        let required = self.stride * self.draws.len() as u64;

        let too_small = self
            .buffer
            .as_ref()
            .is_none_or(|buffer| buffer.size() < required);
        if too_small {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Object Uniform Buffer"),
                size: required,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: NonZeroU64::new(mem::size_of::<ObjectUniform>() as u64),
                    }),
                }],
                label: Some("object_bind_group"),
            }));
            self.buffer = Some(buffer);
        }

        let mut staging = vec![0u8; required as usize];
        for (idx, (_, uniform)) in self.draws.iter().enumerate() {
            let offset = idx * self.stride as usize;
            let bytes = bytemuck::bytes_of(uniform);
            staging[offset..offset + bytes.len()].copy_from_slice(bytes);
        }
        if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, &staging);
        }
    }

    /// Replays the uploaded draws. The object bind group is set at
    /// `group_index` with each draw's dynamic offset.
    pub fn encode(&self, render_pass: &mut wgpu::RenderPass<'_>, group_index: u32, meshes: &MeshBuffers) {
        let Some(bind_group) = &self.bind_group else {
            if !self.draws.is_empty() {
                log::warn!("{} draws were recorded but never uploaded", self.draws.len());
            }
            return;
        };
        if self.pending {
            log::warn!(
                "{} draws were recorded after the last upload, frame not encoded",
                self.draws.len()
            );
            return;
        }
        for (idx, (mesh, _)) in self.draws.iter().enumerate() {
            let Some(gpu_mesh) = meshes.get(mesh) else {
                log::warn!("no geometry uploaded for {mesh:?}, draw skipped");
                continue;
            };
            let offset = (idx as u64 * self.stride) as u32;
            render_pass.set_bind_group(group_index, bind_group, &[offset]);
            render_pass.set_vertex_buffer(0, gpu_mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(gpu_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..gpu_mesh.num_elements, 0, 0..1);
        }
    }
}

impl MeshProvider<UniformMirror> for DrawRecorder {
    fn draw(&mut self, mesh: MeshKind, program: &UniformMirror) {
        self.draws.push((mesh, *program.object()));
        self.pending = true;
    }
}
