use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::object::SceneLight,
    shader::{ShaderProgram, uniforms},
};

/// Number of light sources the scene shader declares.
pub const MAX_LIGHTS: usize = 4;

/// Writes the scene-wide light uniforms. Runs once per scene preparation,
/// never per object.
///
/// Without lights the shader is switched to ambient/material-only shading.
/// Slots past the supplied lights are zeroed so lights from an earlier
/// preparation cannot linger. Returns how many lights were uploaded.
pub fn apply_lighting<P: ShaderProgram + ?Sized>(program: &mut P, lights: &[SceneLight]) -> usize {
    if lights.len() > MAX_LIGHTS {
        log::warn!(
            "{} lights supplied but the shader only has {MAX_LIGHTS} light sources, ignoring the rest",
            lights.len()
        );
    }
    let count = lights.len().min(MAX_LIGHTS);

    program.set_int(uniforms::USE_LIGHTING, (count > 0) as i32);
    program.set_int(uniforms::LIGHT_COUNT, count as i32);

    for idx in 0..MAX_LIGHTS {
        let (position, color, intensity) = match lights.get(idx) {
            Some(light) => (light.position, light.color, light.intensity.max(0.0)),
            None => (Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 0.0),
        };
        program.set_vec3(&uniforms::light_position(idx), position);
        program.set_vec3(&uniforms::light_color(idx), color);
        program.set_float(&uniforms::light_intensity(idx), intensity);
    }

    log::debug!("lighting applied with {count} light(s)");
    count
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightRaw {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    pub _padding: f32,
}

/// GPU side copy of every light uniform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightRaw; MAX_LIGHTS],
    pub count: u32,
    pub use_lighting: u32,
    pub _padding: [u32; 2],
}

pub fn mk_buffer(device: &wgpu::Device, lights: &LightsUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::bytes_of(lights),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
