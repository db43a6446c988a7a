#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashSet},
    rc::Rc,
};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};
use scene_ngin::{
    Material, MeshKind, MeshProvider, ShaderProgram,
    resources::texture::{TextureHandle, TextureLoader},
    shader::uniforms,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Mat4(Matrix4<f32>),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Float(f32),
    Int(i32),
}

pub type UniformState = BTreeMap<String, UniformValue>;

/// Shader program that behaves like GL uniforms: values persist until they
/// are overwritten. Every write is also logged in order.
#[derive(Debug, Default)]
pub struct RecordingProgram {
    pub values: UniformState,
    pub writes: Vec<String>,
}

impl RecordingProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn writes_to(&self, name: &str) -> usize {
        self.writes.iter().filter(|write| *write == name).count()
    }

    fn set(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_string(), value);
        self.writes.push(name.to_string());
    }
}

impl ShaderProgram for RecordingProgram {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.set(name, UniformValue::Mat4(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.set(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.set(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.set(name, UniformValue::Vec4(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }
}

/// Snapshot of the whole uniform state taken at every draw call.
#[derive(Debug, Default)]
pub struct RecordingMeshes {
    pub draws: Vec<(MeshKind, UniformState)>,
}

impl RecordingMeshes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshProvider<RecordingProgram> for RecordingMeshes {
    fn draw(&mut self, mesh: MeshKind, program: &RecordingProgram) {
        self.draws.push((mesh, program.values.clone()));
    }
}

#[derive(Debug, Default)]
pub struct LoaderLog {
    pub loaded: Vec<(String, String)>,
    pub bound: Vec<(usize, TextureHandle)>,
    pub released: Vec<TextureHandle>,
}

/// Hands out sequential handles. Sources listed in `failing` fail to load.
/// The log is shared so it stays readable after the loader was dropped.
#[derive(Debug, Default)]
pub struct FakeLoader {
    pub log: Rc<RefCell<LoaderLog>>,
    pub failing: HashSet<String>,
    next: u32,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(source: &str) -> Self {
        let mut loader = Self::default();
        loader.failing.insert(source.to_string());
        loader
    }

    pub fn shared_log(&self) -> Rc<RefCell<LoaderLog>> {
        Rc::clone(&self.log)
    }
}

impl TextureLoader for FakeLoader {
    fn load(&mut self, tag: &str, source: &str) -> anyhow::Result<TextureHandle> {
        if self.failing.contains(source) {
            anyhow::bail!("cannot decode {source}");
        }
        self.log
            .borrow_mut()
            .loaded
            .push((tag.to_string(), source.to_string()));
        let handle = TextureHandle(self.next);
        self.next += 1;
        Ok(handle)
    }

    fn bind_slot(&mut self, slot: usize, handle: TextureHandle) {
        self.log.borrow_mut().bound.push((slot, handle));
    }

    fn release(&mut self, handle: TextureHandle) {
        self.log.borrow_mut().released.push(handle);
    }
}

/// The five material uniforms `material` should produce.
pub fn material_uniforms(material: &Material) -> Vec<(&'static str, UniformValue)> {
    vec![
        (
            uniforms::MATERIAL_AMBIENT_STRENGTH,
            UniformValue::Float(material.ambient_strength),
        ),
        (
            uniforms::MATERIAL_AMBIENT_COLOR,
            UniformValue::Vec3(material.ambient_color),
        ),
        (
            uniforms::MATERIAL_DIFFUSE_COLOR,
            UniformValue::Vec3(material.diffuse_color),
        ),
        (
            uniforms::MATERIAL_SPECULAR_COLOR,
            UniformValue::Vec3(material.specular_color),
        ),
        (
            uniforms::MATERIAL_SHININESS,
            UniformValue::Float(material.shininess),
        ),
    ]
}

pub fn assert_material_written(state: &UniformState, material: &Material) {
    for (name, expected) in material_uniforms(material) {
        assert_eq!(state.get(name), Some(&expected), "uniform `{name}`");
    }
}

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_matrix_eq(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (actual[col][row] - expected[col][row]).abs() < 1e-5,
                "matrices differ at column {col}, row {row}:\n{actual:?}\n{expected:?}"
            );
        }
    }
}

pub fn matrices_differ(a: Matrix4<f32>, b: Matrix4<f32>) -> bool {
    let a: [[f32; 4]; 4] = a.into();
    let b: [[f32; 4]; 4] = b.into();
    a.iter()
        .flatten()
        .zip(b.iter().flatten())
        .any(|(x, y)| (x - y).abs() > 1e-4)
}
