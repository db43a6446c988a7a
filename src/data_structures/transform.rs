//! Model transform composition.
//!
//! Every object carries its own scale, per-axis rotation in degrees and
//! position. These are composed into one model matrix per draw call.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees about X, Y and Z) and position of one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Identity transformation (no move, rotate or scale).
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation_degrees = Vector3::new(x, y, z);
        self
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    /// Builds the model matrix.
    ///
    /// Scale is applied first, then the rotation about X, then Y, then Z, and
    /// translation last: `T * Rz * Ry * Rx * S`. The three rotations stay
    /// separate elemental rotations; changing this order changes the picture.
    pub fn compose(&self) -> Matrix4<f32> {
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        let rotation_x = Matrix4::from_angle_x(Deg(self.rotation_degrees.x));
        let rotation_y = Matrix4::from_angle_y(Deg(self.rotation_degrees.y));
        let rotation_z = Matrix4::from_angle_z(Deg(self.rotation_degrees.z));
        let translation = Matrix4::from_translation(self.position);

        translation * rotation_z * rotation_y * rotation_x * scale
    }

    /// Column-major matrix as it is stored in GPU uniforms.
    pub fn to_raw(&self) -> [[f32; 4]; 4] {
        self.compose().into()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}
