//! Camera, projection and the input snapshot that moves the camera.
//!
//! # Key types
//!
//! - [`Camera`] derives the view matrix from a position and pitch/yaw/roll
//! - [`Projection`] derives the perspective matrix; fixed at construction
//! - [`InputState`] is the set of keys held this tick, passed in explicitly

use std::collections::HashSet;

use cgmath::{Deg, Matrix4, Vector3, perspective};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    LeftShift,
}

/// Keys held down during the current tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl FromIterator<Key> for InputState {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}

/// Position plus pitch/yaw/roll in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3<f32>,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Camera {
    /// World units moved per tick for each held direction key.
    pub const VELOCITY: f32 = 0.05;

    pub fn new(position: Vector3<f32>, pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            position,
            pitch,
            yaw,
            roll,
        }
    }

    /// `rot_x(pitch) * rot_y(yaw) * rot_z(roll) * translate(-position)`
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Deg(self.pitch))
            * Matrix4::from_angle_y(Deg(self.yaw))
            * Matrix4::from_angle_z(Deg(self.roll))
            * Matrix4::from_translation(-self.position)
    }

    /// Moves along the world axes for every held key: W/S on -Z/+Z, A/D on
    /// -X/+X, Space/LeftShift on +Y/-Y.
    pub fn advance(&mut self, input: &InputState) {
        let step = Self::VELOCITY;
        let moves = [
            (Key::W, Vector3::new(0.0, 0.0, -step)),
            (Key::S, Vector3::new(0.0, 0.0, step)),
            (Key::A, Vector3::new(-step, 0.0, 0.0)),
            (Key::D, Vector3::new(step, 0.0, 0.0)),
            (Key::Space, Vector3::new(0.0, step, 0.0)),
            (Key::LeftShift, Vector3::new(0.0, -step, 0.0)),
        ];
        for (key, delta) in moves {
            if input.is_pressed(key) {
                self.position += delta;
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fovy: Deg<f32>,
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            fovy: fovy.into(),
            aspect: width as f32 / height.max(1) as f32,
            znear,
            zfar,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}
