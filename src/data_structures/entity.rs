//! Placed instances of textured models.

use std::{
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

use cgmath::{Deg, Matrix4, Vector3};

use crate::data_structures::model::TexturedModel;

/// Position, Euler rotation in degrees and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Transform {
    /// Identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }

    /// `translate * rot_x * rot_y * rot_z * scale`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_scale(self.scale)
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

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(0);

/// A model placed in the world. Entities are not `Clone`: every entity has
/// its own id so the renderer can tell two placements apart.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    model: Rc<TexturedModel>,
    pub transform: Transform,
}

impl Entity {
    pub fn new(
        model: Rc<TexturedModel>,
        position: Vector3<f32>,
        rotation: Vector3<f32>,
        scale: f32,
    ) -> Self {
        Self {
            id: EntityId(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed)),
            model,
            transform: Transform {
                position,
                rotation,
                scale,
            },
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn model(&self) -> &Rc<TexturedModel> {
        &self.model
    }

    pub fn increase_position(&mut self, dx: f32, dy: f32, dz: f32) {
        self.transform.position += Vector3::new(dx, dy, dz);
    }

    pub fn increase_rotation(&mut self, dx: f32, dy: f32, dz: f32) {
        self.transform.rotation += Vector3::new(dx, dy, dz);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{SquareMatrix, Vector4};

    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        assert_eq!(Transform::new().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn scale_applies_before_rotation_and_translation() {
        let transform = Transform {
            position: Vector3::new(10.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 90.0, 0.0),
            scale: 2.0,
        };
        let moved = transform.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        // (1,0,0) -> scaled (2,0,0) -> rotated about y (0,0,-2) -> translated
        assert!((moved.x - 10.0).abs() < 1e-5);
        assert!(moved.y.abs() < 1e-5);
        assert!((moved.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn same_inputs_give_identical_bits() {
        let make = || Transform {
            position: Vector3::new(1.5, -3.25, 7.0),
            rotation: Vector3::new(12.0, 45.0, -30.0),
            scale: 0.75,
        };
        let a: [[f32; 4]; 4] = make().to_matrix().into();
        let b: [[f32; 4]; 4] = make().to_matrix().into();
        let bits = |m: [[f32; 4]; 4]| m.iter().flatten().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a), bits(b));
    }
}
