//! Flat ground tiles.
//!
//! Each [`Terrain`] is a square grid of `VERTEX_COUNT` x `VERTEX_COUNT`
//! vertices spanning `SIZE` world units, placed on a grid of tiles.

use std::rc::Rc;

use cgmath::Vector3;

use crate::{
    backend::Gpu,
    data_structures::{
        entity::Transform,
        model::{MeshData, RawModel},
        texture::Texture,
    },
};

#[derive(Debug)]
pub struct Terrain {
    x: f32,
    z: f32,
    model: RawModel,
    texture: Rc<Texture>,
}

impl Terrain {
    pub const SIZE: f32 = 800.0;
    pub const VERTEX_COUNT: u32 = 128;

    pub fn new<G: Gpu>(gpu: &mut G, grid_x: i32, grid_z: i32, texture: Rc<Texture>) -> Self {
        let label = format!("terrain {} {}", grid_x, grid_z);
        let model = RawModel::upload(gpu, &label, &Self::generate_mesh());
        Self {
            x: grid_x as f32 * Self::SIZE,
            z: grid_z as f32 * Self::SIZE,
            model,
            texture,
        }
    }

    /// Flat grid with `+Y` normals and texture coordinates spanning `0..=1`.
    pub fn generate_mesh() -> MeshData {
        let count = Self::VERTEX_COUNT;
        let last = (count - 1) as f32;
        let mut vertices = Vec::with_capacity((count * count * 8) as usize);
        for i in 0..count {
            for j in 0..count {
                let u = j as f32 / last;
                let v = i as f32 / last;
                vertices.extend_from_slice(&[u * Self::SIZE, 0.0, v * Self::SIZE, u, v, 0.0, 1.0, 0.0]);
            }
        }

        let mut indices = Vec::with_capacity(((count - 1) * (count - 1) * 6) as usize);
        for grid_z in 0..count - 1 {
            for grid_x in 0..count - 1 {
                let top_left = grid_z * count + grid_x;
                let top_right = top_left + 1;
                let bottom_left = (grid_z + 1) * count + grid_x;
                let bottom_right = bottom_left + 1;
                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        MeshData {
            vertices,
            indices,
            layout: MeshData::standard_layout(),
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn model(&self) -> &RawModel {
        &self.model
    }

    pub fn texture(&self) -> &Rc<Texture> {
        &self.texture
    }

    /// Terrain is only ever translated.
    pub fn transform(&self) -> Transform {
        Transform::from(Vector3::new(self.x, 0.0, self.z))
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        self.model.release(gpu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_full_grid() {
        let mesh = Terrain::generate_mesh();
        let count = Terrain::VERTEX_COUNT as usize;
        assert_eq!(mesh.vertex_count(), count * count);
        assert_eq!(mesh.indices.len(), (count - 1) * (count - 1) * 6);
        assert_eq!(&mesh.indices[..6], &[0, 128, 1, 1, 128, 129]);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < count * count));
    }

    #[test]
    fn far_corner_spans_the_tile() {
        let mesh = Terrain::generate_mesh();
        let last = &mesh.vertices[mesh.vertices.len() - 8..];
        assert_eq!(last, &[Terrain::SIZE, 0.0, Terrain::SIZE, 1.0, 1.0, 0.0, 1.0, 0.0]);
    }
}
