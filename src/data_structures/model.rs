//! Models: uploaded geometry and geometry paired with a surface.

use std::{
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

use crate::{
    backend::Gpu,
    data_structures::{
        buffer::{GeometryBuffer, IndexBuffer, VertexArray, VertexBufferLayout},
        texture::Texture,
    },
};

/// CPU-side mesh: interleaved vertex floats plus triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub layout: VertexBufferLayout,
}

impl MeshData {
    /// position (3) - texture coordinate (2) - normal (3)
    pub fn standard_layout() -> VertexBufferLayout {
        let mut layout = VertexBufferLayout::new();
        layout.push_float(3).push_float(2).push_float(3);
        layout
    }

    pub fn vertex_count(&self) -> usize {
        self.layout
            .floats_per_vertex()
            .filter(|n| *n > 0)
            .map_or(0, |n| self.vertices.len() / n)
    }
}

/// Read-only GPU geometry: one vertex array and the indices that draw it.
#[derive(Debug)]
pub struct RawModel {
    vertex_array: VertexArray,
    index_buffer: IndexBuffer,
}

impl RawModel {
    pub fn upload<G: Gpu>(gpu: &mut G, label: &str, mesh: &MeshData) -> Self {
        let geometry = GeometryBuffer::new(gpu, label, &mesh.vertices, mesh.layout.clone());
        let vertex_array = VertexArray::new(gpu, geometry);
        let index_buffer = IndexBuffer::new(gpu, label, &mesh.indices);
        Self {
            vertex_array,
            index_buffer,
        }
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn index_buffer(&self) -> &IndexBuffer {
        &self.index_buffer
    }

    pub fn bind<G: Gpu>(&self, gpu: &mut G) {
        self.vertex_array.bind(gpu);
        self.index_buffer.bind(gpu);
    }

    pub fn unbind<G: Gpu>(&self, gpu: &mut G) {
        self.vertex_array.unbind(gpu);
        self.index_buffer.unbind(gpu);
    }

    /// Draws every index with whatever is bound. Geometry without faces
    /// issues no draw at all.
    pub fn draw<G: Gpu>(&self, gpu: &mut G) {
        let count = self.index_buffer.count();
        if count == 0 {
            log::trace!("skipping draw of {:?}: no indices", self.vertex_array.handle());
            return;
        }
        gpu.draw_indexed(count);
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        self.vertex_array.release(gpu);
        self.index_buffer.release(gpu);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

static NEXT_MODEL_ID: AtomicU32 = AtomicU32::new(0);

/// Geometry plus a shared texture and the shine parameters used to light it.
///
/// Entities reference a textured model through an `Rc`; the renderer groups
/// entities by [`ModelId`].
#[derive(Debug)]
pub struct TexturedModel {
    id: ModelId,
    raw: RawModel,
    texture: Rc<Texture>,
    pub shine_damper: f32,
    pub reflectivity: f32,
}

impl TexturedModel {
    pub fn new(raw: RawModel, texture: Rc<Texture>) -> Self {
        Self {
            id: ModelId(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed)),
            raw,
            shine_damper: texture.shine_damper,
            reflectivity: texture.reflectivity,
            texture,
        }
    }

    pub fn with_shine(mut self, shine_damper: f32, reflectivity: f32) -> Self {
        self.shine_damper = shine_damper;
        self.reflectivity = reflectivity;
        self
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn raw(&self) -> &RawModel {
        &self.raw
    }

    pub fn texture(&self) -> &Rc<Texture> {
        &self.texture
    }

    /// Frees the geometry. The texture may be shared and is left alone.
    pub fn release<G: Gpu>(self, gpu: &mut G) {
        self.raw.release(gpu);
    }
}
