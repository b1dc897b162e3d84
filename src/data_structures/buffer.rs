//! GPU buffer wrappers: vertex layouts, vertex/index buffers and vertex arrays.
//!
//! These types own a backend handle each and are the only place in the crate
//! that talks to the [`Gpu`] about raw geometry storage.
//!
//! # Key types
//!
//! - [`VertexBufferLayout`] describes how interleaved vertex data is laid out
//! - [`GeometryBuffer`] owns uploaded vertex data together with its layout
//! - [`IndexBuffer`] owns uploaded `u32` indices and their count
//! - [`VertexArray`] binds a geometry buffer to its layout for drawing

use crate::backend::{BufferHandle, Gpu, VertexArrayHandle};

/// Component type of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Float,
    UnsignedInt,
    UnsignedByte,
}

impl AttributeKind {
    pub fn size_in_bytes(&self) -> u32 {
        match self {
            AttributeKind::Float => 4,
            AttributeKind::UnsignedInt => 4,
            AttributeKind::UnsignedByte => 1,
        }
    }
}

/// One interleaved attribute: `count` components of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    pub kind: AttributeKind,
    pub count: u32,
    pub normalized: bool,
}

/// Ordered attribute list of an interleaved vertex buffer.
///
/// The attribute slot used at draw time is the position in push order, and
/// the stride is always the sum of `count * size` over every pushed attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_float(&mut self, count: u32) -> &mut Self {
        self.push(AttributeKind::Float, count, false)
    }

    pub fn push_int(&mut self, count: u32) -> &mut Self {
        self.push(AttributeKind::UnsignedInt, count, false)
    }

    /// Bytes are always read back as normalized `0..=1` floats.
    pub fn push_byte(&mut self, count: u32) -> &mut Self {
        self.push(AttributeKind::UnsignedByte, count, true)
    }

    fn push(&mut self, kind: AttributeKind, count: u32, normalized: bool) -> &mut Self {
        self.attributes.push(VertexAttribute {
            kind,
            count,
            normalized,
        });
        self.stride += count * kind.size_in_bytes();
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Yields `(slot, byte offset, attribute)` in binding order.
    pub fn offsets(&self) -> impl Iterator<Item = (u32, u32, &VertexAttribute)> {
        self.attributes
            .iter()
            .enumerate()
            .scan(0u32, |offset, (slot, attribute)| {
                let current = *offset;
                *offset += attribute.count * attribute.kind.size_in_bytes();
                Some((slot as u32, current, attribute))
            })
    }

    /// Number of `f32` components per vertex when every attribute is a float.
    pub fn floats_per_vertex(&self) -> Option<usize> {
        self.attributes
            .iter()
            .all(|a| a.kind == AttributeKind::Float)
            .then(|| self.attributes.iter().map(|a| a.count as usize).sum())
    }
}

/// Uploaded vertex data plus the layout describing it.
#[derive(Debug)]
pub struct GeometryBuffer {
    handle: BufferHandle,
    layout: VertexBufferLayout,
    len_bytes: usize,
}

impl GeometryBuffer {
    pub fn new<G: Gpu, T: bytemuck::Pod>(
        gpu: &mut G,
        label: &str,
        data: &[T],
        layout: VertexBufferLayout,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let handle = gpu.create_vertex_buffer(&format!("{:?} Vertex Buffer", label), bytes);
        Self {
            handle,
            layout,
            len_bytes: bytes.len(),
        }
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn layout(&self) -> &VertexBufferLayout {
        &self.layout
    }

    pub fn vertex_count(&self) -> usize {
        match self.layout.stride() {
            0 => 0,
            stride => self.len_bytes / stride as usize,
        }
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_buffer(self.handle);
    }
}

/// Uploaded triangle indices and the number of elements to draw.
#[derive(Debug)]
pub struct IndexBuffer {
    handle: BufferHandle,
    count: u32,
}

impl IndexBuffer {
    pub fn new<G: Gpu>(gpu: &mut G, label: &str, indices: &[u32]) -> Self {
        let handle = gpu.create_index_buffer(&format!("{:?} Index Buffer", label), indices);
        Self {
            handle,
            count: indices.len() as u32,
        }
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind<G: Gpu>(&self, gpu: &mut G) {
        gpu.bind_index_buffer(Some(self.handle));
    }

    pub fn unbind<G: Gpu>(&self, gpu: &mut G) {
        gpu.bind_index_buffer(None);
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_buffer(self.handle);
    }
}

/// A geometry buffer bound to its layout, ready to be drawn.
#[derive(Debug)]
pub struct VertexArray {
    handle: VertexArrayHandle,
    geometry: GeometryBuffer,
}

impl VertexArray {
    pub fn new<G: Gpu>(gpu: &mut G, geometry: GeometryBuffer) -> Self {
        let handle = gpu.create_vertex_array(geometry.handle(), geometry.layout());
        Self { handle, geometry }
    }

    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    pub fn bind<G: Gpu>(&self, gpu: &mut G) {
        gpu.bind_vertex_array(Some(self.handle));
    }

    pub fn unbind<G: Gpu>(&self, gpu: &mut G) {
        gpu.bind_vertex_array(None);
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_vertex_array(self.handle);
        self.geometry.release(gpu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_sum_of_attribute_sizes() {
        let mut layout = VertexBufferLayout::new();
        layout.push_float(3).push_float(2).push_float(3);
        assert_eq!(layout.stride(), 32);
        assert_eq!(layout.floats_per_vertex(), Some(8));

        layout.push_byte(4).push_int(1);
        assert_eq!(layout.stride(), 32 + 4 + 4);
        assert_eq!(layout.floats_per_vertex(), None);
    }

    #[test]
    fn offsets_follow_push_order() {
        let mut layout = VertexBufferLayout::new();
        layout.push_float(3).push_byte(4).push_float(2);
        let offsets: Vec<(u32, u32)> = layout.offsets().map(|(s, o, _)| (s, o)).collect();
        assert_eq!(offsets, vec![(0, 0), (1, 12), (2, 16)]);
        assert!(layout.attributes()[1].normalized);
        assert!(!layout.attributes()[0].normalized);
    }
}
