//! The GPU seam.
//!
//! Everything above this module speaks to the graphics device through the
//! [`Gpu`] trait, a small immediate-mode interface in the style of classic
//! bind-then-draw APIs: resources are referred to by opaque handles, state
//! (bound vertex array, index buffer, program, texture) is set explicitly and
//! stays set until changed.
//!
//! # Implementations
//!
//! - [`recording::RecordingGpu`] records every call and is used by the tests
//! - [`wgpu_backend::WgpuBackend`] drives a real device through wgpu
//!
//! Shader programs are WGSL. The loose uniforms of a program live in one
//! `var<uniform>` struct at `@group(0) @binding(0)`; its member names are the
//! uniform names looked up through [`Gpu::uniform_location`].

use thiserror::Error;

use crate::data_structures::buffer::VertexBufferLayout;

pub mod recording;
pub mod reflect;
pub mod wgpu_backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// A resolved uniform of one program. Only valid while that program is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation {
    pub program: ProgramHandle,
    pub slot: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    /// Raw bytes as laid out in a uniform block.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            UniformValue::Int(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Float(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec3(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Vec4(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Mat4(v) => bytemuck::bytes_of(v).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage:?} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link:\n{log}")]
    Link { log: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
}

/// RGBA8 pixel data ready for upload, top row first.
///
/// `levels[0]` is the full image; any further entries are successive
/// mip levels, each half the size of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub levels: Vec<Vec<u8>>,
    pub wrap: WrapMode,
}

impl TextureImage {
    /// The 1x1 stand-in shown until a texture's real image arrives.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            levels: vec![vec![0, 0, 255, 255]],
            wrap: WrapMode::ClampToEdge,
        }
    }

    pub fn has_mipmaps(&self) -> bool {
        self.levels.len() > 1
    }
}

/// Immediate-mode GPU interface used by every renderer type in the crate.
pub trait Gpu {
    fn create_vertex_buffer(&mut self, label: &str, data: &[u8]) -> BufferHandle;
    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> BufferHandle;
    fn delete_buffer(&mut self, buffer: BufferHandle);

    fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        layout: &VertexBufferLayout,
    ) -> VertexArrayHandle;
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);
    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>);
    fn bind_index_buffer(&mut self, buffer: Option<BufferHandle>);

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError>;
    fn delete_program(&mut self, program: ProgramHandle);
    fn use_program(&mut self, program: Option<ProgramHandle>);
    /// `None` when the program has no active uniform with that name.
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;
    fn set_uniform(&mut self, location: &UniformLocation, value: UniformValue);

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle;
    fn upload_texture(&mut self, texture: TextureHandle, image: &TextureImage);
    fn delete_texture(&mut self, texture: TextureHandle);
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>);

    fn set_culling(&mut self, enabled: bool);
    /// Clears colour and depth of the current frame.
    fn clear(&mut self, colour: [f32; 4]);
    /// Draws `count` indices as a triangle list with the currently bound state.
    fn draw_indexed(&mut self, count: u32);
}
