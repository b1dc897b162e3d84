//! A [`Gpu`] that only writes down what it was asked to do.
//!
//! Handles are handed out sequentially and every call is appended to a
//! command log, so renderer behaviour (bind counts, draw order, uniform
//! traffic) can be asserted without a device.

use std::collections::{HashMap, HashSet};

use crate::{
    backend::{
        BufferHandle, Gpu, ProgramHandle, ShaderError, ShaderStage, TextureHandle, TextureImage,
        UniformLocation, UniformValue, VertexArrayHandle, WrapMode,
    },
    data_structures::buffer::VertexBufferLayout,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    CreateVertexBuffer { buffer: BufferHandle, bytes: usize },
    CreateIndexBuffer { buffer: BufferHandle, count: usize },
    DeleteBuffer(BufferHandle),
    CreateVertexArray {
        vertex_array: VertexArrayHandle,
        buffer: BufferHandle,
        stride: u32,
        attributes: usize,
    },
    DeleteVertexArray(VertexArrayHandle),
    BindVertexArray(Option<VertexArrayHandle>),
    BindIndexBuffer(Option<BufferHandle>),
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UseProgram(Option<ProgramHandle>),
    UniformLookup { program: ProgramHandle, name: String },
    SetUniform {
        program: ProgramHandle,
        name: String,
        value: UniformValue,
    },
    CreateTexture(TextureHandle),
    UploadTexture {
        texture: TextureHandle,
        width: u32,
        height: u32,
        levels: usize,
        wrap: WrapMode,
    },
    DeleteTexture(TextureHandle),
    BindTexture { unit: u32, texture: Option<TextureHandle> },
    SetCulling(bool),
    Clear([f32; 4]),
    DrawIndexed {
        count: u32,
        vertex_array: Option<VertexArrayHandle>,
        index_buffer: Option<BufferHandle>,
        program: Option<ProgramHandle>,
        texture: Option<TextureHandle>,
    },
}

#[derive(Debug, Default)]
struct Bound {
    vertex_array: Option<VertexArrayHandle>,
    index_buffer: Option<BufferHandle>,
    program: Option<ProgramHandle>,
    texture: Option<TextureHandle>,
}

#[derive(Debug, Default)]
pub struct RecordingGpu {
    commands: Vec<GpuCommand>,
    next_id: u32,
    known_uniforms: Option<HashSet<String>>,
    failing_sources: Vec<String>,
    program_uniforms: HashMap<ProgramHandle, Vec<String>>,
    live_vertex_arrays: HashSet<VertexArrayHandle>,
    bound: Bound,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts which uniform names resolve to a location. By default every
    /// name does.
    pub fn with_uniforms(mut self, names: &[&str]) -> Self {
        self.known_uniforms = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Any program whose vertex or fragment source contains `marker` fails to
    /// compile in the matching stage.
    pub fn fail_compile_on(mut self, marker: &str) -> Self {
        self.failing_sources.push(marker.to_string());
        self
    }

    pub fn commands(&self) -> &[GpuCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<GpuCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count(&self, predicate: impl Fn(&GpuCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    pub fn draws(&self) -> Vec<&GpuCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, GpuCommand::DrawIndexed { .. }))
            .collect()
    }

    pub fn lookups(&self, name: &str) -> usize {
        self.count(|c| matches!(c, GpuCommand::UniformLookup { name: n, .. } if n == name))
    }

    pub fn uniform_writes(&self, name: &str) -> Vec<UniformValue> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                GpuCommand::SetUniform { name: n, value, .. } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// True while the vertex array exists and has not been deleted.
    pub fn is_live(&self, vertex_array: VertexArrayHandle) -> bool {
        self.live_vertex_arrays.contains(&vertex_array)
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn push(&mut self, command: GpuCommand) {
        log::trace!("{:?}", command);
        self.commands.push(command);
    }

    fn check_compiles(&self, stage: ShaderStage, source: &str) -> Result<(), ShaderError> {
        match self.failing_sources.iter().find(|m| source.contains(m.as_str())) {
            Some(marker) => Err(ShaderError::Compile {
                stage,
                log: format!("unexpected token `{}`", marker),
            }),
            None => Ok(()),
        }
    }
}

impl Gpu for RecordingGpu {
    fn create_vertex_buffer(&mut self, _label: &str, data: &[u8]) -> BufferHandle {
        let buffer = BufferHandle(self.next());
        self.push(GpuCommand::CreateVertexBuffer {
            buffer,
            bytes: data.len(),
        });
        buffer
    }

    fn create_index_buffer(&mut self, _label: &str, indices: &[u32]) -> BufferHandle {
        let buffer = BufferHandle(self.next());
        self.push(GpuCommand::CreateIndexBuffer {
            buffer,
            count: indices.len(),
        });
        buffer
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.push(GpuCommand::DeleteBuffer(buffer));
    }

    fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        layout: &VertexBufferLayout,
    ) -> VertexArrayHandle {
        let vertex_array = VertexArrayHandle(self.next());
        self.live_vertex_arrays.insert(vertex_array);
        self.push(GpuCommand::CreateVertexArray {
            vertex_array,
            buffer,
            stride: layout.stride(),
            attributes: layout.attributes().len(),
        });
        vertex_array
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.live_vertex_arrays.remove(&vertex_array);
        self.push(GpuCommand::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        self.bound.vertex_array = vertex_array;
        self.push(GpuCommand::BindVertexArray(vertex_array));
    }

    fn bind_index_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.bound.index_buffer = buffer;
        self.push(GpuCommand::BindIndexBuffer(buffer));
    }

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError> {
        self.check_compiles(ShaderStage::Vertex, vertex_source)?;
        self.check_compiles(ShaderStage::Fragment, fragment_source)?;
        let program = ProgramHandle(self.next());
        self.program_uniforms.insert(program, Vec::new());
        self.push(GpuCommand::CreateProgram(program));
        Ok(program)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.program_uniforms.remove(&program);
        self.push(GpuCommand::DeleteProgram(program));
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.bound.program = program;
        self.push(GpuCommand::UseProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        self.push(GpuCommand::UniformLookup {
            program,
            name: name.to_string(),
        });
        let known = self
            .known_uniforms
            .as_ref()
            .is_none_or(|names| names.contains(name));
        if !known {
            return None;
        }
        let names = self.program_uniforms.get_mut(&program)?;
        let slot = match names.iter().position(|n| n == name) {
            Some(slot) => slot,
            None => {
                names.push(name.to_string());
                names.len() - 1
            }
        };
        Some(UniformLocation {
            program,
            slot: slot as u32,
        })
    }

    fn set_uniform(&mut self, location: &UniformLocation, value: UniformValue) {
        let name = self
            .program_uniforms
            .get(&location.program)
            .and_then(|names| names.get(location.slot as usize))
            .cloned()
            .unwrap_or_default();
        self.push(GpuCommand::SetUniform {
            program: location.program,
            name,
            value,
        });
    }

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle {
        let texture = TextureHandle(self.next());
        self.push(GpuCommand::CreateTexture(texture));
        self.upload_texture(texture, image);
        texture
    }

    fn upload_texture(&mut self, texture: TextureHandle, image: &TextureImage) {
        self.push(GpuCommand::UploadTexture {
            texture,
            width: image.width,
            height: image.height,
            levels: image.levels.len(),
            wrap: image.wrap,
        });
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.push(GpuCommand::DeleteTexture(texture));
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureHandle>) {
        self.bound.texture = texture;
        self.push(GpuCommand::BindTexture { unit, texture });
    }

    fn set_culling(&mut self, enabled: bool) {
        self.push(GpuCommand::SetCulling(enabled));
    }

    fn clear(&mut self, colour: [f32; 4]) {
        self.push(GpuCommand::Clear(colour));
    }

    fn draw_indexed(&mut self, count: u32) {
        let command = GpuCommand::DrawIndexed {
            count,
            vertex_array: self.bound.vertex_array,
            index_buffer: self.bound.index_buffer,
            program: self.bound.program,
            texture: self.bound.texture,
        };
        self.push(command);
    }
}
