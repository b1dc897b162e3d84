use crate::{
    backend::{Gpu, ShaderError},
    pipelines::shader::{ShaderProgram, UniformUploader},
};

pub const VERTEX_SOURCE: &str = include_str!("static_vertex.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("static_fragment.wgsl");

/// The lit, textured program entities are drawn with.
#[derive(Debug)]
pub struct StaticShader {
    program: ShaderProgram,
}

impl StaticShader {
    pub fn new<G: Gpu>(gpu: &mut G) -> Result<Self, ShaderError> {
        Self::from_sources(gpu, VERTEX_SOURCE, FRAGMENT_SOURCE)
    }

    pub fn from_sources<G: Gpu>(
        gpu: &mut G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        Ok(Self {
            program: ShaderProgram::new(gpu, vertex_source, fragment_source)?,
        })
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        self.program.release(gpu);
    }
}

impl UniformUploader for StaticShader {
    fn program(&mut self) -> &mut ShaderProgram {
        &mut self.program
    }
}
