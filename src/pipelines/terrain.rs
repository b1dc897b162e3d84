use crate::{
    backend::{Gpu, ShaderError},
    pipelines::{
        basic,
        shader::{ShaderProgram, UniformUploader},
    },
};

/// Terrain shares the entity vertex stage and tiles its texture in the
/// fragment stage.
pub const FRAGMENT_SOURCE: &str = include_str!("terrain_fragment.wgsl");

#[derive(Debug)]
pub struct TerrainShader {
    program: ShaderProgram,
}

impl TerrainShader {
    pub fn new<G: Gpu>(gpu: &mut G) -> Result<Self, ShaderError> {
        Self::from_sources(gpu, basic::VERTEX_SOURCE, FRAGMENT_SOURCE)
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

impl UniformUploader for TerrainShader {
    fn program(&mut self) -> &mut ShaderProgram {
        &mut self.program
    }
}
