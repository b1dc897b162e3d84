//! Per-frame flow.
//!
//! A frame has two phases. While accumulating, entities and terrain tiles
//! are handed to [`MasterRenderer::process_entity`] and
//! [`MasterRenderer::process_terrain`]. [`MasterRenderer::render`] then
//! clears the target, uploads camera and light to each program, draws
//! everything that was queued and forgets it again, ready for the next
//! frame.

use std::rc::Rc;

use cgmath::Matrix4;

use crate::{
    backend::{Gpu, ShaderError},
    camera::{Camera, Projection},
    data_structures::{entity::Entity, light::Light, terrain::Terrain},
    pipelines::{basic::StaticShader, shader::UniformUploader, terrain::TerrainShader},
    render::{BatchRenderer, EntityBatch, TerrainRenderer},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub clear_colour: [f32; 4],
    /// Cull back faces while drawing entities. Terrain is never culled.
    pub cull_back_faces: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_colour: [0.0, 0.0, 0.95, 1.0],
            cull_back_faces: true,
        }
    }
}

pub struct MasterRenderer {
    config: RendererConfig,
    projection: Projection,
    static_shader: StaticShader,
    terrain_shader: TerrainShader,
    entity_renderer: BatchRenderer,
    terrain_renderer: TerrainRenderer,
    entities: EntityBatch,
    terrains: Vec<Rc<Terrain>>,
}

impl MasterRenderer {
    /// Builds the bundled programs and uploads the projection once.
    pub fn new<G: Gpu>(
        gpu: &mut G,
        config: RendererConfig,
        projection: Projection,
    ) -> Result<Self, ShaderError> {
        let static_shader = StaticShader::new(gpu)?;
        let terrain_shader = TerrainShader::new(gpu)?;
        Ok(Self::with_shaders(
            gpu,
            config,
            projection,
            static_shader,
            terrain_shader,
        ))
    }

    pub fn with_shaders<G: Gpu>(
        gpu: &mut G,
        config: RendererConfig,
        projection: Projection,
        mut static_shader: StaticShader,
        mut terrain_shader: TerrainShader,
    ) -> Self {
        let matrix = projection.calc_matrix();
        prepare(gpu, &mut static_shader, &matrix);
        prepare(gpu, &mut terrain_shader, &matrix);
        Self {
            entity_renderer: BatchRenderer::new(config.cull_back_faces),
            terrain_renderer: TerrainRenderer,
            config,
            projection,
            static_shader,
            terrain_shader,
            entities: EntityBatch::new(),
            terrains: Vec::new(),
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn process_entity(&mut self, entity: &Entity) {
        self.entities.push(entity);
    }

    pub fn process_terrain(&mut self, terrain: &Rc<Terrain>) {
        if !self.terrains.iter().any(|t| Rc::ptr_eq(t, terrain)) {
            self.terrains.push(Rc::clone(terrain));
        }
    }

    /// Entities queued for the next [`render`](Self::render).
    pub fn queued(&self) -> &EntityBatch {
        &self.entities
    }

    pub fn render<G: Gpu>(&mut self, gpu: &mut G, light: &Light, camera: &Camera) {
        gpu.clear(self.config.clear_colour);

        self.static_shader.bind(gpu);
        self.static_shader.load_light(gpu, light);
        self.static_shader.load_view_matrix(gpu, camera);
        self.entity_renderer
            .render(gpu, &mut self.static_shader, &self.entities);
        self.static_shader.unbind(gpu);

        self.terrain_shader.bind(gpu);
        self.terrain_shader.load_light(gpu, light);
        self.terrain_shader.load_view_matrix(gpu, camera);
        self.terrain_renderer
            .render(gpu, &mut self.terrain_shader, &self.terrains);
        self.terrain_shader.unbind(gpu);

        log::trace!(
            "rendered {} entities over {} models and {} terrain tiles",
            self.entities.len(),
            self.entities.model_count(),
            self.terrains.len()
        );
        self.entities.clear();
        self.terrains.clear();
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        self.static_shader.release(gpu);
        self.terrain_shader.release(gpu);
    }
}

/// Uploads what stays fixed for the lifetime of a program.
fn prepare<G: Gpu, U: UniformUploader>(gpu: &mut G, shader: &mut U, projection: &Matrix4<f32>) {
    shader.bind(gpu);
    shader.load_projection_matrix(gpu, projection);
    shader.connect_texture_units(gpu);
    shader.unbind(gpu);
}
