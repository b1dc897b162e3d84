//! Batched drawing.
//!
//! Entities are collected per frame into an [`EntityBatch`] that groups them
//! by the textured model they share. Rendering a batch binds each model's
//! geometry, texture and shine once and then only swaps the transformation
//! matrix between draws.
//!
//! # Key types
//!
//! - [`EntityBatch`] is the per-frame model -> entities grouping
//! - [`BatchRenderer`] draws an entity batch
//! - [`TerrainRenderer`] draws terrain tiles
//!
//! [`draw_raw_model`] and [`draw_entity`] are the unbatched single-draw paths.

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use crate::{
    backend::Gpu,
    data_structures::{
        entity::{Entity, EntityId, Transform},
        model::{ModelId, RawModel, TexturedModel},
        terrain::Terrain,
    },
    pipelines::shader::{ShaderProgram, UniformUploader},
};

#[derive(Debug, Default)]
struct Bucket {
    model: Option<Rc<TexturedModel>>,
    transforms: Vec<Transform>,
}

/// Entities of one frame grouped by model, in the order models first appear.
///
/// Buckets are reused across frames: [`clear`](Self::clear) drops the model
/// references and empties every bucket but keeps their allocations.
#[derive(Debug, Default)]
pub struct EntityBatch {
    buckets: Vec<Bucket>,
    active: usize,
    index: HashMap<ModelId, usize>,
    queued: HashSet<EntityId>,
}

impl EntityBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the entity's current transform under its model. An entity that
    /// is already queued this frame is ignored and `false` is returned.
    pub fn push(&mut self, entity: &Entity) -> bool {
        if !self.queued.insert(entity.id()) {
            log::trace!("{:?} was already queued this frame", entity.id());
            return false;
        }
        let model = entity.model();
        let slot = match self.index.get(&model.id()) {
            Some(slot) => *slot,
            None => {
                if self.active == self.buckets.len() {
                    self.buckets.push(Bucket::default());
                }
                let slot = self.active;
                self.active += 1;
                self.buckets[slot].model = Some(Rc::clone(model));
                self.index.insert(model.id(), slot);
                slot
            }
        };
        self.buckets[slot].transforms.push(entity.transform);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TexturedModel, &[Transform])> {
        self.buckets[..self.active]
            .iter()
            .filter_map(|b| b.model.as_deref().map(|m| (m, b.transforms.as_slice())))
    }

    /// Number of distinct models.
    pub fn model_count(&self) -> usize {
        self.active
    }

    /// Number of queued entities.
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets[..self.active] {
            bucket.model = None;
            bucket.transforms.clear();
        }
        self.active = 0;
        self.index.clear();
        self.queued.clear();
    }
}

/// Draws entity batches with back-face culling around the whole pass.
#[derive(Debug, Clone)]
pub struct BatchRenderer {
    pub cull_back_faces: bool,
}

impl BatchRenderer {
    pub fn new(cull_back_faces: bool) -> Self {
        Self { cull_back_faces }
    }

    /// Expects `shader` to be bound with camera and light already loaded.
    pub fn render<G: Gpu, U: UniformUploader>(&self, gpu: &mut G, shader: &mut U, batch: &EntityBatch) {
        if self.cull_back_faces {
            gpu.set_culling(true);
        }
        for (model, transforms) in batch.iter() {
            let raw = model.raw();
            raw.bind(gpu);
            model.texture().bind(gpu, 0);
            shader.load_shine(gpu, model.shine_damper, model.reflectivity);
            for transform in transforms {
                shader.load_transformation(gpu, &transform.to_matrix());
                raw.draw(gpu);
            }
            raw.unbind(gpu);
        }
        if self.cull_back_faces {
            gpu.set_culling(false);
        }
    }
}

impl Default for BatchRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TerrainRenderer;

impl TerrainRenderer {
    pub fn render<G: Gpu, U: UniformUploader>(&self, gpu: &mut G, shader: &mut U, terrains: &[Rc<Terrain>]) {
        for terrain in terrains {
            let raw = terrain.model();
            let texture = terrain.texture();
            raw.bind(gpu);
            texture.bind(gpu, 0);
            shader.load_shine(gpu, texture.shine_damper, texture.reflectivity);
            shader.load_transformation(gpu, &terrain.transform().to_matrix());
            raw.draw(gpu);
            raw.unbind(gpu);
        }
    }
}

/// Draws bare geometry with whatever uniforms `program` already holds.
pub fn draw_raw_model<G: Gpu>(gpu: &mut G, raw: &RawModel, program: &ShaderProgram) {
    program.bind(gpu);
    raw.bind(gpu);
    raw.draw(gpu);
    raw.unbind(gpu);
}

/// Draws a single entity outside of any batch. `shader` must be bound.
pub fn draw_entity<G: Gpu, U: UniformUploader>(gpu: &mut G, entity: &Entity, shader: &mut U) {
    let model = entity.model();
    let raw = model.raw();
    raw.bind(gpu);
    model.texture().bind(gpu, 0);
    shader.load_shine(gpu, model.shine_damper, model.reflectivity);
    shader.load_transformation(gpu, &entity.transform.to_matrix());
    raw.draw(gpu);
    raw.unbind(gpu);
}
