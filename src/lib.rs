//! scene-ngin
//!
//! A small real-time scene renderer. OBJ geometry and images are loaded into
//! GPU buffers and textures, entities that share a textured model are
//! grouped so each model's state is bound once per frame, and every entity
//! is drawn with its own transformation under one camera and one light.
//!
//! High-level modules
//! - `backend`: the [`backend::Gpu`] seam plus a recording and a wgpu implementation
//! - `camera`: camera, projection and explicit input state
//! - `context`: headless wgpu device and frame targets
//! - `data_structures`: buffers, models, textures, entities, light and terrain
//! - `flow`: the per-frame accumulate/render cycle ([`flow::MasterRenderer`])
//! - `pipelines`: shader programs and the uniform contract
//! - `resources`: asset sources, OBJ parsing and async loading
//! - `render`: model-grouped batching and the draw paths
//!

pub mod backend;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod resources;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
