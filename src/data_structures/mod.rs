//! Engine data structures: buffers, models, textures, entities and terrain.
//!
//! This module contains the core data types for scene representation:
//!
//! - `buffer` contains the vertex layout and the vertex/index buffer wrappers
//! - `model` contains CPU meshes, uploaded geometry and textured models
//! - `texture` contains the pending/ready GPU texture wrappers
//! - `entity` holds per-entity transformation data
//! - `light` is the single scene light
//! - `terrain` generates and owns flat ground tiles

pub mod buffer;
pub mod entity;
pub mod light;
pub mod model;
pub mod terrain;
pub mod texture;
