//! Shader programs and the uniform contract between them and the renderers.
//!
//! - `shader` holds [`shader::ShaderProgram`] and the [`shader::UniformUploader`] capability
//! - `basic` is the lit, textured program used for entities
//! - `terrain` is the same lighting with a tiled ground texture

pub mod basic;
pub mod shader;
pub mod terrain;

/// Uniform names every program is expected to declare.
pub mod uniforms {
    pub const PROJECTION_MATRIX: &str = "projection_matrix";
    pub const VIEW_MATRIX: &str = "view_matrix";
    pub const TRANSFORMATION_MATRIX: &str = "transformation_matrix";
    pub const LIGHT_POSITION: &str = "light_position";
    pub const LIGHT_COLOUR: &str = "light_colour";
    pub const TEXTURE_SAMPLER: &str = "texture_sampler";
    pub const SHINE_DAMPER: &str = "shine_damper";
    pub const REFLECTIVITY: &str = "reflectivity";

    pub const ALL: [&str; 8] = [
        PROJECTION_MATRIX,
        VIEW_MATRIX,
        TRANSFORMATION_MATRIX,
        LIGHT_POSITION,
        LIGHT_COLOUR,
        TEXTURE_SAMPLER,
        SHINE_DAMPER,
        REFLECTIVITY,
    ];
}
