//! Shader programs with memoized uniform locations.
//!
//! Looking a uniform up is the expensive part of setting it, so every
//! [`ShaderProgram`] remembers the answer per name, including "no such
//! uniform". A missing uniform is reported once and every later write to it
//! is dropped silently.

use std::collections::HashMap;

use cgmath::{Matrix4, Vector3, Vector4};

use crate::{
    backend::{Gpu, ProgramHandle, ShaderError, UniformLocation, UniformValue},
    camera::Camera,
    data_structures::light::Light,
    pipelines::uniforms,
};

#[derive(Debug)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    locations: HashMap<String, Option<UniformLocation>>,
}

impl ShaderProgram {
    /// Compiles and links a vertex/fragment pair. Diagnostics are logged and
    /// returned.
    pub fn new<G: Gpu>(
        gpu: &mut G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        match gpu.create_program(vertex_source, fragment_source) {
            Ok(handle) => Ok(Self {
                handle,
                locations: HashMap::new(),
            }),
            Err(e) => {
                log::error!("{}", e);
                Err(e)
            }
        }
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn bind<G: Gpu>(&self, gpu: &mut G) {
        gpu.use_program(Some(self.handle));
    }

    pub fn unbind<G: Gpu>(&self, gpu: &mut G) {
        gpu.use_program(None);
    }

    fn location<G: Gpu>(&mut self, gpu: &mut G, name: &str) -> Option<UniformLocation> {
        if let Some(location) = self.locations.get(name) {
            return *location;
        }
        let location = gpu.uniform_location(self.handle, name);
        if location.is_none() {
            log::warn!("uniform '{}' doesn't exist in {:?}", name, self.handle);
        }
        self.locations.insert(name.to_string(), location);
        location
    }

    /// Writes to the currently bound program. Unknown names are ignored.
    pub fn set_uniform<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: UniformValue) {
        if let Some(location) = self.location(gpu, name) {
            gpu.set_uniform(&location, value);
        }
    }

    pub fn set_int<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: i32) {
        self.set_uniform(gpu, name, UniformValue::Int(value));
    }

    pub fn set_float<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: f32) {
        self.set_uniform(gpu, name, UniformValue::Float(value));
    }

    pub fn set_vec3<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: Vector3<f32>) {
        self.set_uniform(gpu, name, UniformValue::Vec3(value.into()));
    }

    pub fn set_vec4<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: Vector4<f32>) {
        self.set_uniform(gpu, name, UniformValue::Vec4(value.into()));
    }

    pub fn set_matrix4<G: Gpu>(&mut self, gpu: &mut G, name: &str, value: &Matrix4<f32>) {
        self.set_uniform(gpu, name, UniformValue::Mat4((*value).into()));
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_program(self.handle);
    }
}

/// The uniform vocabulary shared by every program the renderers drive.
///
/// Implementors only expose their [`ShaderProgram`]; the uniform names used
/// by the default methods are the contract shader sources have to honour.
pub trait UniformUploader {
    fn program(&mut self) -> &mut ShaderProgram;

    fn bind<G: Gpu>(&mut self, gpu: &mut G) {
        ShaderProgram::bind(self.program(), gpu);
    }

    fn unbind<G: Gpu>(&mut self, gpu: &mut G) {
        ShaderProgram::unbind(self.program(), gpu);
    }

    fn connect_texture_units<G: Gpu>(&mut self, gpu: &mut G) {
        self.program().set_int(gpu, uniforms::TEXTURE_SAMPLER, 0);
    }

    fn load_projection_matrix<G: Gpu>(&mut self, gpu: &mut G, projection: &Matrix4<f32>) {
        self.program()
            .set_matrix4(gpu, uniforms::PROJECTION_MATRIX, projection);
    }

    fn load_view_matrix<G: Gpu>(&mut self, gpu: &mut G, camera: &Camera) {
        self.program()
            .set_matrix4(gpu, uniforms::VIEW_MATRIX, &camera.view_matrix());
    }

    fn load_transformation<G: Gpu>(&mut self, gpu: &mut G, transformation: &Matrix4<f32>) {
        self.program()
            .set_matrix4(gpu, uniforms::TRANSFORMATION_MATRIX, transformation);
    }

    fn load_light<G: Gpu>(&mut self, gpu: &mut G, light: &Light) {
        let program = self.program();
        program.set_vec3(gpu, uniforms::LIGHT_POSITION, light.position);
        program.set_vec3(gpu, uniforms::LIGHT_COLOUR, light.colour);
    }

    fn load_shine<G: Gpu>(&mut self, gpu: &mut G, shine_damper: f32, reflectivity: f32) {
        let program = self.program();
        program.set_float(gpu, uniforms::SHINE_DAMPER, shine_damper);
        program.set_float(gpu, uniforms::REFLECTIVITY, reflectivity);
    }
}

impl UniformUploader for ShaderProgram {
    fn program(&mut self) -> &mut ShaderProgram {
        self
    }
}
