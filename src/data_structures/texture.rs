//! GPU textures.
//!
//! A texture goes through two states. [`PendingTexture`] owns a GPU handle
//! that holds a 1x1 placeholder pixel while the real image is still being
//! fetched; once the image is there it is resolved into a [`Texture`]. Only
//! resolved textures can be attached to a model, so nothing ever draws with
//! an image that has not finished loading.

use crate::backend::{Gpu, TextureHandle, TextureImage};

/// A texture whose image has not arrived yet.
#[derive(Debug)]
pub struct PendingTexture {
    handle: TextureHandle,
    path: String,
}

impl PendingTexture {
    pub fn new<G: Gpu>(gpu: &mut G, path: &str) -> Self {
        let handle = gpu.create_texture(&TextureImage::placeholder());
        Self {
            handle,
            path: path.to_string(),
        }
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Uploads the loaded image into the placeholder's handle.
    pub fn resolve<G: Gpu>(self, gpu: &mut G, image: &TextureImage) -> Texture {
        gpu.upload_texture(self.handle, image);
        log::debug!(
            "texture {} ready ({}x{}, {} level(s))",
            self.path,
            image.width,
            image.height,
            image.levels.len()
        );
        Texture {
            handle: self.handle,
            path: self.path,
            shine_damper: Texture::DEFAULT_SHINE_DAMPER,
            reflectivity: Texture::DEFAULT_REFLECTIVITY,
        }
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_texture(self.handle);
    }
}

/// A loaded surface texture and the material defaults models inherit from it.
#[derive(Debug)]
pub struct Texture {
    handle: TextureHandle,
    path: String,
    pub shine_damper: f32,
    pub reflectivity: f32,
}

impl Texture {
    pub const DEFAULT_SHINE_DAMPER: f32 = 1.0;
    pub const DEFAULT_REFLECTIVITY: f32 = 0.0;

    pub fn from_image<G: Gpu>(gpu: &mut G, path: &str, image: &TextureImage) -> Self {
        PendingTexture::new(gpu, path).resolve(gpu, image)
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bind<G: Gpu>(&self, gpu: &mut G, unit: u32) {
        gpu.bind_texture(unit, Some(self.handle));
    }

    pub fn unbind<G: Gpu>(&self, gpu: &mut G, unit: u32) {
        gpu.bind_texture(unit, None);
    }

    pub fn release<G: Gpu>(self, gpu: &mut G) {
        gpu.delete_texture(self.handle);
    }
}
