//! Loading models, textures and shaders from an asset source.
//!
//! Bytes come from an [`AssetSource`]; the [`Loader`] turns them into GPU
//! resources. Every load future resolves only once its upload is complete,
//! so loads can be joined concurrently before the first frame:
//!
//! ```ignore
//! let gpu = RefCell::new(gpu);
//! let loader = Loader::new(&source, &gpu);
//! let (tree, grass) = futures::try_join!(
//!     loader.textured_model("tree.obj", "tree.png"),
//!     loader.texture("grass.png"),
//! )?;
//! ```

use std::{cell::RefCell, collections::HashMap, future::Future, rc::Rc};

use anyhow::Context;

use crate::{
    backend::Gpu,
    data_structures::{
        model::{RawModel, TexturedModel},
        texture::{PendingTexture, Texture},
    },
    pipelines::shader::ShaderProgram,
};

pub mod mesh;
pub mod texture;

/// Fetches raw asset bytes by file name.
pub trait AssetSource {
    fn load_binary(&self, file_name: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>>;

    fn load_string(&self, file_name: &str) -> impl Future<Output = anyhow::Result<String>> {
        async move {
            let bytes = self.load_binary(file_name).await?;
            String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", file_name))
        }
    }
}

/// Reads assets from a directory on disk, `./assets` by default.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSource {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for FileSource {
    fn default() -> Self {
        Self::new(std::path::Path::new("./").join("assets"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for FileSource {
    async fn load_binary(&self, file_name: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.root.join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Assets held in memory, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(file_name, bytes);
        self
    }

    pub fn insert(&mut self, file_name: &str, bytes: impl Into<Vec<u8>>) {
        self.files.insert(file_name.to_string(), bytes.into());
    }
}

impl AssetSource for MemorySource {
    async fn load_binary(&self, file_name: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .get(file_name)
            .cloned()
            .with_context(|| format!("no asset named {}", file_name))
    }
}

/// Turns assets into GPU resources.
///
/// The GPU is shared through a `RefCell` so several loads can be in flight
/// at once; it is only borrowed between awaits.
pub struct Loader<'a, S, G> {
    source: &'a S,
    gpu: &'a RefCell<G>,
}

impl<'a, S: AssetSource, G: Gpu> Loader<'a, S, G> {
    pub fn new(source: &'a S, gpu: &'a RefCell<G>) -> Self {
        Self { source, gpu }
    }

    /// Parses an OBJ file and uploads it. Nothing is uploaded if parsing fails.
    pub async fn raw_model(&self, file_name: &str) -> anyhow::Result<RawModel> {
        let text = self.source.load_string(file_name).await?;
        let mesh = mesh::parse_obj(&text).with_context(|| format!("failed to parse {}", file_name))?;
        log::debug!(
            "loaded {}: {} vertices, {} indices",
            file_name,
            mesh.vertex_count(),
            mesh.indices.len()
        );
        let mut gpu = self.gpu.borrow_mut();
        Ok(RawModel::upload(&mut *gpu, file_name, &mesh))
    }

    /// Creates the texture with a placeholder pixel straight away and fills
    /// in the real image once it has been fetched and decoded.
    pub async fn texture(&self, file_name: &str) -> anyhow::Result<Texture> {
        let pending = PendingTexture::new(&mut *self.gpu.borrow_mut(), file_name);
        let image = match self.source.load_binary(file_name).await {
            Ok(bytes) => texture::decode_image(&bytes, file_name),
            Err(e) => Err(e),
        };
        let mut gpu = self.gpu.borrow_mut();
        match image {
            Ok(image) => Ok(pending.resolve(&mut *gpu, &image)),
            Err(e) => {
                pending.release(&mut *gpu);
                Err(e)
            }
        }
    }

    pub async fn textured_model(
        &self,
        obj_file: &str,
        texture_file: &str,
    ) -> anyhow::Result<TexturedModel> {
        let (raw, texture) = futures::try_join!(self.raw_model(obj_file), self.texture(texture_file))?;
        Ok(TexturedModel::new(raw, Rc::new(texture)))
    }

    /// Loads `(obj, texture)` pairs concurrently, keeping their order.
    pub async fn textured_models(
        &self,
        files: &[(&str, &str)],
    ) -> anyhow::Result<Vec<TexturedModel>> {
        futures::future::try_join_all(
            files
                .iter()
                .map(|(obj, texture)| self.textured_model(obj, texture)),
        )
        .await
    }

    pub async fn shader(
        &self,
        vertex_file: &str,
        fragment_file: &str,
    ) -> anyhow::Result<ShaderProgram> {
        let (vertex, fragment) = futures::try_join!(
            self.source.load_string(vertex_file),
            self.source.load_string(fragment_file)
        )?;
        let mut gpu = self.gpu.borrow_mut();
        ShaderProgram::new(&mut *gpu, &vertex, &fragment)
            .with_context(|| format!("failed to build {} + {}", vertex_file, fragment_file))
    }
}
