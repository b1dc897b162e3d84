#![allow(dead_code)]

use std::{io::Cursor, rc::Rc};

use scene_ngin::{
    Vector3,
    backend::{Gpu, TextureImage, recording::GpuCommand},
    data_structures::{
        entity::Entity,
        model::{RawModel, TexturedModel},
        texture::Texture,
    },
    resources::mesh::parse_obj,
};

/// Four corners, two texture coordinates, two normals; the diagonal
/// vertices are shared by both triangles.
pub const QUAD_OBJ: &str = "\
# unit quad facing +z
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0
vn 0.0 0.0 -1.0
f 1/1/1 2/2/1 3/1/1
f 3/1/1 4/2/1 1/1/1
";

pub const TRIANGLE_OBJ: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vn 0.0 0.0 1.0
f 1/1/1 2/1/1 3/1/1
";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn solid_image(colour: [u8; 4]) -> TextureImage {
    TextureImage {
        width: 1,
        height: 1,
        levels: vec![colour.to_vec()],
        wrap: scene_ngin::backend::WrapMode::Repeat,
    }
}

pub fn png_bytes(width: u32, height: u32, colour: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(colour));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("failed to encode test png");
    bytes
}

pub fn textured_model<G: Gpu>(gpu: &mut G, obj: &str, name: &str) -> Rc<TexturedModel> {
    let mesh = parse_obj(obj).expect("test obj should parse");
    let raw = RawModel::upload(gpu, name, &mesh);
    let texture = Texture::from_image(gpu, &format!("{}.png", name), &solid_image([255, 255, 255, 255]));
    Rc::new(TexturedModel::new(raw, Rc::new(texture)))
}

pub fn entity_at(model: &Rc<TexturedModel>, x: f32) -> Entity {
    Entity::new(
        Rc::clone(model),
        Vector3::new(x, 0.0, -5.0),
        Vector3::new(0.0, 0.0, 0.0),
        1.0,
    )
}

pub fn bound_vertex_arrays(commands: &[GpuCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, GpuCommand::BindVertexArray(Some(_))))
        .count()
}

pub fn bound_textures(commands: &[GpuCommand]) -> usize {
    commands
        .iter()
        .filter(|c| matches!(c, GpuCommand::BindTexture { texture: Some(_), .. }))
        .count()
}
