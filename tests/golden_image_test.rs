#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod golden {
    use std::rc::Rc;

    use scene_ngin::{
        Deg, Vector3,
        backend::wgpu_backend::WgpuBackend,
        camera::{Camera, Projection},
        context::Context,
        data_structures::{
            entity::Entity,
            light::Light,
            model::{RawModel, TexturedModel},
            texture::Texture,
        },
        flow::{MasterRenderer, RendererConfig},
        resources::mesh::parse_obj,
    };

    use crate::common::test_utils::{QUAD_OBJ, init_logger, solid_image};

    const WIDTH: u32 = 64;
    const HEIGHT: u32 = 64;

    async fn backend() -> WgpuBackend {
        init_logger();
        let ctx = Context::headless(WIDTH, HEIGHT)
            .await
            .expect("failed to create headless context");
        WgpuBackend::new(ctx)
    }

    fn white_clear() -> RendererConfig {
        RendererConfig {
            clear_colour: [1.0, 1.0, 1.0, 1.0],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn should_render_clear_colour() {
        let mut gpu = backend().await;
        let projection = Projection::new(WIDTH, HEIGHT, Deg(70.0), 0.1, 100.0);
        let mut renderer = MasterRenderer::new(&mut gpu, white_clear(), projection).unwrap();

        renderer.render(&mut gpu, &Light::default(), &Camera::default());
        gpu.finish_frame().unwrap();
        let pixels = gpu.read_pixels().await.unwrap();

        for pixel in pixels.pixels() {
            assert_eq!(pixel.0, [255, 255, 255, 255]);
        }
    }

    #[tokio::test]
    async fn should_render_lit_textured_quad() {
        let mut gpu = backend().await;
        let projection = Projection::new(WIDTH, HEIGHT, Deg(70.0), 0.1, 100.0);
        let mut renderer = MasterRenderer::new(&mut gpu, white_clear(), projection).unwrap();

        let mesh = parse_obj(QUAD_OBJ).unwrap();
        let raw = RawModel::upload(&mut gpu, "quad", &mesh);
        let red = Texture::from_image(&mut gpu, "red.png", &solid_image([255, 0, 0, 255]));
        let model = Rc::new(TexturedModel::new(raw, Rc::new(red)));
        let entity = Entity::new(
            model,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            1.0,
        );
        let camera = Camera::new(Vector3::new(0.0, 0.0, 3.0), 0.0, 0.0, 0.0);
        let light = Light::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(1.0, 1.0, 1.0));

        renderer.process_entity(&entity);
        renderer.render(&mut gpu, &light, &camera);
        gpu.finish_frame().unwrap();
        let pixels = gpu.read_pixels().await.unwrap();

        let centre = pixels.get_pixel(WIDTH / 2, HEIGHT / 2).0;
        assert!(centre[0] >= 250, "centre is {:?}", centre);
        assert!(centre[1] <= 5 && centre[2] <= 5, "centre is {:?}", centre);
        for (x, y) in [(0, 0), (WIDTH - 1, 0), (0, HEIGHT - 1), (WIDTH - 1, HEIGHT - 1)] {
            assert_eq!(pixels.get_pixel(x, y).0, [255, 255, 255, 255]);
        }
    }
}
