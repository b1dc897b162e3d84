use std::{cell::RefCell, fmt::Write};

use rand::{Rng, SeedableRng, rngs::SmallRng};

use scene_ngin::{
    backend::recording::{GpuCommand, RecordingGpu},
    resources::{
        Loader, MemorySource,
        mesh::{ObjErrorKind, parse_obj},
    },
};

use crate::common::test_utils::{QUAD_OBJ, init_logger};

mod common;

#[test]
fn shared_positions_become_shared_vertices() {
    init_logger();
    let mesh = parse_obj(QUAD_OBJ).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0]);
    #[rustfmt::skip]
    let expected = vec![
        -1.0, -1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
         1.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
         1.0,  1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
        -1.0,  1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
    ];
    assert_eq!(mesh.vertices, expected);
}

#[test]
fn later_face_overwrites_attributes_of_shared_position() {
    let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 1
vn 0 0 1
vn 0 1 0
f 1/1/1 2/1/1 3/1/1
f 1/2/2 3/1/1 2/1/1
";
    let mesh = parse_obj(obj).unwrap();

    assert_eq!(&mesh.vertices[0..8], &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 1]);
}

/// Eighths are exact in f32, so values survive text formatting unchanged.
fn eighths<const N: usize>(rng: &mut SmallRng) -> [f32; N] {
    std::array::from_fn(|_| rng.gen_range(0..=8) as f32 / 8.0)
}

#[test]
fn last_face_vertex_wins_for_random_meshes() {
    for seed in 0..200u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let positions: Vec<[f32; 3]> = (0..rng.gen_range(1..=6)).map(|_| eighths(&mut rng)).collect();
        let tex_coords: Vec<[f32; 2]> = (0..rng.gen_range(1..=4)).map(|_| eighths(&mut rng)).collect();
        let normals: Vec<[f32; 3]> = (0..rng.gen_range(1..=4)).map(|_| eighths(&mut rng)).collect();
        let faces: Vec<[[usize; 3]; 3]> = (0..rng.gen_range(1..=8))
            .map(|_| {
                std::array::from_fn(|_| {
                    [
                        rng.gen_range(0..positions.len()),
                        rng.gen_range(0..tex_coords.len()),
                        rng.gen_range(0..normals.len()),
                    ]
                })
            })
            .collect();

        let mut records = String::new();
        for [x, y, z] in &positions {
            writeln!(records, "v {} {} {}", x, y, z).unwrap();
        }
        for [u, v] in &tex_coords {
            writeln!(records, "vt {} {}", u, v).unwrap();
        }
        for [x, y, z] in &normals {
            writeln!(records, "vn {} {} {}", x, y, z).unwrap();
        }
        let mut face_lines = String::new();
        for face in &faces {
            let refs: Vec<String> = face
                .iter()
                .map(|[p, t, n]| format!("{}/{}/{}", p + 1, t + 1, n + 1))
                .collect();
            writeln!(face_lines, "f {}", refs.join(" ")).unwrap();
        }
        let obj = if seed % 2 == 0 {
            records + &face_lines
        } else {
            face_lines + &records
        };

        let mesh = parse_obj(&obj).unwrap_or_else(|e| panic!("seed {}: {}\n{}", seed, e, obj));

        let mut expected = vec![0.0f32; positions.len() * 8];
        for (p, position) in positions.iter().enumerate() {
            expected[p * 8..p * 8 + 3].copy_from_slice(position);
        }
        for [p, t, n] in faces.iter().flatten() {
            let [u, v] = tex_coords[*t];
            expected[p * 8 + 3] = u;
            expected[p * 8 + 4] = 1.0 - v;
            expected[p * 8 + 5..p * 8 + 8].copy_from_slice(&normals[*n]);
        }
        let indices: Vec<u32> = faces.iter().flatten().map(|[p, _, _]| *p as u32).collect();

        assert_eq!(mesh.vertices, expected, "seed {}:\n{}", seed, obj);
        assert_eq!(mesh.indices, indices, "seed {}", seed);
    }
}

#[test]
fn faces_may_come_before_attributes() {
    let obj = "\
f 1/1/1 2/1/1 3/1/1
v 0 0 0
v 1 0 0
v 0 1 0
vt 0.5 0.25
vn 0 0 1
";
    let mesh = parse_obj(obj).unwrap();

    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(&mesh.vertices[8..16], &[1.0, 0.0, 0.0, 0.5, 0.75, 0.0, 0.0, 1.0]);
}

#[test]
fn file_without_faces_has_no_indices() {
    let mesh = parse_obj("v 1 2 3\nvt 0 0\nvn 0 1 0\n").unwrap();
    assert!(mesh.indices.is_empty());
    assert_eq!(mesh.vertices, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

    let empty = parse_obj("").unwrap();
    assert!(empty.indices.is_empty());
    assert_eq!(empty.vertex_count(), 0);
}

#[test]
fn error_reports_line_of_offending_record() {
    let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 9/1/1\n";
    let err = parse_obj(obj).unwrap_err();

    assert_eq!(err.line, 6);
    assert!(matches!(
        err.kind,
        ObjErrorKind::IndexOutOfRange {
            stream: "position",
            index: 9,
            len: 3
        }
    ));
}

#[tokio::test]
async fn failed_parse_uploads_nothing() {
    init_logger();
    let source = MemorySource::new()
        .with("quad.obj", QUAD_OBJ)
        .with("broken.obj", "v 0 0 zero\nf 1/1/1 1/1/1 1/1/1\n");
    let gpu = RefCell::new(RecordingGpu::new());
    let loader = Loader::new(&source, &gpu);

    let err = loader.raw_model("broken.obj").await.unwrap_err();
    assert!(format!("{:#}", err).contains("broken.obj"));
    assert!(gpu.borrow().commands().is_empty());

    let quad = loader.raw_model("quad.obj").await.unwrap();
    assert_eq!(quad.index_buffer().count(), 6);
    let gpu = gpu.borrow();
    assert_eq!(
        gpu.count(|c| matches!(c, GpuCommand::CreateVertexBuffer { bytes: 128, .. })),
        1
    );
    assert_eq!(
        gpu.count(|c| matches!(c, GpuCommand::CreateIndexBuffer { count: 6, .. })),
        1
    );
}

#[tokio::test]
async fn missing_asset_is_an_error() {
    let source = MemorySource::new();
    let gpu = RefCell::new(RecordingGpu::new());
    let loader = Loader::new(&source, &gpu);

    assert!(loader.raw_model("nowhere.obj").await.is_err());
    assert!(gpu.borrow().commands().is_empty());
}
