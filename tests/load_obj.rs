//! OBJ/MTL 加载的端到端测试

mod common;

use common::{Fixture, CUBE_MTL, CUBE_OBJ};
use std::path::{Path, PathBuf};

use tri_mesh::core::error::MeshLoadError;
use tri_mesh::core::math::{approx_eq, Vector3};
use tri_mesh::geometry::loaders::{load_mesh, LoadOptions, MeshLoader, ObjLoader};
use tri_mesh::geometry::mesh::MeshData;
use tri_mesh::geometry::texture::{DeferredTextures, ImageTextureLoader};
use tri_mesh::geometry::Bounds;

fn raw_options() -> LoadOptions {
    LoadOptions {
        normalize: false,
        ..LoadOptions::default()
    }
}

fn load_cube(fixture: &Fixture, options: &LoadOptions) -> MeshData {
    let obj = fixture.write("cube.obj", CUBE_OBJ);
    fixture.write("cube.mtl", CUBE_MTL);
    load_mesh(&obj, options, &mut DeferredTextures).unwrap()
}

fn assert_index_invariants(mesh: &MeshData) {
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));

    let concatenated: Vec<u32> = mesh
        .submeshes
        .iter()
        .flat_map(|s| mesh.submesh_indices(s).iter().copied())
        .collect();
    assert_eq!(concatenated, mesh.indices);
}

#[test]
fn single_triangle_scenario() {
    let fixture = Fixture::new("triangle");
    fixture.write("tri.mtl", "newmtl flat\nKd 1 1 1\n");
    let obj = fixture.write(
        "tri.obj",
        "mtllib tri.mtl\nv 0 0 0\nv 2 0 0\nv 0 2 0\nvt 0 0\nvn 0 0 1\nusemtl flat\nf 1/1/1 2/1/1 3/1/1\n",
    );

    let mesh = ObjLoader::load_from_file(&obj, &raw_options(), &mut DeferredTextures).unwrap();

    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.submesh_count(), 1);
    assert_eq!(mesh.name.as_deref(), Some("tri"));
    assert_eq!(mesh.vertices[1].position, [2.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices[1].normal, [0.0, 0.0, 1.0]);
    // 未归一化时包围盒保持全零
    assert_eq!(mesh.bounds, Bounds::default());
}

#[test]
fn quad_scenario() {
    let mesh = ObjLoader::load_from_memory(
        b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nvn 0 0 1\n\
          usemtl m\nf 1/1/1 2/2/1 3/3/1 4/4/1\n",
        &LoadOptions {
            allow_undeclared_materials: true,
            ..raw_options()
        },
        &mut DeferredTextures,
    )
    .unwrap();

    assert_eq!(mesh.index_count(), 6);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    // 两个三角形共享第一个和第三个顶点
    let (a, b) = mesh.indices.split_at(3);
    assert!(a.contains(&0) && b.contains(&0));
    assert!(a.contains(&2) && b.contains(&2));
}

#[test]
fn pentagon_fans_from_first_vertex() {
    let mesh = ObjLoader::load_from_memory(
        b"v 0 0 0\nv 2 0 0\nv 3 1 0\nv 1 3 0\nv -1 1 0\nvt 0 0\nvn 0 0 1\n\
          usemtl m\nf 1/1/1 2/1/1 3/1/1 4/1/1 5/1/1\n",
        &LoadOptions {
            allow_undeclared_materials: true,
            ..raw_options()
        },
        &mut DeferredTextures,
    )
    .unwrap();

    assert_eq!(mesh.triangle_count(), 3);
    assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
}

#[test]
fn cube_partitions_by_material() {
    let fixture = Fixture::new("cube_partition");
    let mesh = load_cube(&fixture, &raw_options());

    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.submesh_count(), 2);
    assert_eq!(mesh.submeshes[0].face_count, 8);
    assert_eq!(mesh.submeshes[1].face_start, 8);
    assert_eq!(mesh.submeshes[1].face_count, 4);
    assert_eq!(mesh.material_of(&mesh.submeshes[0]).unwrap().name, "red");
    assert_eq!(mesh.material_of(&mesh.submeshes[1]).unwrap().name, "blue");
    assert_index_invariants(&mesh);

    let summary = mesh.summary();
    assert_eq!(summary.submeshes[1].material, "blue");
    assert_eq!(summary.submeshes[1].triangle_count, 4);
}

#[test]
fn cube_deduplicates_by_index_triple() {
    let fixture = Fixture::new("cube_dedup");
    let mesh = load_cube(&fixture, &raw_options());

    // 每个面 4 个角点，法线各不相同，所以没有跨面共享
    assert_eq!(mesh.vertex_count(), 24);

    // 同一位置、不同法线的角点是不同的顶点
    let at_origin = mesh
        .vertices
        .iter()
        .filter(|v| v.position == [0.0, 0.0, 0.0])
        .count();
    assert_eq!(at_origin, 3);
}

#[test]
fn repeated_triples_share_an_index_across_faces() {
    let mesh = ObjLoader::load_from_memory(
        b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvt 0 0\nvt 0 0\nvn 0 0 1\n\
          usemtl m\nf 1/1/1 2/1/1 3/1/1\nusemtl m\nf 3/1/1 2/1/1 4/1/1\nf 1/2/1 2/1/1 4/1/1\n",
        &LoadOptions {
            allow_undeclared_materials: true,
            ..raw_options()
        },
        &mut DeferredTextures,
    )
    .unwrap();

    // 第二个子网格复用第一个子网格中的顶点 2、1
    assert_eq!(&mesh.indices[3..6], &[2, 1, 3]);
    // 1/2/1 与 1/1/1 数值相同但索引不同
    assert_eq!(mesh.indices[6], 4);
    assert_eq!(mesh.vertices[4], mesh.vertices[0]);
    assert_eq!(mesh.vertex_count(), 5);
    assert_index_invariants(&mesh);
}

#[test]
fn normalization_produces_unit_origin_box() {
    let fixture = Fixture::new("cube_normalized");
    let mesh = load_cube(&fixture, &LoadOptions::default());

    assert!((mesh.bounds.largest_extent() - 1.0).abs() < 1e-6);
    assert!(approx_eq(&mesh.bounds.center, &Vector3::zeros(), 1e-6));
    assert_eq!(mesh.bounds, Bounds::from_vertices(&mesh.vertices).unwrap());
    assert!(mesh
        .vertices
        .iter()
        .all(|v| v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6)));
}

#[test]
fn unnormalized_positions_keep_file_space() {
    let fixture = Fixture::new("cube_raw");
    let mesh = load_cube(&fixture, &raw_options());

    let raw = Bounds::from_vertices(&mesh.vertices).unwrap();
    assert_eq!(raw.center, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(raw.extent, Vector3::new(2.0, 2.0, 2.0));
}

#[test]
fn renormalizing_converges() {
    let fixture = Fixture::new("cube_renormalize");
    let mut mesh = load_cube(&fixture, &LoadOptions::default());

    let before = mesh.vertices.clone();
    let bounds = mesh.normalize();

    assert!((bounds.largest_extent() - 1.0).abs() < 1e-6);
    for (a, b) in before.iter().zip(&mesh.vertices) {
        assert!(approx_eq(&Vector3::from(a.position), &Vector3::from(b.position), 1e-6));
    }
}

#[test]
fn materials_are_parsed_with_texture_paths() {
    let fixture = Fixture::new("cube_materials");
    let mesh = load_cube(&fixture, &raw_options());

    let red = mesh.materials.by_name("red").unwrap();
    assert_eq!(red.ambient, Vector3::new(0.1, 0.0, 0.0));
    assert_eq!(red.diffuse, Vector3::new(0.8, 0.0, 0.0));
    assert_eq!(red.specular, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(red.shininess, 50.0);

    let blue = mesh.materials.by_name("blue").unwrap();
    let map = blue.diffuse_map.as_ref().unwrap();
    assert_eq!(map.path, fixture.path().join("textures/blue.png"));
    assert!(map.handle.is_none());
}

#[test]
fn diffuse_textures_are_decoded() {
    let fixture = Fixture::new("cube_textures");
    let texture_path = fixture.path().join("textures/blue.png");
    std::fs::create_dir_all(texture_path.parent().unwrap()).unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 200, 255]))
        .save(&texture_path)
        .unwrap();

    let obj = fixture.write("cube.obj", CUBE_OBJ);
    fixture.write("cube.mtl", CUBE_MTL);
    let mut textures = ImageTextureLoader::new();
    let mesh = load_mesh(&obj, &raw_options(), &mut textures).unwrap();

    let handle = mesh
        .materials
        .by_name("blue")
        .and_then(|m| m.diffuse_texture())
        .unwrap();
    let image = textures.get(handle).unwrap();
    assert_eq!((image.width, image.height), (4, 4));
    assert!(mesh.materials.by_name("red").unwrap().diffuse_texture().is_none());
}

#[test]
fn material_library_resolves_against_asset_root() {
    let fixture = Fixture::new("asset_root");
    fixture.write("materials/cube.mtl", CUBE_MTL);
    let obj = fixture.write("models/cube.obj", CUBE_OBJ);

    let err = load_mesh(&obj, &raw_options(), &mut DeferredTextures).unwrap_err();
    assert!(matches!(err.as_mesh_error(), Some(MeshLoadError::Io { .. })));

    let options = LoadOptions {
        asset_root: Some(fixture.path().join("materials")),
        ..raw_options()
    };
    let mesh = load_mesh(&obj, &options, &mut DeferredTextures).unwrap();
    assert_eq!(mesh.materials.len(), 2);
}

#[test]
fn missing_geometry_file_is_io_error() {
    let err = load_mesh(Path::new("does/not/exist.obj"), &raw_options(), &mut DeferredTextures)
        .unwrap_err();

    match err.as_mesh_error() {
        Some(MeshLoadError::Io { path, .. }) => assert_eq!(path, &PathBuf::from("does/not/exist.obj")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn face_before_usemtl_is_rejected() {
    let fixture = Fixture::new("no_usemtl");
    let obj = fixture.write(
        "loose.obj",
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n",
    );

    let err = load_mesh(&obj, &raw_options(), &mut DeferredTextures).unwrap_err();
    assert!(matches!(
        err.as_mesh_error(),
        Some(MeshLoadError::MissingActiveSubmesh { line: 6 })
    ));
}

#[test]
fn undeclared_material_policy() {
    let fixture = Fixture::new("undeclared");
    fixture.write("cube.mtl", CUBE_MTL);
    let obj = fixture.write(
        "ghost.obj",
        "mtllib cube.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nusemtl green\nf 1/1/1 2/1/1 3/1/1\n",
    );

    let err = load_mesh(&obj, &raw_options(), &mut DeferredTextures).unwrap_err();
    assert!(matches!(
        err.as_mesh_error(),
        Some(MeshLoadError::UnknownMaterial { line: 7, .. })
    ));

    let lenient = LoadOptions {
        allow_undeclared_materials: true,
        ..raw_options()
    };
    let mesh = load_mesh(&obj, &lenient, &mut DeferredTextures).unwrap();
    let green = mesh.material_of(&mesh.submeshes[0]).unwrap();
    assert_eq!(green.name, "green");
    assert_eq!(green.diffuse, Vector3::zeros());
    assert_eq!(mesh.materials.len(), 3);
}

#[test]
fn hash_in_material_names_is_not_a_comment() {
    let fixture = Fixture::new("hash_names");
    fixture.write(
        "hash.mtl",
        "newmtl Mat#1 # first\nKd 1 0 0\nnewmtl Mat#2\nKd 0 1 0\n",
    );
    let obj = fixture.write(
        "hash.obj",
        "mtllib hash.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
         usemtl Mat#1\nf 1/1/1 2/1/1 3/1/1\nusemtl Mat#2\nf 3/1/1 2/1/1 1/1/1\n",
    );

    let mesh = load_mesh(&obj, &raw_options(), &mut DeferredTextures).unwrap();
    assert_eq!(mesh.materials.len(), 2);
    assert_ne!(mesh.submeshes[0].material, mesh.submeshes[1].material);

    let first = mesh.material_of(&mesh.submeshes[0]).unwrap();
    let second = mesh.material_of(&mesh.submeshes[1]).unwrap();
    assert_eq!(first.name, "Mat#1");
    assert_eq!(first.diffuse, Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(second.name, "Mat#2");
    assert_eq!(second.diffuse, Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn material_library_name_may_contain_spaces() {
    let fixture = Fixture::new("spaced_library");
    fixture.write("my model.mtl", CUBE_MTL);
    let obj = fixture.write("spaced.obj", &CUBE_OBJ.replace("mtllib cube.mtl", "mtllib my model.mtl"));

    let mesh = load_mesh(&obj, &raw_options(), &mut DeferredTextures).unwrap();
    assert_eq!(mesh.materials.len(), 2);
    assert_eq!(mesh.submeshes.len(), 2);
}
