//! TriMesh - OBJ/MTL 三角形网格加载器
//!
//! 读取 Wavefront OBJ 几何文件及其引用的 MTL 材质文件，
//! 输出去重后的顶点缓冲、索引缓冲和按材质划分的子网格，
//! 并可选地归一化到以原点为中心、最长边为 1 的包围盒。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理）
//! - `geometry`: 几何体加载模块（顶点、网格、材质、OBJ/MTL 加载器）
//!
//! # 使用示例
//!
//! ```no_run
//! use tri_mesh::geometry::loaders::{load_mesh, LoadOptions};
//! use tri_mesh::geometry::texture::DeferredTextures;
//! use std::path::Path;
//!
//! let mesh = load_mesh(Path::new("assets/cube.obj"), &LoadOptions::default(), &mut DeferredTextures)?;
//! for submesh in &mesh.submeshes {
//!     let material = mesh.material_of(submesh).unwrap();
//!     println!("{}: {} triangles", material.name, submesh.face_count);
//! }
//! # Ok::<(), tri_mesh::core::TriMeshError>(())
//! ```

pub mod core;
pub mod geometry;
