/// OBJ 文件加载器
///
/// 单遍流式解析 Wavefront OBJ：
/// `v`/`vt`/`vn` 进入属性存储，`mtllib` 加载材质表，`usemtl` 开始新的子网格，
/// `f` 的每个 `p/t/n` 经过去重得到顶点索引，再做扇形三角化。
/// 其他前缀（`o`、`g`、`s` 等）忽略。
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::mtl_loader::load_mtl_file;
use super::record::{for_each_line, optional_float, parse_floats, required_operand, rest_of_line};
use super::{LoadOptions, MeshLoader};
use crate::core::error::{MeshLoadError, Result};
use crate::core::math::{Vector2, Vector3};
use crate::geometry::attributes::AttributeStore;
use crate::geometry::dedup::{FaceVertexKey, VertexDeduplicator};
use crate::geometry::material::{Material, MaterialTable};
use crate::geometry::mesh::MeshData;
use crate::geometry::submesh::SubmeshPartitioner;
use crate::geometry::texture::TextureLoader;
use crate::geometry::triangulate::{fan_triangle_count, fan_triangulate};

/// OBJ 格式加载器
///
/// # 特性
///
/// - 按 `(p, t, n)` 索引去重，顶点按第一次出现的顺序编号
/// - 多边形扇形三角化
/// - 按 `usemtl` 划分子网格
/// - 可选归一化到单位包围盒
///
/// # 使用示例
///
/// ```rust,no_run
/// use tri_mesh::geometry::loaders::{LoadOptions, MeshLoader, ObjLoader};
/// use tri_mesh::geometry::texture::DeferredTextures;
/// use std::path::Path;
///
/// let mesh = ObjLoader::load_from_file(
///     Path::new("model.obj"),
///     &LoadOptions::default(),
///     &mut DeferredTextures,
/// )?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    /// 从任意 `BufRead` 解析 OBJ
    ///
    /// `source` 只用于错误信息；`mtllib` 相对 `options.material_root(geometry_path)` 解析。
    pub fn load_from_reader<R: BufRead>(
        reader: R,
        source: &Path,
        geometry_path: Option<&Path>,
        options: &LoadOptions,
        textures: &mut dyn TextureLoader,
    ) -> Result<MeshData> {
        let mut state = ParseState::new(options, options.material_root(geometry_path), textures);

        for_each_line(reader, source, |line_no, line| state.parse_line(line_no, line))?;

        let name = geometry_path
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");
        let mesh = state.finish(name);

        mesh.validate().map_err(MeshLoadError::ValidationError)?;

        tracing::info!(
            name = mesh.name.as_deref().unwrap_or_default(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            submeshes = mesh.submesh_count(),
            materials = mesh.materials.len(),
            "OBJ loaded"
        );

        Ok(mesh)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(
        path: &Path,
        options: &LoadOptions,
        textures: &mut dyn TextureLoader,
    ) -> Result<MeshData> {
        let file = File::open(path).map_err(|e| MeshLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::load_from_reader(BufReader::new(file), path, Some(path), options, textures)
    }

    fn load_from_memory(
        data: &[u8],
        options: &LoadOptions,
        textures: &mut dyn TextureLoader,
    ) -> Result<MeshData> {
        Self::load_from_reader(data, Path::new("<memory>"), None, options, textures)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

/// 单遍解析的全部可变状态
struct ParseState<'a> {
    options: &'a LoadOptions,
    material_root: PathBuf,
    textures: &'a mut dyn TextureLoader,
    attributes: AttributeStore,
    dedup: VertexDeduplicator,
    materials: MaterialTable,
    partitioner: SubmeshPartitioner,
    indices: Vec<u32>,
    /// 当前面记录已解析的顶点索引，逐面复用
    corners: Vec<u32>,
}

impl<'a> ParseState<'a> {
    fn new(options: &'a LoadOptions, material_root: PathBuf, textures: &'a mut dyn TextureLoader) -> Self {
        Self {
            options,
            material_root,
            textures,
            attributes: AttributeStore::new(),
            dedup: VertexDeduplicator::new(),
            materials: MaterialTable::new(),
            partitioner: SubmeshPartitioner::new(),
            indices: Vec::new(),
            corners: Vec::new(),
        }
    }

    fn parse_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line_no, keyword)?;
                self.attributes.push_position(Vector3::new(x, y, z));
            }
            "vt" => {
                let [u] = parse_floats::<1>(&mut tokens, line_no, keyword)?;
                let v = optional_float(&mut tokens, line_no, keyword, 0.0)?;
                self.attributes.push_texcoord(Vector2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&mut tokens, line_no, keyword)?;
                self.attributes.push_normal(Vector3::new(x, y, z));
            }
            "mtllib" => {
                // 整行作为一个文件名，允许文件名中含空格
                required_operand(&mut tokens, line_no, keyword)?;
                self.load_material_library(rest_of_line(line, keyword))?;
            }
            "usemtl" => {
                let name = required_operand(&mut tokens, line_no, keyword)?;
                self.use_material(line_no, name)?;
            }
            "f" => self.add_face(line_no, tokens)?,
            _ => {}
        }
        Ok(())
    }

    fn load_material_library(&mut self, file: &str) -> Result<()> {
        let path = self.material_root.join(file);
        load_mtl_file(&path, &mut self.materials, &mut *self.textures)?;
        Ok(())
    }

    fn use_material(&mut self, line_no: usize, name: &str) -> Result<()> {
        let material = match self.materials.id_of(name) {
            Some(id) => id,
            None if self.options.allow_undeclared_materials => {
                tracing::warn!(line = line_no, name, "usemtl references undeclared material, using defaults");
                self.materials.insert(Material::new(name))
            }
            None => {
                return Err(MeshLoadError::UnknownMaterial {
                    line: line_no,
                    name: name.to_string(),
                }
                .into())
            }
        };

        let face_start = (self.indices.len() / 3) as u32;
        self.partitioner.open(material, face_start);
        tracing::debug!(line = line_no, material = name, face_start, "Submesh opened");
        Ok(())
    }

    fn add_face<'t>(&mut self, line_no: usize, tokens: impl Iterator<Item = &'t str>) -> Result<()> {
        if !self.partitioner.is_open() {
            return Err(MeshLoadError::MissingActiveSubmesh { line: line_no }.into());
        }

        self.corners.clear();
        for token in tokens {
            let key = FaceVertexKey::parse(token).ok_or_else(|| MeshLoadError::MalformedFaceToken {
                line: line_no,
                token: token.to_string(),
            })?;
            let index = self
                .dedup
                .resolve(key, &self.attributes)
                .map_err(|e| MeshLoadError::IndexOutOfRange {
                    line: line_no,
                    kind: e.kind,
                    index: e.index,
                    len: e.len,
                })?;
            self.corners.push(index);
        }

        if self.corners.len() < 3 {
            return Err(MeshLoadError::DegenerateFace {
                line: line_no,
                count: self.corners.len(),
            }
            .into());
        }

        for triangle in fan_triangulate(&self.corners) {
            self.indices.extend_from_slice(&triangle);
        }
        self.partitioner
            .extend_active(fan_triangle_count(self.corners.len()) as u32);
        Ok(())
    }

    fn finish(self, name: &str) -> MeshData {
        let mut mesh = MeshData::with_name(name);
        mesh.vertices = self.dedup.into_vertices();
        mesh.indices = self.indices;
        mesh.submeshes = self.partitioner.finish();
        mesh.materials = self.materials;

        if self.options.normalize {
            mesh.normalize();
        }
        mesh
    }
}
