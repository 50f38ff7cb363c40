/// 网格数据结构模块
///
/// 定义加载完成后交给渲染层的 CPU 侧网格：
/// 去重后的顶点缓冲、全局索引缓冲、按材质划分的子网格、材质表和包围盒。

use std::fmt;

use crate::core::math::Vector3;
use super::material::{Material, MaterialTable};
use super::normalize::{normalize_vertices, Bounds};
use super::submesh::SubMesh;
use super::vertex::Vertex;

/// CPU侧网格数据
///
/// 网格独占它的顶点、索引、子网格和材质表；
/// 子网格通过 `MaterialId` 引用材质表中的条目。
///
/// # 示例
///
/// ```rust
/// use tri_mesh::geometry::mesh::MeshData;
/// use tri_mesh::geometry::vertex::Vertex;
///
/// let mut mesh = MeshData::with_name("Triangle");
/// mesh.vertices = vec![
///     Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
///     Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
///     Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
/// ];
/// mesh.indices = vec![0, 1, 2];
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点数组，按 `(p, t, n)` 第一次出现的顺序排列
    pub vertices: Vec<Vertex>,

    /// 索引数组
    ///
    /// 三角形顶点索引，每3个索引定义一个三角形。
    pub indices: Vec<u32>,

    /// 子网格列表，按 `usemtl` 出现顺序排列
    pub submeshes: Vec<SubMesh>,

    /// 材质表
    pub materials: MaterialTable,

    /// 归一化之后的包围盒；未归一化时为全零
    pub bounds: Bounds,

    /// 网格名称（通常是文件名）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// 子网格绑定的材质
    pub fn material_of(&self, submesh: &SubMesh) -> Option<&Material> {
        self.materials.get(submesh.material)
    }

    /// 子网格在全局索引缓冲中的索引
    pub fn submesh_indices(&self, submesh: &SubMesh) -> &[u32] {
        submesh.indices(&self.indices)
    }

    /// 顶点缓冲的原始字节，供 GPU 上传
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 索引缓冲的原始字节
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 归一化到以原点为中心、最长边为 1 的包围盒，并记录新的包围盒
    ///
    /// 只应调用一次（加载器在 `normalize` 选项打开时已经调用过）。
    pub fn normalize(&mut self) -> Bounds {
        self.bounds = normalize_vertices(&mut self.vertices);
        self.bounds
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数（每个三角形3个顶点）
    /// - 所有索引都在有效范围内
    /// - 子网格按顺序首尾相接，完整覆盖索引缓冲
    /// - 子网格引用的材质存在
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "索引数量必须是3的倍数，当前为: {}",
                self.indices.len()
            ));
        }

        let vertex_count = self.vertices.len();
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(format!(
                "索引 {} 处的值 {} 超出顶点范围 (共 {} 个顶点)",
                i, index, vertex_count
            ));
        }

        let mut expected_start = 0u32;
        for (i, submesh) in self.submeshes.iter().enumerate() {
            if submesh.face_start != expected_start {
                return Err(format!(
                    "子网格 {} 不连续: start={}, 期望 {}",
                    i, submesh.face_start, expected_start
                ));
            }
            if self.material_of(submesh).is_none() {
                return Err(format!("子网格 {} 引用了不存在的材质", i));
            }
            expected_start += submesh.face_count;
        }

        if !self.submeshes.is_empty() && expected_start as usize != self.triangle_count() {
            return Err(format!(
                "子网格只覆盖了 {} 个三角形，共 {} 个",
                expected_start,
                self.triangle_count()
            ));
        }

        Ok(())
    }

    /// 模型信息汇总
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            vertex_count: self.vertex_count(),
            triangle_count: self.triangle_count(),
            submeshes: self
                .submeshes
                .iter()
                .map(|submesh| SubMeshSummary {
                    material: self
                        .material_of(submesh)
                        .map(|m| m.name.clone())
                        .unwrap_or_default(),
                    triangle_count: submesh.face_count as usize,
                })
                .collect(),
            center: self.bounds.center,
            extent: self.bounds.extent,
        }
    }
}

/// 模型信息（顶点数、三角形数、子网格及包围盒）
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub submeshes: Vec<SubMeshSummary>,
    pub center: Vector3,
    pub extent: Vector3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubMeshSummary {
    pub material: String,
    pub triangle_count: usize,
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Vertices: {}", self.vertex_count)?;
        writeln!(f, "# Triangles: {}", self.triangle_count)?;
        writeln!(f, "Total {} submeshes loaded", self.submeshes.len())?;
        for (i, submesh) in self.submeshes.iter().enumerate() {
            writeln!(f, "SubMesh {} with material: {}", i, submesh.material)?;
            writeln!(f, "Num. triangles in the submesh: {}", submesh.triangle_count)?;
        }
        writeln!(
            f,
            "Model Center: {}, {}, {}",
            self.center.x, self.center.y, self.center.z
        )?;
        write!(
            f,
            "Model Extent: {} x {} x {}",
            self.extent.x, self.extent.y, self.extent.z
        )
    }
}
