/// 几何体加载和处理模块
///
/// 把 OBJ/MTL 文本转换为去重、带索引、按材质划分的三角形网格。
///
/// # 模块结构
///
/// - `vertex`: 输出顶点（位置/法线/UV）
/// - `attributes`: 文件顺序的原始属性存储
/// - `dedup`: `(p, t, n)` 三元组去重
/// - `triangulate`: 扇形三角化
/// - `submesh`: 按材质划分子网格
/// - `material`: 材质与材质表
/// - `texture`: 贴图加载接口
/// - `normalize`: 包围盒与归一化
/// - `mesh`: 网格数据
/// - `loaders`: OBJ/MTL 加载器
///
/// # 架构设计
///
/// ```text
/// 文本 (OBJ + MTL)
///     ↓
/// AttributeStore (+ MaterialTable)
///     ↓
/// VertexDeduplicator (每个 p/t/n)
///     ↓
/// fan_triangulate (每个 f 记录)
///     ↓
/// SubmeshPartitioner (每个 usemtl)
///     ↓
/// normalize_vertices (可选的终结步骤)
///     ↓
/// MeshData (交给渲染层)
/// ```

pub mod vertex;
pub mod attributes;
pub mod dedup;
pub mod triangulate;
pub mod submesh;
pub mod material;
pub mod texture;
pub mod normalize;
pub mod mesh;
pub mod loaders;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::{MeshData, MeshSummary};
pub use submesh::SubMesh;
pub use material::{Material, MaterialId, MaterialTable};
pub use normalize::Bounds;
