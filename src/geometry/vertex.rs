/// 顶点定义模块
///
/// 定义去重后输出的顶点结构，包含位置、法线和UV坐标。

use bytemuck::{Pod, Zeroable};

/// 位置/法线/纹理坐标顶点
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐，
/// 渲染层可以直接用 `bytemuck::cast_slice` 上传整个顶点缓冲。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - texcoord: 8 bytes (2 * f32)
/// - **总计**: 32 bytes
///
/// # 示例
///
/// ```rust
/// use tri_mesh::geometry::vertex::Vertex;
///
/// let vertex = Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]);
/// assert_eq!(vertex.texcoord, [0.5, 0.5]);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)，按文件原样保存，不做归一化
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }
}
