//! 数学类型
//!
//! 基于 `nalgebra`，只保留加载器需要的向量类型。
//! 顶点本身使用 `[f32; N]` 数组存储（见 `geometry::vertex`），
//! 这里的类型用于属性存储、材质颜色和包围盒计算。

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3};

pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;

/// 浮点数比较的 epsilon
pub const EPSILON: f32 = 1e-6;

/// 判断两个向量在 `tolerance` 内是否相等（逐分量）
pub fn approx_eq(a: &Vector3, b: &Vector3, tolerance: f32) -> bool {
    (a - b).amax() <= tolerance
}
