/// 多边形三角化
///
/// 扇形三角化：以多边形第一个顶点为锚点，
/// 第 j 个三角形为 `(v0, v(j-1), vj)`，保持原有的环绕方向。
/// 假设输入多边形是凸的、共面的，凹多边形不会报错但结果可能不正确。

/// k 边形产生的三角形数量
#[inline]
pub fn fan_triangle_count(corner_count: usize) -> usize {
    corner_count.saturating_sub(2)
}

/// 对已解析的顶点索引做扇形三角化
///
/// 少于 3 个角点时不产生任何三角形。
pub fn fan_triangulate(corners: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    (2..corners.len()).map(move |j| [corners[0], corners[j - 1], corners[j]])
}
