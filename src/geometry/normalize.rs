/// 包围盒与归一化
///
/// 把顶点位置平移到原点并按最长轴统一缩放，
/// 使模型落在最长边为 1 的、以原点为中心的包围盒内。

use crate::core::math::Vector3;
use super::vertex::Vertex;

/// 轴对齐包围盒，以中心和各轴宽度表示
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vector3,
    pub extent: Vector3,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Vector3::zeros(),
            extent: Vector3::zeros(),
        }
    }
}

impl Bounds {
    /// 计算顶点位置的包围盒，没有顶点时返回 `None`
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let (min, max) = min_max(vertices)?;
        Some(Self {
            center: (min + max) * 0.5,
            extent: max - min,
        })
    }

    /// 三个轴中最大的宽度
    #[inline]
    pub fn largest_extent(&self) -> f32 {
        self.extent.max()
    }

    pub fn min(&self) -> Vector3 {
        self.center - self.extent * 0.5
    }

    pub fn max(&self) -> Vector3 {
        self.center + self.extent * 0.5
    }
}

fn min_max(vertices: &[Vertex]) -> Option<(Vector3, Vector3)> {
    let mut positions = vertices.iter().map(|v| Vector3::from(v.position));
    let first = positions.next()?;
    Some(positions.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p))))
}

/// 原地归一化顶点位置，返回归一化之后重新计算的包围盒
///
/// 每个位置变为 `(p - center) / scale`，`scale` 为最长轴宽度。
/// 没有顶点时返回全零包围盒；最长轴宽度为 0（所有顶点重合）时只做平移。
/// 这是一次性的终结步骤，对已经归一化的数据再次调用不保证不变。
pub fn normalize_vertices(vertices: &mut [Vertex]) -> Bounds {
    let Some(before) = Bounds::from_vertices(vertices) else {
        return Bounds::default();
    };

    let mut scale = before.largest_extent();
    if !(scale.is_finite() && scale > 0.0) {
        tracing::warn!(extent = scale, "Degenerate bounding box, recentering without scaling");
        scale = 1.0;
    }

    for vertex in vertices.iter_mut() {
        let position = (Vector3::from(vertex.position) - before.center) / scale;
        vertex.position = position.into();
    }

    let after = Bounds::from_vertices(vertices).unwrap_or_default();
    tracing::debug!(
        center_before = ?before.center,
        scale,
        extent_after = ?after.extent,
        "Normalized vertex positions"
    );
    after
}
