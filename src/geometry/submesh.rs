/// 子网格划分
///
/// 每个 `usemtl` 关闭当前子网格并打开一个绑定到新材质的子网格。
/// 子网格只记录它在全局索引缓冲中的三角形范围，
/// 所有子网格按顺序拼接起来正好等于全局索引缓冲。

use super::material::MaterialId;

/// 子网格描述符
///
/// 对应一个 `usemtl` 分组，同一子网格内的三角形共享一个材质。
///
/// # 示例
///
/// ```rust
/// use tri_mesh::geometry::material::MaterialId;
/// use tri_mesh::geometry::submesh::SubMesh;
///
/// let submesh = SubMesh::new(0, MaterialId::new(0), 10, 20);
/// assert_eq!(submesh.index_start(), 30);
/// assert_eq!(submesh.index_count(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMesh {
    /// 子网格ID（按 `usemtl` 出现顺序）
    pub id: u32,

    /// 材质在材质表中的位置
    pub material: MaterialId,

    /// 起始面索引
    ///
    /// 在索引数组中的起始位置（以三角形为单位）。
    pub face_start: u32,

    /// 面数量（三角形数量）
    pub face_count: u32,
}

impl SubMesh {
    #[inline]
    pub fn new(id: u32, material: MaterialId, face_start: u32, face_count: u32) -> Self {
        Self {
            id,
            material,
            face_start,
            face_count,
        }
    }

    /// 获取索引起始位置（以索引数量计，非三角形数）
    #[inline]
    pub fn index_start(&self) -> u32 {
        self.face_start * 3
    }

    /// 获取索引数量（非三角形数）
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.face_count * 3
    }

    /// 在全局索引缓冲中截取本子网格的索引
    ///
    /// 范围超出 `indices` 时返回空切片。
    pub fn indices<'a>(&self, indices: &'a [u32]) -> &'a [u32] {
        let start = self.index_start() as usize;
        let end = start + self.index_count() as usize;
        indices.get(start..end).unwrap_or(&[])
    }
}

/// 解析过程中的子网格累加器
///
/// 当前打开的子网格是一个值，关闭时直接移动进已完成列表。
#[derive(Debug, Default)]
pub struct SubmeshPartitioner {
    open: Option<SubMesh>,
    finished: Vec<SubMesh>,
}

impl SubmeshPartitioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 关闭当前子网格（如果有），并打开一个绑定到 `material` 的新子网格
    ///
    /// `face_start` 是全局索引缓冲当前的三角形数。
    pub fn open(&mut self, material: MaterialId, face_start: u32) {
        self.close();
        let id = self.finished.len() as u32;
        self.open = Some(SubMesh::new(id, material, face_start, 0));
    }

    /// 当前是否有打开的子网格
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// 当前打开的子网格
    pub fn active(&self) -> Option<&SubMesh> {
        self.open.as_ref()
    }

    /// 把 `faces` 个三角形计入当前子网格，没有打开的子网格时返回 `false`
    pub fn extend_active(&mut self, faces: u32) -> bool {
        match self.open.as_mut() {
            Some(submesh) => {
                submesh.face_count += faces;
                true
            }
            None => false,
        }
    }

    fn close(&mut self) {
        if let Some(submesh) = self.open.take() {
            if submesh.face_count == 0 {
                tracing::debug!(id = submesh.id, "Closing empty submesh");
            }
            self.finished.push(submesh);
        }
    }

    /// 关闭最后一个子网格，返回按打开顺序排列的全部子网格
    pub fn finish(mut self) -> Vec<SubMesh> {
        self.close();
        self.finished
    }
}
