/// 原始属性存储
///
/// 按文件顺序保存 `v`/`vt`/`vn` 记录，不做任何去重。
/// 文件中的索引从 1 开始，内部存储从 0 开始。

use std::fmt;

use crate::core::math::{Vector2, Vector3};
use super::dedup::FaceVertexKey;
use super::vertex::Vertex;

/// 属性种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Texcoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Position => write!(f, "position"),
            AttributeKind::Texcoord => write!(f, "texcoord"),
            AttributeKind::Normal => write!(f, "normal"),
        }
    }
}

/// 面记录引用了超出存储范围的属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeOutOfRange {
    pub kind: AttributeKind,
    /// 文件中的 1-based 索引
    pub index: u32,
    /// 该属性当前的数量
    pub len: usize,
}

/// 位置、纹理坐标、法线三个只增不减的列表
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    positions: Vec<Vector3>,
    texcoords: Vec<Vector2>,
    normals: Vec<Vector3>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&mut self, position: Vector3) {
        self.positions.push(position);
    }

    pub fn push_texcoord(&mut self, texcoord: Vector2) {
        self.texcoords.push(texcoord);
    }

    pub fn push_normal(&mut self, normal: Vector3) {
        self.normals.push(normal);
    }

    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    pub fn texcoords(&self) -> &[Vector2] {
        &self.texcoords
    }

    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// 按 1-based 的 `(p, t, n)` 索引组装一个顶点
    pub fn resolve(&self, key: FaceVertexKey) -> Result<Vertex, AttributeOutOfRange> {
        let position = lookup(&self.positions, key.position, AttributeKind::Position)?;
        let texcoord = lookup(&self.texcoords, key.texcoord, AttributeKind::Texcoord)?;
        let normal = lookup(&self.normals, key.normal, AttributeKind::Normal)?;

        Ok(Vertex::new(position.into(), normal.into(), texcoord.into()))
    }
}

fn lookup<T: Copy>(items: &[T], index: u32, kind: AttributeKind) -> Result<T, AttributeOutOfRange> {
    (index as usize)
        .checked_sub(1)
        .and_then(|i| items.get(i).copied())
        .ok_or(AttributeOutOfRange {
            kind,
            index,
            len: items.len(),
        })
}
