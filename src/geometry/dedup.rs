/// 面顶点去重
///
/// 为每个不同的 `(p, t, n)` 索引三元组分配一个稳定的输出顶点索引。
/// 判等只看索引是否完全相同，数值相同但索引不同的属性仍然是不同的顶点。

use std::collections::HashMap;

use super::attributes::{AttributeOutOfRange, AttributeStore};
use super::vertex::Vertex;

/// 面记录中一个角点的属性索引（1-based，按文件原样）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVertexKey {
    pub position: u32,
    pub texcoord: u32,
    pub normal: u32,
}

impl FaceVertexKey {
    #[inline]
    pub fn new(position: u32, texcoord: u32, normal: u32) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// 解析 `p/t/n` 形式的面顶点
    ///
    /// 三个分量都必须是正整数，`p//n`、`p/t`、`p` 以及负索引都返回 `None`。
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split('/');
        let position = parse_index(parts.next()?)?;
        let texcoord = parse_index(parts.next()?)?;
        let normal = parse_index(parts.next()?)?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(position, texcoord, normal))
    }
}

fn parse_index(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|&i| i > 0)
}

/// 顶点去重器
///
/// 哈希表负责查找，顶点缓冲的长度决定新索引，
/// 因此索引按键第一次出现的顺序从 0 开始递增。
#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    lookup: HashMap<FaceVertexKey, u32>,
    vertices: Vec<Vertex>,
}

impl VertexDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回 `key` 对应的顶点索引，第一次出现时从属性存储中组装新顶点
    pub fn resolve(
        &mut self,
        key: FaceVertexKey,
        attributes: &AttributeStore,
    ) -> Result<u32, AttributeOutOfRange> {
        if let Some(&index) = self.lookup.get(&key) {
            return Ok(index);
        }

        let vertex = attributes.resolve(key)?;
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.lookup.insert(key, index);
        Ok(index)
    }

    /// 已分配的索引（不会创建新顶点）
    pub fn index_of(&self, key: &FaceVertexKey) -> Option<u32> {
        self.lookup.get(key).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
