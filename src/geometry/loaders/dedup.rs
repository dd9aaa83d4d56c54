/// 顶点去重
///
/// 把 (位置, 纹理坐标, 法线) 组合映射到顶点缓冲区中的固定槽位，首次出现时插入。
/// 比较按位精确，没有容差。
/// 相同的组合无论出现在哪个子对象或材质下都只占一个槽位。

use super::attributes::AttributeTable;
use super::face::FaceIndex;
use crate::core::error::{AttributeKind, ParseError};
use crate::geometry::vertex::{Vertex, VertexKey};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexKey, u32>,
}

impl VertexDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回顶点的槽位，未见过时追加
    ///
    /// 槽位超出 `u32` 范围时返回 `None`，缓冲区不变。
    pub fn intern(&mut self, vertex: Vertex) -> Option<u32> {
        let key = vertex.key();
        if let Some(&slot) = self.lookup.get(&key) {
            return Some(slot);
        }
        let slot = next_slot(self.vertices.len())?;
        self.lookup.insert(key, slot);
        self.vertices.push(vertex);
        Some(slot)
    }

    /// 查属性表并去重；0 号纹理坐标/法线替换为缺失哨兵
    pub fn intern_face_index(
        &mut self,
        attributes: &AttributeTable,
        line: usize,
        index: FaceIndex,
    ) -> Result<u32, ParseError> {
        let position = attributes.position(line, index.position)?;
        let texcoord = attributes.texcoord(line, index.texcoord)?;
        let normal = attributes.normal(line, index.normal)?;
        self.intern(Vertex::new(position, texcoord, normal))
            .ok_or(ParseError::IndexOutOfRange {
                line,
                kind: AttributeKind::Position,
                index: index.position,
                len: self.vertices.len(),
            })
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

fn next_slot(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}
