/// 顶点定义模块
///
/// 定义解析结果中的去重顶点结构，以及用于去重查找的按位比较键。

use bytemuck::{Pod, Zeroable};
use std::hash::{Hash, Hasher};

/// 位置 (x, y, z, w)，源数据只有 3 个分量时 w = 1.0
pub type Position = [f32; 4];

/// 纹理坐标 (u, v, w)，源数据只有 2 个分量时 w = 0.0
pub type TexCoord = [f32; 3];

/// 法线 (nx, ny, nz)
pub type Normal = [f32; 3];

/// "缺失" 哨兵值：每个分量都是 `f32::MAX`
///
/// 没有纹理坐标或法线的角点都使用同一个哨兵，因此去重时
/// 两个 "无纹理坐标" 的顶点被视为同一个值。
pub const ABSENT: [f32; 3] = [f32::MAX; 3];

/// 去重后的顶点
///
/// 内存布局与 GPU 兼容，可以直接用 `bytemuck::cast_slice` 上传整个顶点缓冲区。
///
/// # 内存布局
///
/// - position: 16 bytes (4 * f32)
/// - texcoord: 12 bytes (3 * f32)
/// - normal: 12 bytes (3 * f32)
/// - **总计**: 40 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Position,

    /// 缺失时为 [`ABSENT`]
    pub texcoord: TexCoord,

    /// 缺失时为 [`ABSENT`]
    pub normal: Normal,
}

impl Vertex {
    #[inline]
    pub fn new(position: Position, texcoord: Option<TexCoord>, normal: Option<Normal>) -> Self {
        Self {
            position,
            texcoord: texcoord.unwrap_or(ABSENT),
            normal: normal.unwrap_or(ABSENT),
        }
    }

    #[inline]
    pub fn has_texcoord(&self) -> bool {
        self.texcoord != ABSENT
    }

    #[inline]
    pub fn has_normal(&self) -> bool {
        self.normal != ABSENT
    }

    /// 纹理坐标；哨兵值映射为 `None`
    pub fn texcoord(&self) -> Option<TexCoord> {
        self.has_texcoord().then_some(self.texcoord)
    }

    /// 法线；哨兵值映射为 `None`
    pub fn normal(&self) -> Option<Normal> {
        self.has_normal().then_some(self.normal)
    }

    /// 去重用的按位比较键
    pub fn key(&self) -> VertexKey {
        let mut bits = [0u32; 10];
        for (slot, value) in bits
            .iter_mut()
            .zip(self.position.iter().chain(&self.texcoord).chain(&self.normal))
        {
            *slot = value.to_bits();
        }
        VertexKey(bits)
    }
}

/// 顶点的按位键
///
/// 浮点分量按 `to_bits()` 精确比较，不做任何容差匹配：
/// `0.1` 和 `0.1000001` 是两个不同的顶点。
/// 注意 `0.0` 与 `-0.0` 的位模式不同，也会被视为不同顶点。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexKey([u32; 10]);

impl Hash for VertexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
