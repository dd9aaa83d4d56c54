/// 面索引规范化
///
/// 把 `g`、`g/t`、`g//n`、`g/t/n` 四种写法统一成 (位置, 纹理坐标, 法线) 三元组，
/// 纹理坐标与法线缺失时为 0。

use crate::core::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceIndex {
    pub position: usize,
    /// 0 表示缺失
    pub texcoord: usize,
    /// 0 表示缺失
    pub normal: usize,
}

impl FaceIndex {
    pub fn new(position: usize, texcoord: usize, normal: usize) -> Self {
        Self { position, texcoord, normal }
    }

    /// 解析一个面角点
    ///
    /// 只检查格式，越界检查在查属性表时进行。
    pub fn parse(line: usize, token: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::MalformedFaceIndex {
            line,
            token: token.to_string(),
        };
        let field = |text: &str| text.parse::<usize>().map_err(|_| malformed());

        let mut parts = token.split('/');
        let fields = (parts.next(), parts.next(), parts.next(), parts.next());
        match fields {
            (Some(g), None, None, None) => Ok(Self::new(field(g)?, 0, 0)),
            (Some(g), Some(t), None, None) if !t.is_empty() => Ok(Self::new(field(g)?, field(t)?, 0)),
            (Some(g), Some(""), Some(n), None) if !n.is_empty() => Ok(Self::new(field(g)?, 0, field(n)?)),
            (Some(g), Some(t), Some(n), None) if !t.is_empty() && !n.is_empty() => {
                Ok(Self::new(field(g)?, field(t)?, field(n)?))
            }
            _ => Err(malformed()),
        }
    }
}
