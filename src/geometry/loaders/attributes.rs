/// 属性表
///
/// `v` / `vt` / `vn` 三张只追加的表。对外按 OBJ 惯例从 1 开始编号，
/// 纹理坐标与法线的 0 号保留为 "缺失"。

use super::line::components;
use crate::core::error::{AttributeKind, ParseError};
use crate::geometry::vertex::{Normal, Position, TexCoord};

#[derive(Debug, Default, Clone)]
pub struct AttributeTable {
    positions: Vec<Position>,
    texcoords: Vec<TexCoord>,
    normals: Vec<Normal>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `v x y z [w]`，w 缺省为 1.0
    pub fn append_position(&mut self, line: usize, args: &str) -> Result<(), ParseError> {
        let values = components::<f32>(line, "v", args)?;
        let position = match values[..] {
            [x, y, z] => [x, y, z, 1.0],
            [x, y, z, w] => [x, y, z, w],
            _ => return Err(wrong_count(line, "v", "3 or 4", values.len())),
        };
        self.positions.push(position);
        Ok(())
    }

    /// `vt u v [w]`，w 缺省为 0.0
    pub fn append_texcoord(&mut self, line: usize, args: &str) -> Result<(), ParseError> {
        let values = components::<f32>(line, "vt", args)?;
        let texcoord = match values[..] {
            [u, v] => [u, v, 0.0],
            [u, v, w] => [u, v, w],
            _ => return Err(wrong_count(line, "vt", "2 or 3", values.len())),
        };
        self.texcoords.push(texcoord);
        Ok(())
    }

    /// `vn x y z`
    pub fn append_normal(&mut self, line: usize, args: &str) -> Result<(), ParseError> {
        let values = components::<f32>(line, "vn", args)?;
        let normal = match values[..] {
            [x, y, z] => [x, y, z],
            _ => return Err(wrong_count(line, "vn", "3", values.len())),
        };
        self.normals.push(normal);
        Ok(())
    }

    /// 按 1 开始的编号取位置，0 与越界都是错误
    pub fn position(&self, line: usize, index: usize) -> Result<Position, ParseError> {
        lookup(&self.positions, line, index, AttributeKind::Position)
    }

    /// 按 1 开始的编号取纹理坐标，0 表示缺失
    pub fn texcoord(&self, line: usize, index: usize) -> Result<Option<TexCoord>, ParseError> {
        if index == 0 {
            return Ok(None);
        }
        lookup(&self.texcoords, line, index, AttributeKind::TexCoord).map(Some)
    }

    /// 按 1 开始的编号取法线，0 表示缺失
    pub fn normal(&self, line: usize, index: usize) -> Result<Option<Normal>, ParseError> {
        if index == 0 {
            return Ok(None);
        }
        lookup(&self.normals, line, index, AttributeKind::Normal).map(Some)
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn texcoord_count(&self) -> usize {
        self.texcoords.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len()
    }
}

fn lookup<T: Copy>(table: &[T], line: usize, index: usize, kind: AttributeKind) -> Result<T, ParseError> {
    index
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .ok_or(ParseError::IndexOutOfRange {
            line,
            kind,
            index,
            len: table.len(),
        })
}

fn wrong_count(line: usize, directive: &str, expected: &'static str, found: usize) -> ParseError {
    ParseError::WrongComponentCount {
        line,
        directive: directive.to_string(),
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_w_defaults_to_one() {
        let mut table = AttributeTable::new();
        table.append_position(1, "1 2 3").unwrap();
        table.append_position(2, "4 5 6 0.5").unwrap();
        assert_eq!(table.position(3, 1).unwrap(), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(table.position(3, 2).unwrap(), [4.0, 5.0, 6.0, 0.5]);
    }

    #[test]
    fn test_texcoord_w_defaults_to_zero() {
        let mut table = AttributeTable::new();
        table.append_texcoord(1, "0.5 0.5").unwrap();
        assert_eq!(table.texcoord(2, 1).unwrap(), Some([0.5, 0.5, 0.0]));
        assert_eq!(table.texcoord(2, 0).unwrap(), None);
    }

    #[test]
    fn test_component_counts() {
        let mut table = AttributeTable::new();
        assert!(matches!(
            table.append_position(1, "1 2"),
            Err(ParseError::WrongComponentCount { found: 2, .. })
        ));
        assert!(table.append_position(1, "1 2 3 4 5").is_err());
        assert!(table.append_texcoord(1, "1").is_err());
        assert!(table.append_normal(1, "0 1").is_err());
        assert!(table.append_normal(1, "0 1 0 0").is_err());
        assert_eq!(table.position_count(), 0);
        assert_eq!(table.texcoord_count(), 0);
        assert_eq!(table.normal_count(), 0);
    }

    #[test]
    fn test_non_numeric_field() {
        let mut table = AttributeTable::new();
        let err = table.append_position(5, "1 two 3").unwrap_err();
        assert!(matches!(err, ParseError::MalformedAttribute { line: 5, .. }));
    }

    #[test]
    fn test_lookup_bounds() {
        let mut table = AttributeTable::new();
        table.append_position(1, "0 0 0").unwrap();
        table.append_normal(2, "0 0 1").unwrap();

        assert!(matches!(
            table.position(3, 0),
            Err(ParseError::IndexOutOfRange { kind: AttributeKind::Position, index: 0, .. })
        ));
        assert!(matches!(
            table.position(3, 2),
            Err(ParseError::IndexOutOfRange { len: 1, .. })
        ));
        assert!(matches!(
            table.normal(3, 2),
            Err(ParseError::IndexOutOfRange { kind: AttributeKind::Normal, .. })
        ));
        assert!(table.texcoord(3, 1).is_err());
    }
}
