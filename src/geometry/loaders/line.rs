/// 行分词工具
///
/// OBJ 与 MTL 共用：去掉首尾空白和行尾注释，拆出指令关键字与参数文本。

use crate::core::error::ParseError;
use std::io::BufRead;
use std::str::FromStr;

/// 一行中的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub keyword: &'a str,
    /// 关键字之后的参数文本，已去掉开头的空白
    pub args: &'a str,
}

/// 拆分一行
///
/// 空行和纯注释行返回 `None`。`#` 及其之后的内容视为注释。
pub fn tokenize(line: &str) -> Option<Directive<'_>> {
    let line = line.trim();
    let line = match line.find('#') {
        Some(comment) => line[..comment].trim_end(),
        None => line,
    };
    if line.is_empty() {
        return None;
    }

    match line.find(char::is_whitespace) {
        Some(split) => Some(Directive {
            keyword: &line[..split],
            args: line[split..].trim_start(),
        }),
        None => Some(Directive { keyword: line, args: "" }),
    }
}

/// 逐行读取并回调每条指令，`line` 从 1 开始
///
/// 回调返回错误时立即停止。
pub fn for_each_directive<R, F>(reader: R, mut handle: F) -> Result<usize, ParseError>
where
    R: BufRead,
    F: FnMut(usize, Directive<'_>) -> Result<(), ParseError>,
{
    let mut line_count = 0;
    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line.map_err(|source| ParseError::Read { line: line_number, source })?;
        line_count = line_number;
        if let Some(directive) = tokenize(&line) {
            handle(line_number, directive)?;
        }
    }
    Ok(line_count)
}

/// 把参数按空白拆分并逐个解析
pub fn components<T: FromStr>(line: usize, directive: &str, args: &str) -> Result<Vec<T>, ParseError> {
    args.split_whitespace()
        .map(|field| {
            field.parse::<T>().map_err(|_| ParseError::MalformedAttribute {
                line,
                directive: directive.to_string(),
                text: field.to_string(),
            })
        })
        .collect()
}

/// 恰好 N 个数值分量
pub fn fixed<T: FromStr + Copy + Default, const N: usize>(
    line: usize,
    directive: &str,
    args: &str,
    expected: &'static str,
) -> Result<[T; N], ParseError> {
    let values = components::<T>(line, directive, args)?;
    if values.len() != N {
        return Err(ParseError::WrongComponentCount {
            line,
            directive: directive.to_string(),
            expected,
            found: values.len(),
        });
    }
    let mut out = [T::default(); N];
    out.copy_from_slice(&values);
    Ok(out)
}

/// 需要非空名称参数的指令（`o`、`g`、`usemtl`、`newmtl` 等）
pub fn required_name<'a>(line: usize, directive: &Directive<'a>) -> Result<&'a str, ParseError> {
    if directive.args.is_empty() {
        return Err(ParseError::EmptyDirectiveArgument {
            line,
            directive: directive.keyword.to_string(),
        });
    }
    Ok(directive.args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_tokenize_basic() {
        let directive = tokenize("  v 1.0 2.0 3.0  ").unwrap();
        assert_eq!(directive.keyword, "v");
        assert_eq!(directive.args, "1.0 2.0 3.0");
    }

    #[test]
    fn test_tokenize_skips_blank_and_comment() {
        assert_eq!(tokenize(""), None);
        assert_eq!(tokenize("    "), None);
        assert_eq!(tokenize("# a comment"), None);
        assert_eq!(tokenize("   # indented comment"), None);
    }

    #[test]
    fn test_tokenize_strips_trailing_comment() {
        let directive = tokenize("s 1 # smooth on").unwrap();
        assert_eq!(directive.keyword, "s");
        assert_eq!(directive.args, "1");
    }

    #[test]
    fn test_tokenize_keyword_only() {
        let directive = tokenize("usemtl").unwrap();
        assert_eq!(directive.keyword, "usemtl");
        assert_eq!(directive.args, "");
    }

    #[test]
    fn test_tokenize_keeps_inner_spacing() {
        let directive = tokenize("o\tMy  Object\r").unwrap();
        assert_eq!(directive.keyword, "o");
        assert_eq!(directive.args, "My  Object");
    }

    #[test]
    fn test_fixed_components() {
        let v: [f32; 3] = fixed(1, "vn", "0 1 0", "3").unwrap();
        assert_eq!(v, [0.0, 1.0, 0.0]);

        let err = fixed::<f32, 3>(2, "vn", "0 1", "3").unwrap_err();
        assert!(matches!(err, ParseError::WrongComponentCount { found: 2, .. }));

        let err = fixed::<f32, 3>(3, "vn", "0 one 0", "3").unwrap_err();
        assert!(matches!(err, ParseError::MalformedAttribute { line: 3, .. }));
    }

    #[test]
    fn test_for_each_directive_line_numbers() {
        let input = "# header\n\nv 0 0 0\nf 1 1 1\n";
        let mut seen = Vec::new();
        let count = for_each_directive(Cursor::new(input), |line, directive| {
            seen.push((line, directive.keyword.to_string()));
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 4);
        assert_eq!(seen, vec![(3, "v".to_string()), (4, "f".to_string())]);
    }
}
