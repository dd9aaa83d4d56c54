//! 错误处理模块
//!
//! 定义了解析器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 每个解析错误都带有出错的源文件行号（从 1 开始）
//! - 任何错误都会立即中止整个解析，不做部分恢复
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, ObjSceneError>;

/// obj_scene 的错误类型
#[derive(Debug)]
pub enum ObjSceneError {
    /// 配置错误
    Config(ConfigError),

    /// OBJ / MTL 解析错误
    Parse(ParseError),

    /// IO 错误
    Io(std::io::Error),

    /// 日志系统错误
    Log(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 属性表的种类，用于索引越界错误的上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Position => write!(f, "position"),
            AttributeKind::TexCoord => write!(f, "texture coordinate"),
            AttributeKind::Normal => write!(f, "normal"),
        }
    }
}

/// 解析相关的错误
///
/// `line` 字段均为源文件中的行号（从 1 开始）。
#[derive(Debug)]
pub enum ParseError {
    /// 上一次解析结束后没有调用 `clear`
    AlreadyOpen,

    /// 文件扩展名不符合要求（按原始文件名后缀比较，区分大小写）
    WrongExtension { path: PathBuf, expected: &'static str },

    /// 文件无法打开
    CannotOpenFile { path: PathBuf, source: std::io::Error },

    /// 读取过程中发生 IO 错误
    Read { line: usize, source: std::io::Error },

    /// 指令需要参数但参数为空
    EmptyDirectiveArgument { line: usize, directive: String },

    /// 数值指令的分量个数不对
    WrongComponentCount {
        line: usize,
        directive: String,
        expected: &'static str,
        found: usize,
    },

    /// 数值字段无法解析
    MalformedAttribute { line: usize, directive: String, text: String },

    /// 面索引的斜杠格式非法
    MalformedFaceIndex { line: usize, token: String },

    /// 属性索引超出当前属性表范围
    IndexOutOfRange {
        line: usize,
        kind: AttributeKind,
        index: usize,
        len: usize,
    },

    /// 面的顶点数少于 3
    DegenerateFace { line: usize, corners: usize },

    /// `s` 指令的参数既不是 `1` 也不是 `off`
    InvalidSmoothingOption { line: usize, option: String },

    /// 未知指令
    UnknownDirective { line: usize, directive: String },

    /// 在任何 `newmtl` 之前出现了材质属性
    NoActiveMaterial { line: usize, directive: String },
}

impl ParseError {
    /// 出错的行号；与文件内容无关的错误返回 `None`
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::AlreadyOpen
            | ParseError::WrongExtension { .. }
            | ParseError::CannotOpenFile { .. } => None,
            ParseError::Read { line, .. }
            | ParseError::EmptyDirectiveArgument { line, .. }
            | ParseError::WrongComponentCount { line, .. }
            | ParseError::MalformedAttribute { line, .. }
            | ParseError::MalformedFaceIndex { line, .. }
            | ParseError::IndexOutOfRange { line, .. }
            | ParseError::DegenerateFace { line, .. }
            | ParseError::InvalidSmoothingOption { line, .. }
            | ParseError::UnknownDirective { line, .. }
            | ParseError::NoActiveMaterial { line, .. } => Some(*line),
        }
    }
}

impl fmt::Display for ObjSceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjSceneError::Config(e) => write!(f, "Configuration error: {}", e),
            ObjSceneError::Parse(e) => write!(f, "Parse error: {}", e),
            ObjSceneError::Io(e) => write!(f, "IO error: {}", e),
            ObjSceneError::Log(msg) => write!(f, "Log error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::AlreadyOpen => {
                write!(f, "Parser already holds a parse result, call clear() first")
            }
            ParseError::WrongExtension { path, expected } => {
                write!(f, "'{}' is not a {} file", path.display(), expected)
            }
            ParseError::CannotOpenFile { path, source } => {
                write!(f, "Failed to open file '{}': {}", path.display(), source)
            }
            ParseError::Read { line, source } => {
                write!(f, "line {}: read failed: {}", line, source)
            }
            ParseError::EmptyDirectiveArgument { line, directive } => {
                write!(f, "line {}: '{}' requires an argument", line, directive)
            }
            ParseError::WrongComponentCount { line, directive, expected, found } => write!(
                f,
                "line {}: '{}' expects {} components, found {}",
                line, directive, expected, found
            ),
            ParseError::MalformedAttribute { line, directive, text } => {
                write!(f, "line {}: '{}' has non-numeric field '{}'", line, directive, text)
            }
            ParseError::MalformedFaceIndex { line, token } => {
                write!(f, "line {}: malformed face index '{}'", line, token)
            }
            ParseError::IndexOutOfRange { line, kind, index, len } => write!(
                f,
                "line {}: {} index {} out of range (table holds {})",
                line, kind, index, len
            ),
            ParseError::DegenerateFace { line, corners } => {
                write!(f, "line {}: face has {} corners, at least 3 required", line, corners)
            }
            ParseError::InvalidSmoothingOption { line, option } => {
                write!(f, "line {}: invalid smoothing option '{}'", line, option)
            }
            ParseError::UnknownDirective { line, directive } => {
                write!(f, "line {}: unknown keyword '{}'", line, directive)
            }
            ParseError::NoActiveMaterial { line, directive } => {
                write!(f, "line {}: '{}' appears before any 'newmtl'", line, directive)
            }
        }
    }
}

impl std::error::Error for ObjSceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjSceneError::Io(e) => Some(e),
            ObjSceneError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::CannotOpenFile { source, .. } | ParseError::Read { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ObjSceneError {
    fn from(err: std::io::Error) -> Self {
        ObjSceneError::Io(err)
    }
}

impl From<ConfigError> for ObjSceneError {
    fn from(err: ConfigError) -> Self {
        ObjSceneError::Config(err)
    }
}

impl From<ParseError> for ObjSceneError {
    fn from(err: ParseError) -> Self {
        ObjSceneError::Parse(err)
    }
}
