//! 配置管理模块
//!
//! 提供解析器与命令行程序配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (obj_scene.toml)
//!
//! ```toml
//! [parser]
//! reject_degenerate_faces = true
//! load_materials = true
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "obj_scene.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 全局配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 解析器配置
    #[serde(default)]
    pub parser: ParserConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 解析器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// 顶点数少于 3 的面是否视为错误
    #[serde(default = "default_reject_degenerate")]
    pub reject_degenerate_faces: bool,

    /// 是否同时解析 `mtllib` 引用的材质库
    #[serde(default = "default_load_materials")]
    pub load_materials: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("unknown level '{}'", other),
            }),
        }
    }
}

// 默认值函数
fn default_reject_degenerate() -> bool { true }
fn default_load_materials() -> bool { true }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "obj_scene.log".to_string() }

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reject_degenerate_faces: default_reject_degenerate(),
            load_materials: default_load_materials(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use obj_scene::core::Config;
    ///
    /// let config = Config::from_file("obj_scene.toml")?;
    /// # Ok::<(), obj_scene::core::ObjSceneError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--log-level <level>`: 设置日志级别
    /// - `--allow-degenerate`: 接受顶点数少于 3 的面
    /// - `--no-materials`: 不解析材质库
    ///
    /// 返回所有不以 `--` 开头的位置参数（即输入文件路径）。
    /// 第一个参数（程序名）需要调用方自行跳过。
    pub fn apply_args<I>(&mut self, args: I) -> Result<Vec<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut positional = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--allow-degenerate" => self.parser.reject_degenerate_faces = false,
                "--no-materials" => self.parser.load_materials = false,
                "--log-level" => {
                    let value = iter.next().ok_or_else(|| ConfigError::InvalidValue {
                        field: "--log-level".to_string(),
                        reason: "missing value".to_string(),
                    })?;
                    self.logging.level = value.parse()?;
                }
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::InvalidValue {
                        field: flag.to_string(),
                        reason: "unknown option".to_string(),
                    }
                    .into());
                }
                path => positional.push(path.to_string()),
            }
        }

        Ok(positional)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "Log file path must not be empty when file output is enabled".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
