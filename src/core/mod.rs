//! 核心功能模块
//!
//! 提供与具体文件格式无关的基础设施：日志系统、配置管理和错误处理。
//!
//! # 模块组织
//!
//! - `log`：日志系统，基于 tracing 的结构化日志
//! - `config`：配置管理，支持从 TOML 文件加载解析选项
//! - `error`：错误处理，定义统一的错误类型

pub mod log;
pub mod config;
pub mod error;

// 重新导出常用类型，方便使用
pub use error::{AttributeKind, ConfigError, ObjSceneError, ParseError, Result};
pub use config::{Config, LogLevel, LoggingConfig, ParserConfig};
