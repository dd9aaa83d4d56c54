//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 解析器的诊断信息全部走这里，属于旁路输出，不影响解析结果；
//! 不初始化日志系统时这些输出会被直接丢弃。
//!
//! # 使用示例
//!
//! ```no_run
//! use obj_scene::core::{log, LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None)?;
//! tracing::info!(vertices = 128, "Scene parsed");
//! # Ok::<(), obj_scene::core::ObjSceneError>(())
//! ```

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::Path;

use super::config::LogLevel;
use super::error::{ObjSceneError, Result};

/// 初始化日志系统
///
/// 必须在程序开始时调用一次；重复调用返回 `ObjSceneError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "obj_scene.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    let filter = level_filter(level);

    if file_output {
        let log_path = log_file_path.unwrap_or("obj_scene.log");
        let path = Path::new(log_path);
        let directory = path.parent().unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("obj_scene.log");

        // 每天滚动
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            directory,
            filename
        );

        let console_layer = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_ansi(true);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)  // 文件不需要 ANSI 颜色
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| ObjSceneError::Log(e.to_string()))
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| ObjSceneError::Log(e.to_string()))
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new("").add_directive(LevelFilter::from_level(Level::from(level)).into())
}

/// 解析器日志 - Debug 级别
#[macro_export]
macro_rules! parser_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "obj_scene::parser", $($arg)*)
    };
}

/// 解析器日志 - Info 级别
#[macro_export]
macro_rules! parser_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "obj_scene::parser", $($arg)*)
    };
}

/// 解析器日志 - Warn 级别
#[macro_export]
macro_rules! parser_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "obj_scene::parser", $($arg)*)
    };
}

/// 解析器日志 - Error 级别
#[macro_export]
macro_rules! parser_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "obj_scene::parser", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
