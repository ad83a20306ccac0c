use kline_core::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// # Summary
/// 命令行入口的错误，只有驱动程序会把错误返回给调用者。
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}
