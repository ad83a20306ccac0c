use clap::Parser;
use kline_core::chart::entity::CanvasSize;
use kline_core::indicator::entity::IndicatorSpec;
use kline_core::market::entity::TradeMarker;
use kline_indicator::calculator::RollingCalculator;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod pipeline;
mod settings;

use cli::Args;
use error::AppError;

/// 读取并反序列化 JSON 文件
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// # Summary
/// 命令行入口：读取载荷与指标/交易配置，输出绘制几何。
///
/// # Logic
/// 1. 初始化日志，写入 stderr，stdout 只保留 JSON 结果。
/// 2. 加载图表配置。
/// 3. 读取载荷、指标配置与交易标记。
/// 4. 执行绘制管线并输出几何。
fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // 1. 初始化日志
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    info!("K-line renderer starting...");

    // 2. 加载配置
    let config = settings::load_config(args.config.as_deref())?;

    // 3. 读取输入
    let raw: serde_json::Value = read_json(&args.payload)?;
    let specs: Vec<IndicatorSpec> = match &args.indicators {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let trades: Vec<TradeMarker> = match &args.trades {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    // 4. 执行管线
    let geometry = pipeline::render_chart(
        &config,
        &raw,
        &specs,
        &trades,
        &RollingCalculator,
        CanvasSize::new(args.width, args.height),
    );
    if geometry.is_empty() {
        warn!("No candle data in {}", args.payload.display());
    }

    serde_json::to_writer_pretty(std::io::stdout().lock(), &geometry)?;
    println!();
    Ok(())
}
