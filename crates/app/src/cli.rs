use clap::Parser;
use std::path::PathBuf;

/// 读取行情载荷并输出 K 线图绘制几何 (JSON)
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 原始行情载荷 (JSON)
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 指标配置列表 (JSON 数组)
    #[arg(short, long)]
    pub indicators: Option<PathBuf>,

    /// 交易标记列表 (JSON 数组)
    #[arg(short, long)]
    pub trades: Option<PathBuf>,

    /// 画布宽度
    #[arg(long, default_value_t = 360.0)]
    pub width: f64,

    /// 画布高度
    #[arg(long, default_value_t = 240.0)]
    pub height: f64,

    /// 图表配置文件 (TOML / JSON / YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
