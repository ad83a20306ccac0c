use crate::common::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认保留的最近 K 线数量
pub const DEFAULT_MAX_RECORDS: usize = 60;

/// 全局图表配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub feed: FeedConfig,
    pub style: ChartStyle,
}

/// 行情载荷解析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    // 截断窗口：只保留最后 N 条记录
    pub max_records: usize,
    // 是否丢弃 OHLC 包络关系不成立的记录
    pub validate_ohlc: bool,
}

/// # Summary
/// 几何映射的样式参数。
///
/// # Invariants
/// - `body_ratio` 取值 (0, 1]，表示实体宽度占单根 K 线槽位的比例。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    // 价格区间上下留白比例
    pub value_padding: f64,
    pub body_ratio: f64,
    // 水平网格分段数
    pub grid_lines: usize,
    pub trade_marker_radius: f64,
    pub palette: ChartPalette,
}

/// # Summary
/// 涨跌双色方案，由调用方决定 (默认红涨绿跌)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPalette {
    pub up: Color,
    pub down: Color,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            validate_ohlc: false,
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            value_padding: 0.02,
            body_ratio: 0.7,
            grid_lines: 4,
            trade_marker_radius: 6.0,
            palette: ChartPalette::default(),
        }
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            up: Color::opaque(0xF44336),
            down: Color::opaque(0x4CAF50),
        }
    }
}

/// # Summary
/// 配置加载错误。
#[derive(Error, Debug)]
pub enum ConfigError {
    // 配置源读取或反序列化失败
    #[error("Config load error: {0}")]
    Load(String),
    // 取值超出允许范围
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

impl ChartConfig {
    /// # Summary
    /// 校验配置取值。
    ///
    /// # Logic
    /// 1. `max_records` 必须大于 0。
    /// 2. `body_ratio` 必须位于 (0, 1]。
    /// 3. `value_padding` 必须为非负有限值且小于 1。
    ///
    /// # Returns
    /// 合法时返回 Ok，否则返回 `ConfigError::Invalid`。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.max_records == 0 {
            return Err(ConfigError::Invalid("feed.max_records must be > 0".into()));
        }
        let ratio = self.style.body_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!("style.body_ratio out of range: {}", ratio)));
        }
        let padding = self.style.value_padding;
        if !(padding.is_finite() && (0.0..1.0).contains(&padding)) {
            return Err(ConfigError::Invalid(format!(
                "style.value_padding out of range: {}",
                padding
            )));
        }
        Ok(())
    }
}
