use serde::{Deserialize, Serialize};

/// # Summary
/// 标准化后的单根 K 线 (OHLCV) 实体，以日期字符串为键。
///
/// # Invariants
/// - `date` 形如 `YYYYMMDD` 或 `YYYY-MM-DD`，序列按字符串字典序升序排列。
/// - 不强制 `low <= min(open, close) <= max(open, close) <= high`，是否校验由解析方配置决定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCandle {
    // 交易日期 (原样保留上游字符串)
    pub date: String,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量 (缺失时为 0)
    pub volume: f64,
}

impl CanonicalCandle {
    /// 收盘价不低于开盘价即视为上涨 (平盘按上涨着色)
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    /// # Summary
    /// 检查 OHLC 四价是否满足最高/最低价包络关系。
    ///
    /// # Returns
    /// 满足 `low <= min(open, close)` 且 `max(open, close) <= high` 时返回 true。
    pub fn has_consistent_range(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low <= body_low && body_high <= self.high
    }
}

/// # Summary
/// 交易标记的买卖方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// 买入
    Buy,
    /// 卖出
    Sell,
}

impl TradeAction {
    /// 图表上显示的单字符标签
    pub fn label(self) -> char {
        match self {
            TradeAction::Buy => '买',
            TradeAction::Sell => '卖',
        }
    }
}

/// # Summary
/// 调用方提供的交易标注，将某个日期和价格关联到一次买卖动作。
///
/// # Invariants
/// - `date` 必须与某根 K 线的 `date` 字符串完全相等才会被绘制。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    // 成交日期
    pub date: String,
    // 成交价格
    pub price: f64,
    // 买卖方向
    pub action: TradeAction,
}
