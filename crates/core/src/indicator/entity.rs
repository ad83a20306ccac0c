use crate::common::Color;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// # Summary
/// 指标类型枚举。
///
/// # Invariants
/// - 主图只绘制 `MA` 与 `BOLL`；`MACD`、`RSI`、`KDJ` 可识别但属于副图，不在主图叠加。
/// - 无法识别的类型落入 `Other`，不会导致整份配置反序列化失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IndicatorKind {
    Ma,
    Macd,
    Rsi,
    Boll,
    Kdj,
    Other,
}

impl From<String> for IndicatorKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "MA" => IndicatorKind::Ma,
            "MACD" => IndicatorKind::Macd,
            "RSI" => IndicatorKind::Rsi,
            "BOLL" => IndicatorKind::Boll,
            "KDJ" => IndicatorKind::Kdj,
            _ => IndicatorKind::Other,
        }
    }
}

impl From<IndicatorKind> for String {
    fn from(kind: IndicatorKind) -> Self {
        kind.to_string()
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IndicatorKind::Ma => "MA",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Boll => "BOLL",
            IndicatorKind::Kdj => "KDJ",
            IndicatorKind::Other => "OTHER",
        };
        write!(f, "{}", text)
    }
}

impl IndicatorKind {
    /// 是否绘制在主图价格面板上
    pub fn is_price_overlay(self) -> bool {
        matches!(self, IndicatorKind::Ma | IndicatorKind::Boll)
    }
}

fn enabled_by_default() -> bool {
    true
}

/// 显式 `null` 与缺省字段等价，回落到类型默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_enabled<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// # Summary
/// 调用方维护的单个指标配置项。
///
/// # Invariants
/// - `params` 中的键随指标而定：`period`、`std`、`color`。
/// - 省略 `enabled` 时视为启用。
/// - `enabled`、`params`、`name` 为 `null` 时按省略处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    // 指标类型
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    // 是否启用
    #[serde(default = "enabled_by_default", deserialize_with = "null_as_enabled")]
    pub enabled: bool,
    // 指标参数
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Map<String, Value>,
    // 展示名称
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// # Summary
/// 叠加序列在结果映射中的键。
///
/// # Invariants
/// - 文本形式分别为 `MA<period>` 与 `BOLL`，消费者可据前缀区分两类叠加。
/// - 排序：所有均线按周期升序在前，布林带在后，保证绘制顺序稳定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OverlayKey {
    MovingAverage(u32),
    Bollinger,
}

impl std::fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayKey::MovingAverage(period) => write!(f, "MA{}", period),
            OverlayKey::Bollinger => write!(f, "BOLL"),
        }
    }
}

impl FromStr for OverlayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "BOLL" {
            return Ok(OverlayKey::Bollinger);
        }
        s.strip_prefix("MA")
            .and_then(|period| period.parse().ok())
            .map(OverlayKey::MovingAverage)
            .ok_or_else(|| format!("Unknown overlay key: {}", s))
    }
}

impl TryFrom<String> for OverlayKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OverlayKey> for String {
    fn from(key: OverlayKey) -> Self {
        key.to_string()
    }
}

/// # Summary
/// 布林带三轨序列。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// # Summary
/// 叠加在主图上的派生序列。
///
/// # Invariants
/// - 所有序列与 K 线序列按下标对齐，窗口未满处为 NaN (JSON 输出为 null)。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Overlay {
    /// 单线叠加 (均线)
    Line {
        name: String,
        color: Color,
        values: Vec<f64>,
    },
    /// 带状叠加 (布林带)
    Band {
        name: String,
        color: Color,
        bands: BollingerBands,
    },
}

impl Overlay {
    /// 展示名称
    pub fn name(&self) -> &str {
        match self {
            Overlay::Line { name, .. } | Overlay::Band { name, .. } => name,
        }
    }

    /// 绘制颜色
    pub fn color(&self) -> Color {
        match self {
            Overlay::Line { color, .. } | Overlay::Band { color, .. } => *color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_key_text_form() {
        assert_eq!(OverlayKey::MovingAverage(5).to_string(), "MA5");
        assert_eq!(OverlayKey::Bollinger.to_string(), "BOLL");
        assert_eq!("MA20".parse::<OverlayKey>(), Ok(OverlayKey::MovingAverage(20)));
        assert!("MACD".parse::<OverlayKey>().is_err());
        assert!(OverlayKey::MovingAverage(60) < OverlayKey::Bollinger);
    }

    #[test]
    fn test_spec_deserialize_defaults() -> anyhow::Result<()> {
        let spec: IndicatorSpec = serde_json::from_str(r#"{"type":"MA","params":{"period":5}}"#)?;
        assert_eq!(spec.kind, IndicatorKind::Ma);
        assert!(spec.enabled);
        assert!(spec.name.is_empty());

        let unknown: IndicatorSpec = serde_json::from_str(r#"{"type":"WR","enabled":false}"#)?;
        assert_eq!(unknown.kind, IndicatorKind::Other);
        assert!(!unknown.kind.is_price_overlay());
        Ok(())
    }

    #[test]
    fn test_spec_null_fields_fall_back_to_defaults() -> anyhow::Result<()> {
        let specs: Vec<IndicatorSpec> = serde_json::from_str(
            r#"[{"type":"MA","enabled":null,"params":null,"name":null},{"type":"BOLL","params":{"period":20,"std":2}}]"#,
        )?;
        assert_eq!(specs.len(), 2);
        assert!(specs[0].enabled);
        assert!(specs[0].params.is_empty());
        assert!(specs[0].name.is_empty());
        assert_eq!(specs[1].kind, IndicatorKind::Boll);
        Ok(())
    }
}
