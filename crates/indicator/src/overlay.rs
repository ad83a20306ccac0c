use crate::palette::resolve_color;
use kline_core::indicator::entity::{IndicatorKind, IndicatorSpec, Overlay, OverlayKey};
use kline_core::indicator::error::IndicatorError;
use kline_core::indicator::port::TechnicalIndicatorCalculator;
use kline_core::market::entity::CanonicalCandle;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// 按键排序的叠加序列集合：均线在前 (周期升序)，布林带在后
pub type Overlays = BTreeMap<OverlayKey, Overlay>;

/// # Summary
/// 根据指标配置计算主图叠加序列。
///
/// # Logic
/// 1. 跳过未启用的配置，以及不在主图绘制的 MACD / RSI / KDJ。
/// 2. MA：读取整数 `period`，对收盘价求均线，键为 `MA<period>`。
/// 3. BOLL：读取整数 `period` 与数值 `std`，对收盘价求布林带，键为 `BOLL`。
/// 4. 参数非法的配置记 warn 日志后跳过；同键配置后者覆盖前者。
///
/// # Arguments
/// * `candles`: 标准 K 线序列。
/// * `specs`: 调用方维护的指标配置列表。
/// * `calculator`: 指标数值计算器。
///
/// # Returns
/// 叠加键到叠加序列的有序映射，可能为空。
pub fn compute_overlays(
    candles: &[CanonicalCandle],
    specs: &[IndicatorSpec],
    calculator: &dyn TechnicalIndicatorCalculator,
) -> Overlays {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let mut overlays = Overlays::new();

    for spec in specs {
        if !spec.enabled {
            trace!("Skipping disabled indicator {:?}", spec.kind);
            continue;
        }
        if !spec.kind.is_price_overlay() {
            trace!("Indicator {:?} is not drawn on the price pane", spec.kind);
            continue;
        }

        match build_overlay(spec, &closes, calculator) {
            Ok((key, overlay)) => {
                overlays.insert(key, overlay);
            }
            Err(e) => warn!("Skipping indicator {:?} ({}): {}", spec.kind, spec.name, e),
        }
    }
    overlays
}

/// 计算单个主图指标
fn build_overlay(
    spec: &IndicatorSpec,
    closes: &[f64],
    calculator: &dyn TechnicalIndicatorCalculator,
) -> Result<(OverlayKey, Overlay), IndicatorError> {
    let color = resolve_color(spec.params.get("color").and_then(Value::as_str));
    let period = param_period(&spec.params)?;
    let window = usize::try_from(period).map_err(|_| IndicatorError::InvalidParam {
        name: "period",
        value: period.to_string(),
    })?;

    match spec.kind {
        IndicatorKind::Ma => {
            let key = OverlayKey::MovingAverage(period);
            let overlay = Overlay::Line {
                name: display_name(spec, key),
                color,
                values: calculator.moving_average(closes, window),
            };
            Ok((key, overlay))
        }
        IndicatorKind::Boll => {
            let multiplier = param_multiplier(&spec.params)?;
            let key = OverlayKey::Bollinger;
            let overlay = Overlay::Band {
                name: display_name(spec, key),
                color,
                bands: calculator.bollinger_bands(closes, window, multiplier),
            };
            Ok((key, overlay))
        }
        other => Err(IndicatorError::InvalidParam {
            name: "type",
            value: format!("{:?}", other),
        }),
    }
}

/// 读取正整数周期
fn param_period(params: &Map<String, Value>) -> Result<u32, IndicatorError> {
    let value = params.get("period").ok_or(IndicatorError::MissingParam("period"))?;
    value
        .as_u64()
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p > 0)
        .ok_or_else(|| IndicatorError::InvalidParam {
            name: "period",
            value: value.to_string(),
        })
}

/// 读取标准差倍数，整数会被提升为浮点数
fn param_multiplier(params: &Map<String, Value>) -> Result<f64, IndicatorError> {
    let value = params.get("std").ok_or(IndicatorError::MissingParam("std"))?;
    value
        .as_f64()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .ok_or_else(|| IndicatorError::InvalidParam {
            name: "std",
            value: value.to_string(),
        })
}

fn display_name(spec: &IndicatorSpec, key: OverlayKey) -> String {
    if spec.name.is_empty() {
        key.to_string()
    } else {
        spec.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_period_must_be_positive_integer() {
        let params = |v: Value| json!({ "period": v }).as_object().cloned().unwrap_or_default();
        assert_eq!(param_period(&params(json!(5))), Ok(5));
        assert!(param_period(&params(json!(0))).is_err());
        assert!(param_period(&params(json!(2.5))).is_err());
        assert!(param_period(&params(json!("5"))).is_err());
        assert_eq!(param_period(&Map::new()), Err(IndicatorError::MissingParam("period")));
    }

    #[test]
    fn test_multiplier_accepts_integers() {
        let params = json!({"std": 2}).as_object().cloned().unwrap_or_default();
        assert_eq!(param_multiplier(&params), Ok(2.0));
    }
}
