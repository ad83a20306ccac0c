use crate::scale::{SlotLayout, ValueScale, count_as_f64};
use chrono::NaiveDate;
use kline_core::chart::entity::{CanvasSize, DateLabel, Point, PriceLabel, Segment};
use kline_core::market::entity::CanonicalCandle;

/// # Summary
/// 生成水平网格线。
///
/// # Logic
/// 把画布高度等分为 `sections` 段，包含顶边与底边共 `sections + 1` 条线。
/// `sections` 为 0 时不画网格。
pub fn grid_lines(canvas: CanvasSize, sections: usize) -> Vec<Segment> {
    if sections == 0 {
        return Vec::new();
    }
    let step = canvas.height / count_as_f64(sections);
    (0..=sections)
        .map(|i| {
            let y = count_as_f64(i) * step;
            Segment {
                from: Point::new(0.0, y),
                to: Point::new(canvas.width, y),
            }
        })
        .collect()
}

/// 每条网格线对应一个价格标签，保留两位小数
pub fn price_labels(grid: &[Segment], scale: &ValueScale) -> Vec<PriceLabel> {
    grid.iter()
        .map(|line| {
            let value = scale.price_at(line.from.y);
            PriceLabel {
                y: line.from.y,
                value,
                text: format!("{:.2}", value),
            }
        })
        .collect()
}

/// # Summary
/// 生成首、中、尾三根 K 线的日期标签。
///
/// # Logic
/// 1. 取下标 0、n/2、n-1 并去重 (K 线不足三根时标签相应减少)。
/// 2. 日期能按 `YYYYMMDD` 或 `YYYY-MM-DD` 解析时显示为 `MM-DD`，否则原样显示。
pub fn date_labels(candles: &[CanonicalCandle], layout: &SlotLayout) -> Vec<DateLabel> {
    let Some(last) = candles.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut indices = vec![0, candles.len() / 2, last];
    indices.dedup();

    indices
        .into_iter()
        .filter_map(|i| candles.get(i).map(|c| (i, c)))
        .map(|(i, candle)| DateLabel {
            x: layout.center_x(i),
            date: candle.date.clone(),
            text: short_date(&candle.date),
        })
        .collect()
}

/// 日期缩写为 `MM-DD`
pub fn short_date(date: &str) -> String {
    ["%Y%m%d", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_else(|| date.to_string())
}
