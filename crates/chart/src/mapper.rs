use crate::axis::{date_labels, grid_lines, price_labels};
use crate::scale::{SlotLayout, ValueRange, ValueScale};
use kline_core::chart::entity::{
    CandleBody, CandleShape, CanvasSize, ChartGeometry, OverlayPath, Point, Polyline, Segment,
    TradeGlyph, Trend,
};
use kline_core::config::ChartStyle;
use kline_core::indicator::entity::Overlay;
use kline_core::market::entity::{CanonicalCandle, TradeAction, TradeMarker};
use kline_indicator::overlay::Overlays;
use tracing::debug;

/// 实体高度低于该像素值时退化为水平短横
const MIN_BODY_HEIGHT: f64 = 1.0;
/// 布林带填充区域的 alpha
const BAND_FILL_ALPHA: u8 = 0x33;

/// # Summary
/// 几何映射器：把值空间的 K 线、叠加序列与交易标记转换为像素空间图元。
///
/// # Invariants
/// - 纯函数式：不持有跨调用状态，每次映射独立完成。
/// - 永不失败：空序列或非法画布得到空几何，由渲染方展示占位。
#[derive(Debug, Clone, Default)]
pub struct GeometryMapper {
    style: ChartStyle,
}

impl GeometryMapper {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// # Summary
    /// 以 K 线自身推导的价格区间进行映射。
    ///
    /// # Logic
    /// 1. K 线为空时直接返回空几何。
    /// 2. 价格区间为 `min(low) * (1 - padding)` 到 `max(high) * (1 + padding)`。
    /// 3. 交给 `map_with_range` 完成映射。
    pub fn map(
        &self,
        candles: &[CanonicalCandle],
        overlays: &Overlays,
        trades: &[TradeMarker],
        canvas: CanvasSize,
    ) -> ChartGeometry {
        match ValueRange::from_candles(candles, self.style.value_padding) {
            Some(range) => self.map_with_range(candles, overlays, trades, canvas, range),
            None => ChartGeometry::default(),
        }
    }

    /// # Summary
    /// 按调用方给定的价格区间映射。
    ///
    /// # Logic
    /// 1. K 线为空或画布尺寸非法时返回空几何。
    /// 2. 依次生成网格、价格标签、日期标签、蜡烛、叠加路径与交易标记。
    ///
    /// # Arguments
    /// * `candles`: 升序 K 线序列。
    /// * `overlays`: 与 K 线按下标对齐的叠加序列。
    /// * `trades`: 交易标记。
    /// * `canvas`: 画布尺寸。
    /// * `range`: 纵轴价格区间。
    ///
    /// # Returns
    /// 完整的绘制几何。
    pub fn map_with_range(
        &self,
        candles: &[CanonicalCandle],
        overlays: &Overlays,
        trades: &[TradeMarker],
        canvas: CanvasSize,
        range: ValueRange,
    ) -> ChartGeometry {
        if candles.is_empty() {
            return ChartGeometry::default();
        }
        if !(canvas.width.is_finite() && canvas.height.is_finite())
            || canvas.width <= 0.0
            || canvas.height <= 0.0
        {
            debug!("Invalid canvas {}x{}, skipping geometry", canvas.width, canvas.height);
            return ChartGeometry::default();
        }

        let scale = ValueScale::new(range, canvas.height);
        let layout = SlotLayout::new(canvas.width, candles.len(), self.style.body_ratio);
        let grid = grid_lines(canvas, self.style.grid_lines);
        let price_labels = price_labels(&grid, &scale);

        ChartGeometry {
            price_labels,
            grid,
            date_labels: date_labels(candles, &layout),
            candle_shapes: candles
                .iter()
                .enumerate()
                .map(|(i, candle)| self.candle_shape(i, candle, &scale, &layout))
                .collect(),
            overlay_paths: overlays
                .iter()
                .map(|(key, overlay)| match overlay {
                    Overlay::Line { name, color, values } => OverlayPath::Line {
                        key: *key,
                        name: name.clone(),
                        color: *color,
                        path: polyline(values, candles.len(), &scale, &layout),
                    },
                    Overlay::Band { name, color, bands } => {
                        let upper = polyline(&bands.upper, candles.len(), &scale, &layout);
                        let lower = polyline(&bands.lower, candles.len(), &scale, &layout);
                        let fill = upper
                            .points
                            .iter()
                            .chain(lower.points.iter().rev())
                            .copied()
                            .collect();
                        OverlayPath::Band {
                            key: *key,
                            name: name.clone(),
                            color: *color,
                            middle: polyline(&bands.middle, candles.len(), &scale, &layout),
                            upper,
                            lower,
                            fill,
                            fill_color: color.with_alpha(BAND_FILL_ALPHA),
                        }
                    }
                })
                .collect(),
            trade_glyphs: trades
                .iter()
                .filter_map(|marker| self.trade_glyph(marker, candles, &scale, &layout))
                .collect(),
        }
    }

    /// # Summary
    /// 单根蜡烛的几何。
    ///
    /// # Logic
    /// 1. 影线从最高价纵坐标连到最低价纵坐标。
    /// 2. 实体纵向覆盖开盘与收盘纵坐标之间，横向宽度为实体宽度。
    /// 3. 实体高度不足 1 像素时输出位于开盘价处的水平短横。
    /// 4. 收盘价不低于开盘价使用上涨色，否则使用下跌色。
    fn candle_shape(
        &self,
        index: usize,
        candle: &CanonicalCandle,
        scale: &ValueScale,
        layout: &SlotLayout,
    ) -> CandleShape {
        let center_x = layout.center_x(index);
        let left = center_x - layout.body_width / 2.0;
        let right = center_x + layout.body_width / 2.0;

        let open_y = scale.y(candle.open);
        let close_y = scale.y(candle.close);
        let top = open_y.min(close_y);
        let bottom = open_y.max(close_y);

        let body = if bottom - top < MIN_BODY_HEIGHT {
            CandleBody::Tick {
                left,
                right,
                y: open_y,
            }
        } else {
            CandleBody::Rect {
                left,
                top,
                right,
                bottom,
            }
        };

        let (trend, color) = if candle.is_up() {
            (Trend::Up, self.style.palette.up)
        } else {
            (Trend::Down, self.style.palette.down)
        };

        CandleShape {
            index,
            date: candle.date.clone(),
            center_x,
            wick: Segment {
                from: Point::new(center_x, scale.y(candle.high)),
                to: Point::new(center_x, scale.y(candle.low)),
            },
            body,
            trend,
            color,
        }
    }

    /// # Summary
    /// 交易标记图元。
    ///
    /// # Logic
    /// 1. 按日期字符串精确匹配第一根 K 线，匹配不到则丢弃该标记。
    /// 2. 圆心位于该 K 线中心横坐标与成交价纵坐标。
    /// 3. 买入：尖端朝上的三角位于圆下方；卖出：尖端朝下的三角位于圆上方。
    fn trade_glyph(
        &self,
        marker: &TradeMarker,
        candles: &[CanonicalCandle],
        scale: &ValueScale,
        layout: &SlotLayout,
    ) -> Option<TradeGlyph> {
        let index = candles.iter().position(|c| c.date == marker.date)?;
        if !marker.price.is_finite() {
            return None;
        }

        let radius = self.style.trade_marker_radius;
        let center = Point::new(layout.center_x(index), scale.y(marker.price));
        let gap = radius / 2.0;
        let half_base = radius * 0.6;

        // 三角高度取半径，尖端朝向圆心
        let (tip_y, base_y, color) = match marker.action {
            TradeAction::Buy => {
                let tip = center.y + radius + gap;
                (tip, tip + radius, self.style.palette.up)
            }
            TradeAction::Sell => {
                let tip = center.y - radius - gap;
                (tip, tip - radius, self.style.palette.down)
            }
        };

        Some(TradeGlyph {
            date: marker.date.clone(),
            action: marker.action,
            center,
            radius,
            label: marker.action.label(),
            triangle: [
                Point::new(center.x, tip_y),
                Point::new(center.x - half_base, base_y),
                Point::new(center.x + half_base, base_y),
            ],
            color,
        })
    }
}

/// # Summary
/// 叠加序列转折线。
///
/// # Logic
/// 逐点映射，跳过 NaN 而不断开路径：首个有效点为起笔，之后所有有效点都接续在同一子路径上。
/// 序列长于 K 线数量的部分被忽略。
fn polyline(values: &[f64], count: usize, scale: &ValueScale, layout: &SlotLayout) -> Polyline {
    Polyline {
        points: values
            .iter()
            .take(count)
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, &v)| Point::new(layout.center_x(i), scale.y(v)))
            .collect(),
    }
}
