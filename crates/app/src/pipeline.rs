use kline_chart::mapper::GeometryMapper;
use kline_core::chart::entity::{CanvasSize, ChartGeometry};
use kline_core::config::ChartConfig;
use kline_core::indicator::entity::IndicatorSpec;
use kline_core::indicator::port::TechnicalIndicatorCalculator;
use kline_core::market::entity::TradeMarker;
use kline_feed::payload::PayloadNormalizer;
use kline_indicator::overlay::compute_overlays;
use serde_json::Value;
use tracing::info;

/// # Summary
/// 一次完整的绘制管线：解析载荷 → 计算叠加 → 映射几何。
///
/// # Logic
/// 1. 按配置构造解析器，得到升序 K 线。
/// 2. 对启用的主图指标计算叠加序列。
/// 3. 按画布尺寸映射为像素几何。
///
/// # Returns
/// 绘制几何；K 线为空时为空几何。
pub fn render_chart(
    config: &ChartConfig,
    raw: &Value,
    specs: &[IndicatorSpec],
    trades: &[TradeMarker],
    calculator: &dyn TechnicalIndicatorCalculator,
    canvas: CanvasSize,
) -> ChartGeometry {
    let candles = PayloadNormalizer::from_config(&config.feed).normalize(raw);
    let overlays = compute_overlays(&candles, specs, calculator);
    let geometry =
        GeometryMapper::new(config.style.clone()).map(&candles, &overlays, trades, canvas);
    info!(
        "Rendered {} candles, {} overlays, {} trade markers",
        geometry.candle_shapes.len(),
        geometry.overlay_paths.len(),
        geometry.trade_glyphs.len()
    );
    geometry
}
