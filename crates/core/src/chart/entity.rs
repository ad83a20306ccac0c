use crate::common::Color;
use crate::indicator::entity::OverlayKey;
use crate::market::entity::TradeAction;
use serde::{Deserialize, Serialize};

/// 像素坐标点，原点位于画布左上角，y 轴向下。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// # Summary
/// 目标画布尺寸 (逻辑像素)。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 涨跌方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// # Summary
/// 蜡烛实体的绘制形态。
///
/// # Invariants
/// - 实体高度不足 1 像素时退化为水平短横 `Tick`，不会出现零高度矩形。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum CandleBody {
    Rect {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
    Tick {
        left: f64,
        right: f64,
        y: f64,
    },
}

/// 单根蜡烛的像素几何
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleShape {
    // 在 K 线序列中的下标
    pub index: usize,
    pub date: String,
    pub center_x: f64,
    // 上下影线，从最高价指向最低价
    pub wick: Segment,
    pub body: CandleBody,
    pub trend: Trend,
    pub color: Color,
}

/// # Summary
/// 叠加指标折线。
///
/// # Invariants
/// - `points` 只包含有效点：首点为起笔 (move-to)，其后每点都接续在同一子路径上 (line-to)。
/// - NaN 点被跳过而不断开路径，因此跨越缺口的两个有效点之间会直接相连。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    /// 路径起点
    pub fn move_to(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// 起点之后依次连接的点
    pub fn line_to(&self) -> &[Point] {
        self.points.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 叠加指标的绘制路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OverlayPath {
    Line {
        key: OverlayKey,
        name: String,
        color: Color,
        path: Polyline,
    },
    Band {
        key: OverlayKey,
        name: String,
        color: Color,
        upper: Polyline,
        middle: Polyline,
        lower: Polyline,
        // 上轨正向 + 下轨逆向拼接而成的闭合多边形
        fill: Vec<Point>,
        fill_color: Color,
    },
}

/// # Summary
/// 交易标记图元：圆点、单字标签与方向三角。
///
/// # Invariants
/// - 买入三角朝上、位于圆点下方；卖出三角朝下、位于圆点上方。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeGlyph {
    pub date: String,
    pub action: TradeAction,
    pub center: Point,
    pub radius: f64,
    pub label: char,
    // 三角顶点，首个为尖端
    pub triangle: [Point; 3],
    pub color: Color,
}

/// 价格刻度标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLabel {
    pub y: f64,
    pub value: f64,
    pub text: String,
}

/// 日期刻度标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateLabel {
    pub x: f64,
    pub date: String,
    pub text: String,
}

/// # Summary
/// 一次绘制所需的完整几何结果，交给渲染方直接绘制。
///
/// # Invariants
/// - K 线为空时所有字段为空，渲染方应展示"暂无数据"占位。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub grid: Vec<Segment>,
    pub price_labels: Vec<PriceLabel>,
    pub date_labels: Vec<DateLabel>,
    pub candle_shapes: Vec<CandleShape>,
    pub overlay_paths: Vec<OverlayPath>,
    pub trade_glyphs: Vec<TradeGlyph>,
}

impl ChartGeometry {
    pub fn is_empty(&self) -> bool {
        self.candle_shapes.is_empty()
    }
}
