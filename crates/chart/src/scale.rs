use kline_core::market::entity::CanonicalCandle;

/// 下标或数量转浮点数；K 线数量远小于 u32 上限
pub(crate) fn count_as_f64(n: usize) -> f64 {
    u32::try_from(n).map(f64::from).unwrap_or(f64::from(u32::MAX))
}

/// # Summary
/// 纵轴价格区间。
///
/// # Invariants
/// - `max <= min` 或出现非有限值时视为退化区间，映射时不做除法。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// # Summary
    /// 由 K 线序列推导带留白的价格区间。
    ///
    /// # Logic
    /// 1. `min = min(low) * (1 - padding)`。
    /// 2. `max = max(high) * (1 + padding)`。
    ///
    /// # Arguments
    /// * `candles`: K 线序列。
    /// * `padding`: 留白比例，默认 0.02。
    ///
    /// # Returns
    /// 序列为空时返回 None。
    pub fn from_candles(candles: &[CanonicalCandle], padding: f64) -> Option<Self> {
        if candles.is_empty() {
            return None;
        }
        let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min: low * (1.0 - padding),
            max: high * (1.0 + padding),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        let span = self.span();
        !(span.is_finite() && span > 0.0)
    }
}

/// # Summary
/// 价格到像素纵坐标的线性映射 (价格越高 y 越小)。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    range: ValueRange,
    height: f64,
}

impl ValueScale {
    pub fn new(range: ValueRange, height: f64) -> Self {
        Self { range, height }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// # Summary
    /// 价格映射为纵坐标。
    ///
    /// # Logic
    /// 正常区间：`height * (1 - (price - min) / (max - min))`；
    /// 退化区间：所有价格落在中线 `height / 2`。
    pub fn y(&self, price: f64) -> f64 {
        if self.range.is_degenerate() {
            return self.height / 2.0;
        }
        self.height * (1.0 - (price - self.range.min) / self.range.span())
    }

    /// # Summary
    /// 纵坐标反算价格，用于刻度标签。
    ///
    /// # Logic
    /// 退化区间下返回区间下限。
    pub fn price_at(&self, y: f64) -> f64 {
        if self.range.is_degenerate() || self.height <= 0.0 {
            return self.range.min;
        }
        self.range.min + (1.0 - y / self.height) * self.range.span()
    }
}

/// # Summary
/// 横向槽位布局：每根 K 线占据等宽槽位，实体居中。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub slot_width: f64,
    pub body_width: f64,
}

impl SlotLayout {
    /// # Arguments
    /// * `width`: 画布宽度。
    /// * `count`: K 线数量，必须大于 0。
    /// * `body_ratio`: 实体宽度占槽位比例。
    pub fn new(width: f64, count: usize, body_ratio: f64) -> Self {
        let slot_width = width / count_as_f64(count.max(1));
        Self {
            slot_width,
            body_width: slot_width * body_ratio,
        }
    }

    /// 第 i 根 K 线的中心横坐标
    pub fn center_x(&self, index: usize) -> f64 {
        count_as_f64(index) * self.slot_width + self.slot_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_inverted_mapping() {
        let scale = ValueScale::new(ValueRange::new(10.0, 20.0), 100.0);
        assert_eq!(scale.y(10.0), 100.0);
        assert_eq!(scale.y(20.0), 0.0);
        assert_eq!(scale.y(15.0), 50.0);
        assert_eq!(scale.price_at(25.0), 17.5);
    }

    #[test]
    fn test_degenerate_range_maps_to_mid_height() {
        let scale = ValueScale::new(ValueRange::new(0.0, 0.0), 80.0);
        assert_eq!(scale.y(0.0), 40.0);
        assert_eq!(scale.y(123.0), 40.0);
        assert_eq!(scale.price_at(10.0), 0.0);
    }

    #[test]
    fn test_slot_layout() {
        let layout = SlotLayout::new(100.0, 4, 0.7);
        assert_eq!(layout.slot_width, 25.0);
        assert!((layout.body_width - 17.5).abs() < 1e-9);
        assert_eq!(layout.center_x(0), 12.5);
        assert_eq!(layout.center_x(3), 87.5);
    }
}
