use crate::indicator::entity::BollingerBands;

/// # Summary
/// 技术指标计算器契约，负责均线与布林带的数值计算。
///
/// # Invariants
/// - 输出序列与输入序列按下标一一对齐，长度相同。
/// - 窗口未填满之前的位置以 `f64::NAN` 占位。
pub trait TechnicalIndicatorCalculator: Send + Sync {
    /// # Summary
    /// 计算简单移动平均。
    ///
    /// # Arguments
    /// * `values`: 输入序列 (通常为收盘价)。
    /// * `period`: 窗口长度。
    ///
    /// # Returns
    /// 与输入等长的均线序列。
    fn moving_average(&self, values: &[f64], period: usize) -> Vec<f64>;

    /// # Summary
    /// 计算布林带上轨、中轨、下轨。
    ///
    /// # Arguments
    /// * `values`: 输入序列。
    /// * `period`: 窗口长度。
    /// * `multiplier`: 标准差倍数。
    ///
    /// # Returns
    /// 三条与输入等长的序列。
    fn bollinger_bands(&self, values: &[f64], period: usize, multiplier: f64) -> BollingerBands;
}
