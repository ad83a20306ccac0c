use kline_core::indicator::entity::BollingerBands;
use kline_core::indicator::port::TechnicalIndicatorCalculator;
use std::collections::VecDeque;

/// # Summary
/// 基于滑动窗口的默认指标计算器。
///
/// # Invariants
/// - 无内部状态，每次调用独立完成一次全量计算，可在线程间共享。
/// - 周期为 0 或长于序列时输出全 NaN 序列，窗口缓冲不超过序列长度。
#[derive(Debug, Clone, Copy, Default)]
pub struct RollingCalculator;

impl RollingCalculator {
    pub fn new() -> Self {
        Self
    }
}

/// 窗口长度转浮点数，窗口规模远小于 u32 上限
fn len_as_f64(len: usize) -> f64 {
    u32::try_from(len).map(f64::from).unwrap_or(f64::from(u32::MAX))
}

impl TechnicalIndicatorCalculator for RollingCalculator {
    /// # Summary
    /// 简单移动平均。
    ///
    /// # Logic
    /// 1. 维护窗口与窗口和，新值入窗、超长时旧值出窗。
    /// 2. 窗口填满后输出 `sum / period`，之前输出 NaN。
    fn moving_average(&self, values: &[f64], period: usize) -> Vec<f64> {
        let mut output = vec![f64::NAN; values.len()];
        if period == 0 || period > values.len() {
            return output;
        }

        let mut window = VecDeque::with_capacity(period + 1);
        let mut sum = 0.0;
        for (slot, &value) in output.iter_mut().zip(values) {
            window.push_back(value);
            sum += value;
            if window.len() > period {
                if let Some(old) = window.pop_front() {
                    sum -= old;
                }
            }
            if window.len() == period {
                *slot = sum / len_as_f64(period);
            }
        }
        output
    }

    /// # Summary
    /// 布林带。
    ///
    /// # Logic
    /// 1. 窗口填满后计算均值作为中轨。
    /// 2. 以总体标准差 (除以 n) 乘以倍数得到上下轨偏移。
    /// 3. 窗口未满处三条轨道均为 NaN。
    fn bollinger_bands(&self, values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
        let mut bands = BollingerBands {
            upper: vec![f64::NAN; values.len()],
            middle: vec![f64::NAN; values.len()],
            lower: vec![f64::NAN; values.len()],
        };
        if period == 0 || period > values.len() {
            return bands;
        }

        let n = len_as_f64(period);
        for end in period..=values.len() {
            let window = &values[end - period..end];
            let mean = window.iter().sum::<f64>() / n;
            let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            let offset = multiplier * variance.sqrt();

            let i = end - 1;
            bands.middle[i] = mean;
            bands.upper[i] = mean + offset;
            bands.lower[i] = mean - offset;
        }
        bands
    }
}
