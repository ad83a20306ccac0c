use crate::shape::RecordShape;
use kline_core::config::{DEFAULT_MAX_RECORDS, FeedConfig};
use kline_core::market::entity::CanonicalCandle;
use kline_core::market::error::DecodeError;
use serde_json::Value;
use tracing::debug;

/// # Summary
/// 行情载荷解析器，把各种上游结构统一为升序的标准 K 线序列。
///
/// # Invariants
/// - 永不向调用方返回错误：非法记录被静默丢弃，无法识别的载荷得到空序列。
/// - 结果按日期字符串字典序升序排列 (不做日历解析)。
#[derive(Debug, Clone)]
pub struct PayloadNormalizer {
    // 截断窗口大小
    max_records: usize,
    // 是否丢弃 OHLC 包络关系不成立的记录
    validate_ohlc: bool,
}

impl Default for PayloadNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORDS)
    }
}

impl PayloadNormalizer {
    pub fn new(max_records: usize) -> Self {
        Self {
            max_records,
            validate_ohlc: false,
        }
    }

    /// 根据配置构造解析器
    pub fn from_config(config: &FeedConfig) -> Self {
        Self {
            max_records: config.max_records,
            validate_ohlc: config.validate_ohlc,
        }
    }

    /// 开启或关闭 OHLC 包络校验
    pub fn with_validation(mut self, validate_ohlc: bool) -> Self {
        self.validate_ohlc = validate_ohlc;
        self
    }

    /// # Summary
    /// 解析原始载荷。
    ///
    /// # Logic
    /// 1. 识别载荷外形：含 `data` 数组的对象 > 裸数组 > 其他 (返回空)。
    /// 2. 记录数超过窗口时只保留最后 `max_records` 条。
    /// 3. 逐条解码，失败的记录记日志后丢弃。
    /// 4. 按日期字符串升序稳定排序。
    ///
    /// # Arguments
    /// * `raw`: 已反序列化的原始载荷。
    ///
    /// # Returns
    /// 标准 K 线序列，可能为空。
    pub fn normalize(&self, raw: &Value) -> Vec<CanonicalCandle> {
        let records = extract_records(raw);
        let window = &records[records.len().saturating_sub(self.max_records)..];

        let mut dropped = 0usize;
        let mut candles: Vec<CanonicalCandle> = window
            .iter()
            .enumerate()
            .filter_map(|(i, record)| match self.decode_record(record) {
                Ok(candle) => Some(candle),
                Err(e) => {
                    debug!("Dropping record #{}: {}", i, e);
                    dropped += 1;
                    None
                }
            })
            .collect();

        candles.sort_by(|a, b| a.date.cmp(&b.date));
        debug!(
            "Normalized payload: {} kept, {} dropped, {} truncated",
            candles.len(),
            dropped,
            records.len() - window.len()
        );
        candles
    }

    /// # Summary
    /// 解码单条记录。
    ///
    /// # Logic
    /// 1. 记录必须是键值映射。
    /// 2. 按 `RecordShape::ALL` 的顺序寻找第一个匹配的结构并交给它解码。
    /// 3. 若开启校验，再检查 OHLC 包络关系。
    pub fn decode_record(&self, record: &Value) -> Result<CanonicalCandle, DecodeError> {
        let object = record.as_object().ok_or(DecodeError::NotAnObject)?;
        let shape = RecordShape::ALL
            .into_iter()
            .find(|shape| shape.matches(object))
            .ok_or(DecodeError::UnknownShape)?;
        let candle = shape.decode(object)?;

        if self.validate_ohlc && !candle.has_consistent_range() {
            return Err(DecodeError::InvalidOhlc(candle.date));
        }
        Ok(candle)
    }
}

/// # Summary
/// 按默认配置 (不校验 OHLC) 解析载荷的便捷函数。
///
/// # Arguments
/// * `raw`: 原始载荷。
/// * `max_records`: 截断窗口大小，常用 `DEFAULT_MAX_RECORDS`。
pub fn normalize(raw: &Value, max_records: usize) -> Vec<CanonicalCandle> {
    PayloadNormalizer::new(max_records).normalize(raw)
}

/// 识别载荷外形并取出记录列表
fn extract_records(raw: &Value) -> &[Value] {
    match raw {
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        Value::Array(items) => items,
        _ => &[],
    }
}
