use kline_core::market::entity::CanonicalCandle;
use kline_core::market::error::DecodeError;
use serde_json::{Map, Value};

/// # Summary
/// 可识别的原始记录结构。
///
/// # Invariants
/// - `ALL` 的顺序即匹配优先级：新版接口结构优先于旧版中文键结构。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// 新版接口：`trade_date` / `open` / `close` / `high` / `low` / `vol`
    New,
    /// 旧版接口：中文键
    Legacy,
}

/// 单一结构下各字段使用的键名
struct FieldKeys {
    date: &'static str,
    open: &'static str,
    close: &'static str,
    high: &'static str,
    low: &'static str,
    // 成交量按顺序回退
    volume: &'static [&'static str],
}

const NEW_KEYS: FieldKeys = FieldKeys {
    date: "trade_date",
    open: "open",
    close: "close",
    high: "high",
    low: "low",
    volume: &["vol", "volume", "成交量"],
};

const LEGACY_KEYS: FieldKeys = FieldKeys {
    date: "日期",
    open: "开盘",
    close: "收盘",
    high: "最高",
    low: "最低",
    volume: &["成交量"],
};

impl RecordShape {
    pub const ALL: [RecordShape; 2] = [RecordShape::New, RecordShape::Legacy];

    fn keys(self) -> &'static FieldKeys {
        match self {
            RecordShape::New => &NEW_KEYS,
            RecordShape::Legacy => &LEGACY_KEYS,
        }
    }

    /// # Summary
    /// 判断记录是否属于该结构。
    ///
    /// # Logic
    /// 仅检查标志性的日期键是否存在，不关心其取值是否合法。
    pub fn matches(self, record: &Map<String, Value>) -> bool {
        record.contains_key(self.keys().date)
    }

    /// # Summary
    /// 按该结构的键名提取一根标准 K 线。
    ///
    /// # Logic
    /// 1. 日期、开、收、高、低为必填，缺失或无法转换即返回 `MissingField`。
    /// 2. 成交量依次尝试各别名，全部失败时取 0。
    ///
    /// # Arguments
    /// * `record`: 原始键值映射。
    ///
    /// # Returns
    /// 成功返回 K 线，失败返回首个缺失字段对应的错误。
    pub fn decode(self, record: &Map<String, Value>) -> Result<CanonicalCandle, DecodeError> {
        let keys = self.keys();
        let number = |key: &'static str| {
            record
                .get(key)
                .and_then(coerce_number)
                .ok_or(DecodeError::MissingField(key))
        };

        let date = record
            .get(keys.date)
            .and_then(coerce_date)
            .ok_or(DecodeError::MissingField(keys.date))?;
        let open = number(keys.open)?;
        let close = number(keys.close)?;
        let high = number(keys.high)?;
        let low = number(keys.low)?;
        let volume = keys
            .volume
            .iter()
            .find_map(|key| record.get(*key).and_then(coerce_number))
            .unwrap_or(0.0);

        Ok(CanonicalCandle {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// # Summary
/// 将 JSON 值宽松地转换为有限浮点数。
///
/// # Logic
/// 1. 数值类型直接取值。
/// 2. 字符串去除首尾空白后按浮点数解析。
/// 3. 其余类型或非有限结果 (NaN、inf) 视为缺失。
pub fn coerce_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// # Summary
/// 提取日期字符串。
///
/// # Logic
/// 字符串原样保留；整数 (如 `20240101`) 转为十进制字符串；其余视为缺失。
pub fn coerce_date(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}
