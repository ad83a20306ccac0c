use kline_core::config::{DEFAULT_MAX_RECORDS, FeedConfig};
use kline_core::market::error::DecodeError;
use kline_feed::payload::{PayloadNormalizer, normalize};
use serde_json::{Value, json};

/// 生成 n 条新版结构记录，日期从 20240101 起递增
fn new_shape_records(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "trade_date": format!("2024{:04}", 101 + i),
                "open": 10.0,
                "close": 10.5,
                "high": 11.0,
                "low": 9.5,
                "vol": 1000
            })
        })
        .collect()
}

#[test]
fn test_mixed_string_and_numeric_fields() {
    let raw = json!([
        {"trade_date": "20240102", "open": 10.5, "close": 10.2, "high": 10.8, "low": 10.1, "volume": 1200},
        {"trade_date": "20240101", "open": "10", "close": "10.5", "high": "11", "low": "9.5", "vol": "1000"}
    ]);

    let candles = normalize(&raw, DEFAULT_MAX_RECORDS);
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].date, "20240101");
    assert_eq!(candles[0].open, 10.0);
    assert_eq!(candles[0].volume, 1000.0);
    assert!(candles[0].is_up());
    assert_eq!(candles[1].date, "20240102");
    assert_eq!(candles[1].volume, 1200.0);
    assert!(!candles[1].is_up());
}

#[test]
fn test_data_envelope_is_unwrapped() {
    let raw = json!({"code": 0, "data": new_shape_records(5)});
    let candles = normalize(&raw, DEFAULT_MAX_RECORDS);
    assert_eq!(candles.len(), 5);
    assert!(candles.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn test_unrecognized_payloads_yield_empty() {
    assert!(normalize(&json!({"data": "oops"}), 60).is_empty());
    assert!(normalize(&json!({"items": []}), 60).is_empty());
    assert!(normalize(&json!("text"), 60).is_empty());
    assert!(normalize(&Value::Null, 60).is_empty());
    assert!(normalize(&json!([]), 60).is_empty());
}

#[test]
fn test_truncates_to_last_window_before_sorting() {
    let mut records = new_shape_records(80);
    records.reverse();
    // 倒序输入：最后 60 条是日期最早的 60 条
    let candles = normalize(&Value::Array(records), 60);
    assert_eq!(candles.len(), 60);
    assert_eq!(candles[0].date, "20240101");
    assert_eq!(candles[59].date, format!("2024{:04}", 101 + 59));
}

#[test]
fn test_truncation_keeps_most_recent_in_chronological_input() {
    let candles = normalize(&Value::Array(new_shape_records(75)), 60);
    assert_eq!(candles.len(), 60);
    assert_eq!(candles[0].date, format!("2024{:04}", 101 + 15));
}

#[test]
fn test_missing_required_fields_drop_record() {
    let raw = json!([
        {"trade_date": "20240101", "open": 10, "close": 10.5, "high": 11, "low": 9.5},
        {"trade_date": "20240102", "close": 10.5, "high": 11, "low": 9.5},
        {"trade_date": "20240103", "open": 10, "high": 11, "low": 9.5},
        {"trade_date": "20240104", "open": 10, "close": 10.5, "low": 9.5},
        {"trade_date": "20240105", "open": 10, "close": 10.5, "high": 11},
        {"trade_date": null, "open": 10, "close": 10.5, "high": 11, "low": 9.5},
        {"trade_date": "20240107", "open": "n/a", "close": 10.5, "high": 11, "low": 9.5},
        {"open": 10, "close": 10.5, "high": 11, "low": 9.5},
        42
    ]);

    let candles = normalize(&raw, 60);
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].date, "20240101");
    // 成交量缺失不构成丢弃理由
    assert_eq!(candles[0].volume, 0.0);
}

#[test]
fn test_legacy_shape_and_volume_aliases() {
    let raw = json!([
        {"日期": "2024-01-03", "开盘": "10.1", "收盘": "10.4", "最高": "10.6", "最低": "10.0", "成交量": "3000"},
        {"trade_date": "2024-01-02", "open": 10, "close": 10.1, "high": 10.3, "low": 9.9, "成交量": 2000},
        {"trade_date": "2024-01-01", "open": 10, "close": 10.1, "high": 10.3, "low": 9.9, "vol": "bad", "volume": 1500}
    ]);

    let candles = normalize(&raw, 60);
    let dates: Vec<&str> = candles.iter().map(|c| c.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(candles[0].volume, 1500.0);
    assert_eq!(candles[1].volume, 2000.0);
    assert_eq!(candles[2].close, 10.4);
    assert_eq!(candles[2].volume, 3000.0);
}

#[test]
fn test_new_shape_takes_priority_over_legacy() {
    let normalizer = PayloadNormalizer::default();
    // 同时带两种日期键时按新版结构解码，新版字段缺失即丢弃
    let record = json!({"trade_date": "20240101", "日期": "20240101", "开盘": 1, "收盘": 1, "最高": 1, "最低": 1});
    assert_eq!(
        normalizer.decode_record(&record),
        Err(DecodeError::MissingField("open"))
    );
    assert_eq!(normalizer.decode_record(&json!({"foo": 1})), Err(DecodeError::UnknownShape));
    assert_eq!(normalizer.decode_record(&json!([1, 2])), Err(DecodeError::NotAnObject));
}

#[test]
fn test_ohlc_validation_is_opt_in() {
    let raw = json!([
        {"trade_date": "20240101", "open": 10, "close": 12, "high": 11, "low": 9},
        {"trade_date": "20240102", "open": 10, "close": 10.5, "high": 11, "low": 9.5}
    ]);

    assert_eq!(normalize(&raw, 60).len(), 2);

    let config = FeedConfig {
        max_records: 60,
        validate_ohlc: true,
    };
    let candles = PayloadNormalizer::from_config(&config).normalize(&raw);
    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].date, "20240102");
}

#[test]
fn test_string_ordering_is_lexicographic() {
    let raw = json!([
        {"trade_date": "20240110", "open": 1, "close": 1, "high": 1, "low": 1},
        {"trade_date": "2024-01-05", "open": 1, "close": 1, "high": 1, "low": 1},
        {"trade_date": "20240102", "open": 1, "close": 1, "high": 1, "low": 1}
    ]);

    // '-' 小于 '0'，混合格式按字典序而非日历排序
    let dates: Vec<String> = normalize(&raw, 60).into_iter().map(|c| c.date).collect();
    assert_eq!(dates, ["2024-01-05", "20240102", "20240110"]);
}
