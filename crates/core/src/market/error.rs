use thiserror::Error;

/// # Summary
/// 单条原始 K 线记录的解码错误。
///
/// # Invariants
/// - 仅在解码内部流转，解析器对外永远不返回该错误，只丢弃对应记录。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    // 记录不是键值映射
    #[error("Record is not an object")]
    NotAnObject,
    // 既不是新版结构也不是旧版结构
    #[error("Unknown record shape")]
    UnknownShape,
    // 必填字段缺失或无法转换为数值
    #[error("Missing or invalid field: {0}")]
    MissingField(&'static str),
    // 开启校验时 OHLC 包络关系不成立
    #[error("Inconsistent OHLC values on {0}")]
    InvalidOhlc(String),
}
