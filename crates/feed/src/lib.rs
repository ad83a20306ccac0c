//! 异构行情载荷到标准 K 线序列的解析。

pub mod payload;
pub mod shape;
