//! 主图叠加指标 (均线、布林带) 的计算与配色。

pub mod calculator;
pub mod overlay;
pub mod palette;
