//! K 线图数据管线的核心领域模型：实体、错误、端口与配置。

pub mod chart;
pub mod common;
pub mod config;
pub mod indicator;
pub mod market;
