//! 值空间到像素空间的 K 线几何映射。

pub mod axis;
pub mod mapper;
pub mod scale;
