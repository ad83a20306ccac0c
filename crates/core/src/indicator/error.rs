use thiserror::Error;

/// # Summary
/// 指标参数错误，出现时对应指标被跳过而不是中断整个叠加计算。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// 必需参数缺失
    #[error("Missing param: {0}")]
    MissingParam(&'static str),
    /// 参数存在但取值非法 (如周期为 0 或非整数)
    #[error("Invalid param {name}: {value}")]
    InvalidParam { name: &'static str, value: String },
}
