use config::{Config, Environment, File};
use kline_core::config::{ChartConfig, ConfigError};
use std::path::Path;

/// 环境变量前缀，如 `KLINE__FEED__MAX_RECORDS=120`
const ENV_PREFIX: &str = "KLINE";

/// # Summary
/// 加载图表配置。
///
/// # Logic
/// 1. 以 `ChartConfig::default()` 为底 (结构体字段缺省即取默认值)。
/// 2. 叠加可选的配置文件，格式由扩展名推断。
/// 3. 叠加 `KLINE__` 前缀的环境变量，`__` 分隔层级。
/// 4. 反序列化后校验取值范围。
///
/// # Arguments
/// * `path`: 可选的配置文件路径。
///
/// # Returns
/// 成功返回配置，失败返回 `ConfigError`。
pub fn load_config(path: Option<&Path>) -> Result<ChartConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config: ChartConfig = builder
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
