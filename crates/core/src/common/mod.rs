use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 32 位 ARGB 颜色值，用于蜡烛、指标线与交易标记的着色。
///
/// # Invariants
/// - 高 8 位为 alpha 通道，其余依次为 R、G、B。
/// - 序列化形式固定为 `#AARRGGBB` 字符串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// 完全不透明的颜色
    pub const fn opaque(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// alpha 通道
    pub fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// # Summary
    /// 返回替换 alpha 通道后的新颜色，常用于布林带填充区域的半透明色。
    ///
    /// # Arguments
    /// * `alpha`: 新的 alpha 值 (0-255)。
    ///
    /// # Returns
    /// 保留 RGB 分量的新颜色。
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self((u32::from(alpha) << 24) | (self.0 & 0x00FF_FFFF))
    }
}

impl FromStr for Color {
    type Err = String;

    /// # Summary
    /// 解析 `#RRGGBB` 或 `#AARRGGBB` 形式的颜色字符串。
    ///
    /// # Logic
    /// 1. 去掉至多一个 `#` 前缀。
    /// 2. 6 位十六进制视为不透明颜色，8 位十六进制包含 alpha 通道。
    /// 3. 其他长度或非十六进制字符 (包括符号位) 返回错误。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color: {}", s));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| format!("Invalid color: {}", s))?;
        match hex.len() {
            6 => Ok(Color::opaque(value)),
            8 => Ok(Color(value)),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
