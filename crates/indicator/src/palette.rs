use kline_core::common::Color;

/// 未配置或无法识别颜色名时使用的叠加线颜色
pub const DEFAULT_OVERLAY_COLOR: Color = Color::opaque(0xFF9800);

/// 颜色名到颜色值的固定映射 (键为小写)
const NAMED_COLORS: &[(&str, Color)] = &[
    ("blue", Color::opaque(0x2196F3)),
    ("red", Color::opaque(0xF44336)),
    ("green", Color::opaque(0x4CAF50)),
    ("orange", Color::opaque(0xFF9800)),
    ("purple", Color::opaque(0x9C27B0)),
    ("yellow", Color::opaque(0xFFEB3B)),
    ("cyan", Color::opaque(0x00BCD4)),
    ("pink", Color::opaque(0xE91E63)),
    ("white", Color::opaque(0xFFFFFF)),
    ("black", Color::opaque(0x000000)),
    ("grey", Color::opaque(0x9E9E9E)),
    ("gray", Color::opaque(0x9E9E9E)),
    ("amber", Color::opaque(0xFFC107)),
    ("teal", Color::opaque(0x009688)),
    ("indigo", Color::opaque(0x3F51B5)),
];

/// # Summary
/// 将颜色名解析为颜色值。
///
/// # Logic
/// 1. 忽略大小写与首尾空白查表。
/// 2. 名称缺失或不在表中时返回 `DEFAULT_OVERLAY_COLOR`。
pub fn resolve_color(name: Option<&str>) -> Color {
    name.map(|n| n.trim().to_ascii_lowercase())
        .and_then(|n| {
            NAMED_COLORS
                .iter()
                .find(|(key, _)| *key == n)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_OVERLAY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown_names() {
        assert_eq!(resolve_color(Some("blue")), Color::opaque(0x2196F3));
        assert_eq!(resolve_color(Some(" Purple ")), Color::opaque(0x9C27B0));
        assert_eq!(resolve_color(Some("grey")), resolve_color(Some("gray")));
        assert_eq!(resolve_color(Some("chartreuse")), DEFAULT_OVERLAY_COLOR);
        assert_eq!(resolve_color(None), DEFAULT_OVERLAY_COLOR);
    }
}
