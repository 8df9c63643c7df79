// ============================================================================
// PTC - 主题配置模型
// ============================================================================
//
// 文件: src/models/theme.rs
// 职责: UI 组件库主题配置的数据结构与构造
// 边界:
//   - ✅ 颜色、图标字体、断点等主题字段定义
//   - ✅ 主题配置的纯函数构造
//   - ✅ 主题导出格式（JSON/TOML/YAML/CSS）
//   - ❌ 不应包含终端渲染逻辑
//   - ❌ 不应包含运行时可变状态
//
// ============================================================================

use serde::{Serialize, Serializer};
use std::fmt;

/// RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// 从 0xRRGGBB 构造
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 调色板中的颜色角色
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub error: Rgb,
    pub info: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
}

impl Palette {
    /// 按固定顺序列出 (角色名, 颜色)
    pub fn roles(&self) -> [(&'static str, Rgb); 7] {
        [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("error", self.error),
            ("info", self.info),
            ("success", self.success),
            ("warning", self.warning),
        ]
    }
}

/// 图标字体选择
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum IconFont {
    #[serde(rename = "mdiSvg")]
    MdiSvg,
}

/// 初始化前必须注册的交互指令
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Directive {
    /// 触摸/滑动手势
    Touch,
    /// 点击波纹反馈
    Ripple,
}

/// 主题配置（启动时一次性交给组件库）
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ThemeConfig {
    /// 深色模式
    pub dark: bool,
    /// 是否输出 CSS 自定义属性
    pub custom_properties: bool,
    pub icon_font: IconFont,
    /// 移动端/桌面端布局切换的像素宽度
    pub mobile_breakpoint: u32,
    /// 深色主题调色板
    pub palette: Palette,
}

/// 默认调色板
const DARK_PALETTE: Palette = Palette {
    primary: Rgb::hex(0x00e5ff),
    secondary: Rgb::hex(0xd500f9),
    accent: Rgb::hex(0xff4081),
    error: Rgb::hex(0xff5252),
    info: Rgb::hex(0x2196f3),
    success: Rgb::hex(0x4caf50),
    warning: Rgb::hex(0xfb8c00),
};

impl ThemeConfig {
    /// 构造主题配置，只依赖编译期常量
    pub fn build() -> Self {
        Self {
            dark: true,
            custom_properties: true,
            icon_font: IconFont::MdiSvg,
            mobile_breakpoint: 768,
            palette: DARK_PALETTE,
        }
    }

    /// 宽度是否处于移动端布局
    pub fn is_mobile(&self, width: u32) -> bool {
        width < self.mobile_breakpoint
    }

    /// 渲染 CSS 自定义属性
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (role, color) in self.palette.roles() {
            css.push_str(&format!("  --v-{}-base: {};\n", role, color));
        }
        css.push_str(&format!(
            "  --v-mobile-breakpoint: {}px;\n",
            self.mobile_breakpoint
        ));
        css.push_str("}\n");
        css
    }
}

/// 组件库初始化参数
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UiLibraryInit {
    /// 需先于初始化注册的指令
    pub directives: Vec<Directive>,
    pub theme: ThemeConfig,
}

impl UiLibraryInit {
    pub fn new(theme: ThemeConfig) -> Self {
        Self {
            directives: vec![Directive::Touch, Directive::Ripple],
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_is_deterministic() {
        assert_eq!(ThemeConfig::build(), ThemeConfig::build());
    }

    #[test]
    fn palette_renders_as_hex() {
        let theme = ThemeConfig::build();
        assert_eq!(theme.palette.primary.to_string(), "#00e5ff");
        assert_eq!(theme.palette.info.to_string(), "#2196f3");
        assert_eq!(theme.palette.warning.to_string(), "#fb8c00");
    }

    #[test]
    fn breakpoint_switches_at_768() {
        let theme = ThemeConfig::build();
        assert!(theme.is_mobile(767));
        assert!(!theme.is_mobile(768));
    }

    #[test]
    fn serializes_icon_font_and_colors() {
        let json = serde_json::to_value(ThemeConfig::build()).unwrap();
        assert_eq!(json["icon_font"], "mdiSvg");
        assert_eq!(json["palette"]["accent"], "#ff4081");
        assert_eq!(json["dark"], true);
    }

    #[test]
    fn css_lists_every_role() {
        let css = ThemeConfig::build().to_css();
        for role in ["primary", "secondary", "accent", "error", "info", "success", "warning"] {
            assert!(css.contains(&format!("--v-{}-base", role)));
        }
        assert!(css.contains("--v-mobile-breakpoint: 768px;"));
    }

    #[test]
    fn init_registers_touch_and_ripple() {
        let init = UiLibraryInit::new(ThemeConfig::build());
        assert_eq!(init.directives, vec![Directive::Touch, Directive::Ripple]);
    }
}
