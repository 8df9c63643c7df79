// ============================================================================
// PTC - 颜色工具
// ============================================================================
//
// 文件: src/utils/colors.rs
// 职责: 终端颜色输出
// 边界:
//   - ✅ 日志级别颜色
//   - ✅ 调色板色块渲染
//   - ✅ 颜色开关（配置与 TTY 检测）
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文本内容处理
//
// ============================================================================

use colored::{ColoredString, Colorize};

use crate::models::config::Config;
use crate::models::theme::Rgb;

/// 颜色工具函数
pub struct Colors;

impl Colors {
    /// 根据配置与终端类型设置全局颜色开关（启动时调用一次）
    pub fn init() {
        let enabled = Config::get_colored() && atty::is(atty::Stream::Stdout);
        colored::control::set_override(enabled);
    }

    /// 信息颜色
    pub fn info(text: &str) -> ColoredString {
        text.cyan()
    }

    /// 警告颜色
    pub fn warn(text: &str) -> ColoredString {
        text.yellow()
    }

    /// 错误颜色
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// 成功颜色
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// 次要信息
    pub fn dim(text: &str) -> ColoredString {
        text.bright_black()
    }

    /// 以真彩色背景渲染色块
    pub fn swatch(color: Rgb) -> ColoredString {
        "    ".on_truecolor(color.r, color.g, color.b)
    }
}
