// ============================================================================
// PTC - 文本样式工具
// ============================================================================
//
// 文件: src/utils/styles.rs
// 职责: 终端文本样式格式化
// 边界:
//   - ✅ 粗体、删除线等文本样式
//   - ✅ 表格列宽对齐
//   - ❌ 不应包含颜色相关功能
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

use colored::{ColoredString, Colorize};

/// 文本样式工具函数
pub struct TextStyles;

impl TextStyles {
    /// 粗体文本
    pub fn bold(text: &str) -> ColoredString {
        text.bold()
    }

    /// 删除线文本（不可用的导航条目）
    pub fn strikethrough(text: &str) -> ColoredString {
        text.strikethrough()
    }

    /// 按字符数右侧补齐，宽字符按一个字符计
    pub fn pad(text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            text.to_string()
        } else {
            format!("{}{}", text, " ".repeat(width - len))
        }
    }
}
