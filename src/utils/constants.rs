// ============================================================================
// PTC - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 终端图标字符定义
//   - ✅ 进度条样式定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "PTC";

/// 终端图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 路由图标
    pub const ROUTE: &str = "●";
    /// 重定向图标
    pub const REDIRECT: &str = "↪";
    /// 语言图标
    pub const LOCALE: &str = "◆";
    /// 主题图标
    pub const THEME: &str = "◈";
    /// 箭头图标
    pub const ARROW: &str = "→";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 进度条样式
pub mod progress {
    /// 模板
    pub const TEMPLATE: &str = "{prefix} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";
    /// 已完成块与未完成块
    pub const CHARS: &str = "█▓░";
}
