// ============================================================================
// PTC - 工具模块
// ============================================================================
//
// 文件: src/utils/mod.rs
// 职责: 通用工具模块入口
// 边界:
//   - ✅ 日志、颜色、样式、常量子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;
pub mod styles;
