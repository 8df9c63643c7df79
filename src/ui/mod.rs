// ============================================================================
// PTC - UI 模块
// ============================================================================
//
// 文件: src/ui/mod.rs
// 职责: 终端展示组件入口
// 边界:
//   - ✅ 表格与进度展示子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod progress;
pub mod summary;
