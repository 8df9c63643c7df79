// ============================================================================
// PTC - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 数据模型模块入口和导出
// 边界:
//   - ✅ 数据模型子模块导出
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod bundle;
pub mod config;
pub mod route;
pub mod theme;
