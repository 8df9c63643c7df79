// ============================================================================
// PTC - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 模块声明与命令行入口
// 边界:
//   - ✅ 启动异步运行时
//   - ✅ 顶层错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

mod cli;
mod core;
mod i18n;
mod models;
mod ui;
mod utils;

use utils::logger::Logger;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
