// ============================================================================
// PTC - Routes 命令处理
// ============================================================================
//
// 文件: src/cli/routes.rs
// 职责: 展示路由表与导航菜单
// 边界:
//   - ✅ 路由展示参数解析
//   - ✅ 标题按语言翻译
//   - ✅ 按后端能力过滤导航条目
//   - ❌ 不应包含路由表定义与校验
//   - ❌ 不应包含表格渲染细节
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::shell::Shell;
use crate::models::config::Config;
use crate::models::route::{BackendCapabilities, RouteEntry};
use crate::ui::summary::{self, RouteRow};
use crate::utils::logger::Logger;
use crate::tf;

/// 路由展示参数
#[derive(Debug, Args)]
pub struct RoutesArgs {
    /// 只显示导航菜单条目（按 position 排序）
    #[arg(long)]
    pub navi: bool,

    /// 只显示配置的后端能力下可用的导航条目
    #[arg(long)]
    pub available: bool,

    /// 标题翻译使用的语言
    #[arg(long)]
    pub lang: Option<String>,

    /// 输出格式 (table, json)
    #[arg(short = 'f', long, default_value = "table")]
    pub format: String,
}

/// 处理 routes 命令
pub async fn handle_routes(args: RoutesArgs) -> Result<()> {
    let config = Config::snapshot();
    let shell = super::bootstrap_shell(&config).await?;

    if let Some(code) = &args.lang {
        if shell.loader().set_and_load_locale(code).await?.is_none() {
            Logger::warn(tf!("locale.unknown", code));
        }
    }

    let caps = &config.capabilities;
    let mut rows = Vec::new();
    for (path, entry) in select_entries(&shell, &args, caps) {
        let title = match entry.title_key() {
            Some(key) => Some(shell.translate(&key).await),
            None => None,
        };
        rows.push(RouteRow::new(path, entry, title, entry.is_available(caps)));
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "table" => {
            Logger::info(tf!("routes.header", rows.len(), shell.active_locale().await));
            summary::print_routes_table(&rows);
        }
        other => anyhow::bail!(tf!("error.unknown_format", other)),
    }
    Ok(())
}

/// 按参数选择条目：全表（含子路由）或导航菜单
fn select_entries<'a>(
    shell: &'a Shell,
    args: &RoutesArgs,
    caps: &BackendCapabilities,
) -> Vec<(String, &'a RouteEntry)> {
    if args.navi || args.available {
        shell
            .routes()
            .navigation()
            .into_iter()
            .filter(|entry| !args.available || entry.is_available(caps))
            .map(|entry| (entry.path.clone(), entry))
            .collect()
    } else {
        shell.routes().flatten()
    }
}
