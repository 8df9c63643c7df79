// ============================================================================
// PTC - CLI Check 命令
// ============================================================================
//
// 文件: src/cli/check.rs
// 职责: 面板配置检查命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用路由表、主题与语言包检查
//   - ✅ 检查结果格式化输出
//   - ❌ 不应包含具体检查逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::cli::locale;
use crate::core::routes::RouteTable;
use crate::models::config::Config;
use crate::models::theme::ThemeConfig;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 检查面板配置
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// 检查路由表
    #[arg(long)]
    pub routes: bool,

    /// 检查主题配置
    #[arg(long)]
    pub theme: bool,

    /// 检查语言包
    #[arg(long)]
    pub locales: bool,

    /// 显示详细信息
    #[arg(short = 'd', long)]
    pub detail: bool,
}

pub async fn handle_check(args: CheckArgs) -> Result<()> {
    Logger::info(t!("check.start"));

    let config = Config::snapshot();
    let check_items = determine_check_items(&args);
    let mut has_issues = false;

    if check_items.routes {
        has_issues |= check_routes(&config);
    }
    if check_items.theme {
        has_issues |= check_theme();
    }
    if check_items.locales {
        has_issues |= locale::check(&config, args.detail).await?;
    }

    if has_issues {
        std::process::exit(1);
    } else {
        Logger::success(t!("check.all_good"));
    }

    Ok(())
}

/// 检查项目配置
struct CheckItems {
    routes: bool,
    theme: bool,
    locales: bool,
}

/// 未指定任何检查项时全部检查
fn determine_check_items(args: &CheckArgs) -> CheckItems {
    let all = !args.routes && !args.theme && !args.locales;
    CheckItems {
        routes: args.routes || all,
        theme: args.theme || all,
        locales: args.locales || all,
    }
}

/// 路由表校验，返回是否存在问题
fn check_routes(config: &Config) -> bool {
    match RouteTable::builtin() {
        Ok(table) => {
            let navigation = table.navigation();
            let available = table.available_navigation(&config.capabilities);
            Logger::success(tf!(
                "check.routes.ok",
                table.flatten().len(),
                navigation.len(),
                available.len()
            ));
            false
        }
        Err(e) => {
            Logger::error(tf!("check.routes.invalid", e));
            true
        }
    }
}

/// 主题构造必须确定且断点为正，返回是否存在问题
fn check_theme() -> bool {
    let first = ThemeConfig::build();
    let second = ThemeConfig::build();
    if first != second || first.mobile_breakpoint == 0 {
        Logger::error(t!("check.theme.invalid"));
        return true;
    }
    Logger::success(tf!("check.theme.ok", first.mobile_breakpoint));
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(routes: bool, theme: bool, locales: bool) -> CheckArgs {
        CheckArgs {
            routes,
            theme,
            locales,
            detail: false,
        }
    }

    #[test]
    fn no_flags_checks_everything() {
        let items = determine_check_items(&args(false, false, false));
        assert!(items.routes && items.theme && items.locales);
    }

    #[test]
    fn flags_select_checks() {
        let items = determine_check_items(&args(false, true, false));
        assert!(!items.routes && items.theme && !items.locales);
    }

    #[test]
    fn builtin_routes_and_theme_pass() {
        assert!(!check_routes(&Config::default()));
        assert!(!check_theme());
    }
}
