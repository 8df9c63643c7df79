// ============================================================================
// PTC - 结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 路由、调色板、语言包检查与品牌替换结果的终端展示
// 边界:
//   - ✅ 表格格式化输出
//   - ✅ 国际化文本支持
//   - ✅ 统计信息汇总
//   - ❌ 不应包含具体业务逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use serde::Serialize;
use std::io::{self, Write};

use crate::core::branding::{BrandingReport, FileOutcome};
use crate::core::locale::LocaleReport;
use crate::models::route::RouteEntry;
use crate::models::theme::ThemeConfig;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

// ============================================================================
// 路由表
// ============================================================================

/// 路由表中的一行
#[derive(Debug, Clone, Serialize)]
pub struct RouteRow {
    pub path: String,
    pub name: Option<String>,
    /// 已翻译的标题
    pub title: Option<String>,
    pub component: Option<String>,
    pub icon: Option<String>,
    pub redirect: Option<String>,
    pub position: Option<i32>,
    pub show_in_navi: bool,
    pub fullscreen: bool,
    /// 给定后端能力下是否可用
    pub available: bool,
}

impl RouteRow {
    pub fn new(path: String, entry: &RouteEntry, title: Option<String>, available: bool) -> Self {
        Self {
            path,
            name: entry.name.clone(),
            title,
            component: entry.component.map(|c| c.to_string()),
            icon: entry.icon.map(|i| i.mdi_name().to_string()),
            redirect: entry.redirect.clone(),
            position: entry.position,
            show_in_navi: entry.show_in_navi,
            fullscreen: entry.fullscreen,
            available,
        }
    }
}

/// 打印路由表格
pub fn print_routes_table(rows: &[RouteRow]) {
    let path_width = column_width(rows.iter().map(|r| r.path.as_str()), t!("routes.column.path").as_str());
    let title_width = column_width(
        rows.iter().map(|r| r.title.as_deref().unwrap_or("-")),
        t!("routes.column.title").as_str(),
    );

    Logger::info("");
    Logger::info(format!(
        "    {}  {}  {}  {}",
        TextStyles::bold(&TextStyles::pad(&t!("routes.column.position"), 4)),
        TextStyles::bold(&TextStyles::pad(&t!("routes.column.path"), path_width)),
        TextStyles::bold(&TextStyles::pad(&t!("routes.column.title"), title_width)),
        TextStyles::bold(&t!("routes.column.target")),
    ));
    Logger::info("───────────────────────────────────────");

    for row in rows {
        let position = row
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let path = TextStyles::pad(&row.path, path_width);
        let title = TextStyles::pad(row.title.as_deref().unwrap_or("-"), title_width);

        let (marker, target) = match &row.redirect {
            Some(target) => (
                Colors::dim(icons::REDIRECT).to_string(),
                format!("{} {}", icons::ARROW, target),
            ),
            None => {
                let marker = if row.available {
                    Colors::success(icons::ROUTE).to_string()
                } else {
                    Colors::dim(icons::SKIP).to_string()
                };
                let mut target = row.component.clone().unwrap_or_default();
                if row.fullscreen {
                    target.push_str(&format!(" ({})", t!("routes.fullscreen")));
                }
                (marker, target)
            }
        };

        let title = if row.available || row.redirect.is_some() {
            title
        } else {
            TextStyles::strikethrough(&title).to_string()
        };

        Logger::info(format!(
            "{}   {}  {}  {}  {}",
            marker,
            TextStyles::pad(&position, 4),
            path,
            title,
            Colors::dim(&target)
        ));
    }

    Logger::info("");
    let _ = io::stdout().flush();
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

// ============================================================================
// 主题调色板
// ============================================================================

/// 打印主题配置与色块
pub fn print_palette(theme: &ThemeConfig) {
    Logger::info("");
    Logger::info(format!("{} {}", icons::THEME, TextStyles::bold(&t!("theme.palette"))));
    Logger::info("───────────────────────────────────────");
    for (role, color) in theme.palette.roles() {
        Logger::info(format!(
            "{} {}  {}",
            Colors::swatch(color),
            TextStyles::pad(role, 10),
            color
        ));
    }
    Logger::info("");
    Logger::info(tf!("theme.dark", theme.dark));
    Logger::info(tf!("theme.breakpoint", theme.mobile_breakpoint));
    Logger::info(tf!("theme.custom_properties", theme.custom_properties));
    Logger::info("");
}

// ============================================================================
// 语言包检查
// ============================================================================

/// 打印语言包检查结果，返回是否存在问题
pub fn print_locale_reports(reports: &[LocaleReport], fallback: &str, detail: bool) -> bool {
    Logger::info("");
    Logger::info(TextStyles::bold(&tf!("locale.check.header", fallback)).to_string());
    Logger::info("───────────────────────────────────────");

    let mut has_issues = false;
    for report in reports {
        match &report.error {
            Some(error) => {
                has_issues = true;
                Logger::info(format!(
                    "{} {}  {}",
                    Colors::error(icons::ERROR),
                    TextStyles::pad(&report.code, 6),
                    tf!("locale.check.failed", error)
                ));
            }
            None if report.missing.is_empty() => {
                Logger::info(format!(
                    "{} {}  {}  {}",
                    Colors::success(icons::SUCCESS),
                    TextStyles::pad(&report.code, 6),
                    tf!("locale.check.keys", report.keys),
                    Colors::dim(&report.source)
                ));
            }
            None => {
                has_issues = true;
                Logger::info(format!(
                    "{} {}  {}  {}",
                    Colors::warn(icons::WARNING),
                    TextStyles::pad(&report.code, 6),
                    tf!("locale.check.missing", report.missing.len(), report.keys),
                    Colors::dim(&report.source)
                ));
                if detail {
                    for key in &report.missing {
                        Logger::info(format!("         {} {}", icons::ARROW, key));
                    }
                }
            }
        }
    }
    Logger::info("");
    has_issues
}

// ============================================================================
// 品牌替换
// ============================================================================

/// 打印品牌替换结果
pub fn print_branding_report(label: &str, report: &BrandingReport, dry_run: bool, detail: bool) {
    let key = if dry_run {
        "brand.summary_dry_run"
    } else {
        "brand.summary"
    };
    Logger::info(tf!(
        key,
        label,
        report.updated(),
        report.outcomes.len(),
        report.skipped()
    ));

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Updated { path } if detail => {
                Logger::info(format!("  {} {}", Colors::success(icons::SUCCESS), path.display()));
            }
            FileOutcome::Skipped { path, reason } => {
                Logger::warn(format!("  {} {}: {}", icons::SKIP, path.display(), reason));
            }
            _ => {}
        }
    }
}
