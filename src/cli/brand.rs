// ============================================================================
// PTC - Brand 命令处理
// ============================================================================
//
// 文件: src/cli/brand.rs
// 职责: 替换语言包与构建产物中的上游品牌名
// 边界:
//   - ✅ 替换目标与预演参数解析
//   - ✅ 进度显示与结果汇总
//   - ❌ 不应包含替换规则实现
//
// ============================================================================

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::Path;

use crate::core::branding::{self, BrandingError};
use crate::models::config::Config;
use crate::ui::progress::Progress;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 替换目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BrandTarget {
    /// 语言包目录
    Locales,
    /// 构建产物目录
    Dist,
    /// 两者
    All,
}

/// 品牌替换参数
#[derive(Debug, Args)]
pub struct BrandArgs {
    /// 替换目标
    #[arg(value_enum, default_value_t = BrandTarget::All)]
    pub target: BrandTarget,

    /// 被替换的品牌名（默认取配置）
    #[arg(long)]
    pub from: Option<String>,

    /// 新品牌名（默认取配置）
    #[arg(long)]
    pub to: Option<String>,

    /// 只报告将要修改的文件
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// 列出每个修改的文件
    #[arg(short = 'd', long)]
    pub detail: bool,
}

/// 处理 brand 命令
pub fn handle_brand(args: BrandArgs) -> Result<()> {
    let config = Config::snapshot();
    let from = args.from.unwrap_or(config.branding.from);
    let to = args.to.unwrap_or(config.branding.to);
    let explicit = args.target != BrandTarget::All;

    Logger::info(tf!("brand.start", from, to));
    if args.dry_run {
        Logger::info(t!("brand.dry_run"));
    }

    if matches!(args.target, BrandTarget::Locales | BrandTarget::All) {
        let dir = Path::new(&config.locales.dir);
        match branding::rebrand_locale_dir(dir, &from, &to, args.dry_run) {
            Ok(report) => {
                summary::print_branding_report(&t!("brand.locales"), &report, args.dry_run, args.detail)
            }
            Err(BrandingError::MissingDirectory(path)) if !explicit => {
                Logger::warn(tf!("brand.skip_missing", path.display()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    if matches!(args.target, BrandTarget::Dist | BrandTarget::All) {
        let dir = Path::new(&config.server.dist_dir);
        let progress = Progress::bar(&t!("brand.dist"));
        let result = branding::patch_dist(
            dir,
            &from,
            &to,
            &config.branding.extensions,
            args.dry_run,
            |done, total| progress.update(done, total),
        );
        progress.finish();

        match result {
            Ok(report) => {
                summary::print_branding_report(&t!("brand.dist"), &report, args.dry_run, args.detail)
            }
            Err(BrandingError::MissingDirectory(path)) if !explicit => {
                Logger::warn(tf!("brand.skip_missing", path.display()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
