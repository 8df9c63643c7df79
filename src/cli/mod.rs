// ============================================================================
// PTC - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 全局配置、日志与颜色初始化
//   - ✅ 命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含业务逻辑处理
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod brand;
pub mod check;
pub mod init;
pub mod locale;
pub mod routes;
pub mod serve;
pub mod theme;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::shell::Shell;
use crate::models::config::{Config, RuntimeArgs};
use crate::tf;
use crate::utils::colors::Colors;
use crate::utils::logger::Logger;
use brand::{handle_brand, BrandArgs};
use check::{handle_check, CheckArgs};
use init::{handle_init, InitArgs};
use locale::{handle_locale, LocaleArgs};
use routes::{handle_routes, RoutesArgs};
use serve::{handle_serve, ServeArgs};
use theme::{handle_theme, ThemeArgs};

/// PTC - Probe Tech Control panel shell
#[derive(Debug, Parser)]
#[command(name = "ptc")]
#[command(about = "Probe Tech Control panel shell: routes, theme, locales and SPA serving")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Interface language (zh_cn, en_us)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Configuration file (default: ptc.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Initial panel locale
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Fallback panel locale
    #[arg(long, global = true)]
    pub fallback_locale: Option<String>,

    /// Locale bundle directory
    #[arg(long, global = true)]
    pub locales_dir: Option<String>,

    /// Built panel directory
    #[arg(long, global = true)]
    pub dist: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Disable progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the built panel with history fallback
    Serve(ServeArgs),
    /// Show the route table and navigation menu
    Routes(RoutesArgs),
    /// Inspect and load locale bundles
    Locale(LocaleArgs),
    /// Render the theme configuration
    Theme(ThemeArgs),
    /// Replace the upstream brand name in locales and build output
    Brand(BrandArgs),
    /// Validate routes, theme and locale bundles
    Check(CheckArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Config::initialize(cli.config.as_deref())?;

    // Build runtime args to override config
    let runtime_args = build_runtime_args(&cli);
    // Merge runtime args to global config
    Config::merge_runtime_args(runtime_args)?;

    Logger::init_tracing(Config::get_verbose());
    Colors::init();

    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Routes(args) => handle_routes(args).await,
        Commands::Locale(args) => handle_locale(args).await,
        Commands::Theme(args) => handle_theme(args),
        Commands::Brand(args) => handle_brand(args),
        Commands::Check(args) => handle_check(args).await,
        Commands::Init(args) => handle_init(args, cli.config),
    }
}

/// 启动面板外壳，并报告启动期间加载失败的语言包
pub(crate) async fn bootstrap_shell(config: &Config) -> Result<Shell> {
    let shell = Shell::bootstrap(config).await?;
    for error in shell.startup_errors() {
        Logger::warn(tf!("locale.startup_failed", error));
    }
    Ok(shell)
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: if cli.verbose { Some(true) } else { None },
        colored: if cli.no_color { Some(false) } else { None },
        show_progress: if cli.no_progress { Some(false) } else { None },
        language: cli.language.clone(),
        locale: cli.locale.clone(),
        fallback_locale: cli.fallback_locale.clone(),
        locales_dir: cli.locales_dir.clone(),
        dist_dir: cli.dist.clone(),
    }
}
