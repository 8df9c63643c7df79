// ============================================================================
// PTC - Locale 命令处理
// ============================================================================
//
// 文件: src/cli/locale.rs
// 职责: 语言包查看、加载、查询与检查
// 边界:
//   - ✅ 语言子命令参数解析
//   - ✅ 调用加载器并输出结果
//   - ❌ 不应包含语言包获取与解码逻辑
//   - ❌ 不应包含翻译查找逻辑
//
// ============================================================================

use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::locale::{LocaleLoader, LocaleRegistry};
use crate::core::translator::Translator;
use crate::models::config::Config;
use crate::ui::progress::Progress;
use crate::ui::summary;
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::utils::styles::TextStyles;
use crate::{t, tf};

/// 语言包命令参数
#[derive(Debug, Args)]
pub struct LocaleArgs {
    #[command(subcommand)]
    pub command: LocaleCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocaleCommand {
    /// 列出已注册的语言包及来源
    List,
    /// 加载并激活语言，输出全部文本
    Load {
        /// 语言代码
        code: String,

        /// 输出格式 (table, json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
    /// 查询翻译键
    Get {
        /// 点分翻译键，例如 Router.Dashboard
        key: String,

        /// 查询前切换到的语言
        #[arg(long)]
        lang: Option<String>,
    },
    /// 检查全部语言包能否加载及键覆盖情况
    Check {
        /// 列出缺失的键
        #[arg(short = 'd', long)]
        detail: bool,
    },
}

/// 处理 locale 命令
pub async fn handle_locale(args: LocaleArgs) -> Result<()> {
    let config = Config::snapshot();
    match args.command {
        LocaleCommand::List => list(&config),
        LocaleCommand::Load { code, format } => load(&config, &code, &format).await,
        LocaleCommand::Get { key, lang } => get(&config, &key, lang.as_deref()).await,
        LocaleCommand::Check { detail } => {
            if check(&config, detail).await? {
                std::process::exit(1);
            }
            Logger::success(t!("locale.check.all_good"));
            Ok(())
        }
    }
}

fn list(config: &Config) -> Result<()> {
    let registry = LocaleRegistry::from_config(&config.locales)?;
    Logger::info(tf!("locale.list.header", registry.len()));
    for (code, source) in registry.iter() {
        let mut marks = Vec::new();
        if *code == config.i18n.locale {
            marks.push(t!("locale.list.active"));
        }
        if *code == config.i18n.fallback_locale {
            marks.push(t!("locale.list.fallback"));
        }
        let marks = if marks.is_empty() {
            String::new()
        } else {
            format!("[{}]", marks.join(", "))
        };
        Logger::info(format!(
            "{} {}  {}  {}",
            icons::LOCALE,
            TextStyles::pad(code, 6),
            Colors::dim(&source.describe()),
            Colors::success(&marks)
        ));
    }
    if !registry.contains(&config.i18n.locale) {
        Logger::warn(tf!("locale.unknown", config.i18n.locale));
    }
    Ok(())
}

async fn load(config: &Config, code: &str, format: &str) -> Result<()> {
    let shell = super::bootstrap_shell(config).await?;
    let bundle = match shell.loader().set_and_load_locale(code).await? {
        Some(bundle) => bundle,
        None => {
            Logger::warn(tf!("locale.unknown", code));
            return Ok(());
        }
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(bundle.as_ref())?),
        "table" => {
            Logger::success(tf!("locale.loaded", code, bundle.len()));
            let keys = bundle.keys();
            let width = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
            for key in keys {
                let text = bundle.get(&key).unwrap_or_default();
                Logger::info(format!("  {}  {}", TextStyles::pad(&key, width), text));
            }
        }
        other => anyhow::bail!(tf!("error.unknown_format", other)),
    }
    Ok(())
}

async fn get(config: &Config, key: &str, lang: Option<&str>) -> Result<()> {
    let shell = super::bootstrap_shell(config).await?;
    if let Some(code) = lang {
        if shell.loader().set_and_load_locale(code).await?.is_none() {
            Logger::warn(tf!("locale.unknown", code));
        }
    }

    let translator = shell.loader().translator();
    let translator = translator.read().await;
    match translator.lookup(key) {
        Some(text) => println!("{}", text),
        None => {
            Logger::warn(tf!("locale.key_missing", key, translator.locale()));
            println!("{}", key);
        }
    }
    Ok(())
}

/// 检查全部语言包，返回是否存在问题
pub async fn check(config: &Config, detail: bool) -> Result<bool> {
    let registry = LocaleRegistry::from_config(&config.locales)?;
    let translator = Arc::new(RwLock::new(Translator::from_config(&config.i18n)));
    let loader = LocaleLoader::new(registry, translator);

    if loader.registry().is_empty() {
        Logger::warn(t!("locale.none_registered"));
        return Ok(true);
    }

    let progress = Progress::spinner(&tf!("locale.check.fetching", loader.registry().len()));
    let reports = loader.check_all().await;
    progress.finish();
    let reports = reports?;

    let mut has_issues =
        summary::print_locale_reports(&reports, &config.i18n.fallback_locale, detail);

    let mut configured = vec![&config.i18n.locale];
    if config.i18n.fallback_locale != config.i18n.locale {
        configured.push(&config.i18n.fallback_locale);
    }
    for code in configured {
        if !loader.registry().contains(code) {
            Logger::warn(tf!("locale.unknown", code));
            has_issues = true;
        }
    }
    Ok(has_issues)
}
