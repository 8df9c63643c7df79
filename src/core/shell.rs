// ============================================================================
// PTC - 面板启动装配
// ============================================================================
//
// 文件: src/core/shell.rs
// 职责: 按启动顺序装配路由表、主题与翻译状态
// 边界:
//   - ✅ 路由表启动断言
//   - ✅ 组件库初始化参数构造
//   - ✅ 翻译引擎创建与初始语言加载
//   - ❌ 不应包含终端输出
//   - ❌ 不应包含 HTTP 服务逻辑
//
// ============================================================================

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::core::locale::{LocaleError, LocaleLoader, LocaleRegistry};
use crate::core::routes::{RouteError, RouteTable};
use crate::core::translator::Translator;
use crate::models::config::Config;
use crate::models::theme::{ThemeConfig, UiLibraryInit};

/// 启动失败
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid route table: {0}")]
    Routes(#[from] RouteError),
    #[error(transparent)]
    Locale(#[from] LocaleError),
}

/// 启动完成后的面板外壳
pub struct Shell {
    routes: RouteTable,
    ui: UiLibraryInit,
    loader: LocaleLoader,
    startup_errors: Vec<LocaleError>,
}

impl Shell {
    /// 启动：校验路由表 → 构造主题 → 创建翻译引擎 → 加载回退语言与初始语言
    ///
    /// 初始语言未注册或加载失败时保留配置值并继续，查找会落到回退语言上。
    /// 加载失败记录在 [`Shell::startup_errors`] 中，由调用方报告。
    pub async fn bootstrap(config: &Config) -> Result<Self, ShellError> {
        let routes = RouteTable::builtin()?;
        let registry = LocaleRegistry::from_config(&config.locales)?;
        Ok(Self::assemble(routes, registry, config).await)
    }

    /// 以给定路由表与语言注册表装配
    pub async fn assemble(routes: RouteTable, registry: LocaleRegistry, config: &Config) -> Self {
        let ui = UiLibraryInit::new(ThemeConfig::build());
        let translator = Arc::new(RwLock::new(Translator::from_config(&config.i18n)));
        let loader = LocaleLoader::new(registry, translator);
        let mut startup_errors = Vec::new();

        let fallback = config.i18n.fallback_locale.as_str();
        let locale = config.i18n.locale.as_str();

        // 回退语言先加载，随后的初始语言成为当前语言
        if fallback != locale {
            match loader.set_and_load_locale(fallback).await {
                Ok(Some(_)) => {}
                Ok(None) => warn!(code = fallback, "fallback locale is not registered"),
                Err(e) => {
                    warn!(code = fallback, error = %e, "fallback locale failed to load");
                    startup_errors.push(e);
                }
            }
        }
        match loader.set_and_load_locale(locale).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                warn!(code = locale, "initial locale is not registered");
                loader.translator().write().await.set_locale(locale);
            }
            Err(e) => {
                warn!(code = locale, error = %e, "initial locale failed to load");
                loader.translator().write().await.set_locale(locale);
                startup_errors.push(e);
            }
        }

        info!(
            routes = routes.entries().len(),
            locale,
            fallback,
            failed = startup_errors.len(),
            "shell ready"
        );
        Self {
            routes,
            ui,
            loader,
            startup_errors,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn ui(&self) -> &UiLibraryInit {
        &self.ui
    }

    pub fn loader(&self) -> &LocaleLoader {
        &self.loader
    }

    /// 启动期间加载失败的语言包
    pub fn startup_errors(&self) -> &[LocaleError] {
        &self.startup_errors
    }

    /// 当前语言下的翻译
    pub async fn translate(&self, key: &str) -> String {
        self.loader.translator().read().await.translate(key)
    }

    /// 当前语言
    pub async fn active_locale(&self) -> String {
        self.loader.translator().read().await.locale().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locale::BundleSource;
    use crate::models::bundle::Bundle;
    use serde_json::json;

    fn config(locale: &str, fallback: &str) -> Config {
        let mut config = Config::default();
        config.i18n.locale = locale.to_string();
        config.i18n.fallback_locale = fallback.to_string();
        config
    }

    #[tokio::test]
    async fn activates_initial_locale_with_fallback_loaded() {
        let shell = Shell::assemble(
            RouteTable::builtin().unwrap(),
            LocaleRegistry::embedded(),
            &config("de", "en"),
        )
        .await;

        assert!(shell.startup_errors().is_empty());
        assert_eq!(shell.active_locale().await, "de");
        assert_eq!(shell.translate("Router.Console").await, "Konsole");
        assert_eq!(shell.ui().theme, ThemeConfig::build());

        let translator = shell.loader().translator();
        let loaded = translator.read().await.loaded_locales();
        assert_eq!(loaded, vec!["de", "en"]);
    }

    #[tokio::test]
    async fn unknown_initial_locale_keeps_configured_code() {
        let shell = Shell::assemble(
            RouteTable::builtin().unwrap(),
            LocaleRegistry::embedded(),
            &config("xx", "en"),
        )
        .await;

        assert_eq!(shell.active_locale().await, "xx");
        assert_eq!(shell.translate("Router.Dashboard").await, "Dashboard");
    }

    fn offline(code: &'static str) -> BundleSource {
        BundleSource::custom(move || async move {
            Err(LocaleError::Custom {
                code: code.to_string(),
                message: "offline".to_string(),
            })
        })
    }

    #[tokio::test]
    async fn failing_initial_locale_is_reported() {
        let mut registry = LocaleRegistry::new();
        registry.insert(
            "en",
            BundleSource::custom(|| async { Ok(Bundle::from_value(json!({ "k": "v" })).unwrap()) }),
        );
        registry.insert("fr", offline("fr"));

        let shell = Shell::assemble(RouteTable::builtin().unwrap(), registry, &config("fr", "en")).await;

        assert_eq!(shell.startup_errors().len(), 1);
        assert!(matches!(shell.startup_errors()[0], LocaleError::Custom { ref code, .. } if code == "fr"));
        assert_eq!(shell.active_locale().await, "fr");
        assert_eq!(shell.translate("k").await, "v");
    }

    #[tokio::test]
    async fn failing_fallback_locale_does_not_stop_bootstrap() {
        let mut registry = LocaleRegistry::embedded();
        registry.insert("en", offline("en"));

        let shell = Shell::assemble(RouteTable::builtin().unwrap(), registry, &config("de", "en")).await;

        assert_eq!(shell.startup_errors().len(), 1);
        assert_eq!(shell.active_locale().await, "de");
        assert_eq!(shell.translate("Router.Console").await, "Konsole");

        let translator = shell.loader().translator();
        assert_eq!(translator.read().await.loaded_locales(), vec!["de"]);
    }
}
