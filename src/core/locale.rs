// ============================================================================
// PTC - 语言包加载器
// ============================================================================
//
// 文件: src/core/locale.rs
// 职责: 语言包注册表与按需异步加载
// 边界:
//   - ✅ 语言代码到语言包来源的显式注册表
//   - ✅ 内置/目录/远程/自定义来源的异步获取
//   - ✅ 加载后注册消息集并切换当前语言
//   - ✅ 过期请求不覆盖较新的语言选择
//   - ✅ 全部语言包的并发完整性检查
//   - ❌ 不应包含翻译查找逻辑
//   - ❌ 不应包含终端输出
//
// ============================================================================

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{RwLock, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::translator::Translator;
use crate::models::bundle::{Bundle, BundleError};
use crate::models::config::LocalesConfig;

mod embedded {
    include!(concat!(env!("OUT_DIR"), "/embedded_locales.rs"));
}

/// 语言包加载错误
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch locale from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to decode locale '{code}': {source}")]
    Decode {
        code: String,
        #[source]
        source: BundleError,
    },
    #[error("invalid locale pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("locale loader for '{code}' failed: {message}")]
    Custom { code: String, message: String },
    #[error("locale check task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 异步获取语言包的 Future
pub type BundleFuture = Pin<Box<dyn Future<Output = Result<Bundle, LocaleError>> + Send>>;

/// 自定义加载函数
pub type LoaderFn = Arc<dyn Fn() -> BundleFuture + Send + Sync>;

/// 语言包来源
#[derive(Clone)]
pub enum BundleSource {
    /// 构建时嵌入的 JSON
    Embedded(&'static str),
    /// 本地文件
    File(PathBuf),
    /// 远程地址
    Remote { url: String, client: reqwest::Client },
    /// 注入的加载函数
    Custom(LoaderFn),
}

impl fmt::Debug for BundleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleSource::Embedded(content) => f
                .debug_tuple("Embedded")
                .field(&format!("{} bytes", content.len()))
                .finish(),
            BundleSource::File(path) => f.debug_tuple("File").field(path).finish(),
            BundleSource::Remote { url, .. } => f.debug_struct("Remote").field("url", url).finish(),
            BundleSource::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl BundleSource {
    /// 由异步闭包构造自定义来源
    pub fn custom<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Bundle, LocaleError>> + Send + 'static,
    {
        BundleSource::Custom(Arc::new(move || Box::pin(loader()) as BundleFuture))
    }

    /// 来源描述（用于输出）
    pub fn describe(&self) -> String {
        match self {
            BundleSource::Embedded(_) => "embedded".to_string(),
            BundleSource::File(path) => path.display().to_string(),
            BundleSource::Remote { url, .. } => url.clone(),
            BundleSource::Custom(_) => "custom".to_string(),
        }
    }

    /// 获取并解码语言包
    pub async fn fetch(&self, code: &str) -> Result<Bundle, LocaleError> {
        let decode = |source: BundleError| LocaleError::Decode {
            code: code.to_string(),
            source,
        };

        match self {
            BundleSource::Embedded(content) => Bundle::from_json_str(content).map_err(decode),
            BundleSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LocaleError::Io {
                        path: path.clone(),
                        source,
                    })?;
                Bundle::from_json_str(&content).map_err(decode)
            }
            BundleSource::Remote { url, client } => {
                let fetch_error = |source: reqwest::Error| LocaleError::Fetch {
                    url: url.clone(),
                    source,
                };
                let value: serde_json::Value = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(fetch_error)?
                    .json()
                    .await
                    .map_err(fetch_error)?;
                Bundle::from_value(value).map_err(decode)
            }
            BundleSource::Custom(loader) => loader().await,
        }
    }
}

/// 语言代码 → 语言包来源 的显式注册表
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    sources: BTreeMap<String, BundleSource>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构建时嵌入的语言包
    pub fn embedded() -> Self {
        let mut registry = Self::new();
        for (code, content) in embedded::EMBEDDED_LOCALES {
            registry.insert(*code, BundleSource::Embedded(*content));
        }
        registry
    }

    /// 按配置组装：内置 < 目录 < 远程，后者覆盖前者
    pub fn from_config(config: &LocalesConfig) -> Result<Self, LocaleError> {
        let mut registry = Self::embedded();

        let dir = Path::new(&config.dir);
        if dir.is_dir() {
            registry = registry.with_directory(dir, &config.pattern)?;
        } else {
            debug!(dir = %dir.display(), "locale directory not found, using embedded bundles");
        }

        if let Some(base_url) = &config.remote_base_url {
            registry = registry.with_remote(
                base_url,
                &config.remote_codes,
                Duration::from_secs(config.fetch_timeout),
            )?;
        }
        Ok(registry)
    }

    /// 注册来源，返回被替换的旧来源
    pub fn insert(&mut self, code: impl Into<String>, source: BundleSource) -> Option<BundleSource> {
        self.sources.insert(code.into(), source)
    }

    /// 加入目录中匹配模式的文件，文件名即语言代码
    pub fn with_directory(mut self, dir: &Path, pattern: &str) -> Result<Self, LocaleError> {
        let full_pattern = dir.join(pattern).to_string_lossy().to_string();
        let paths = glob::glob(&full_pattern).map_err(|source| LocaleError::Pattern {
            pattern: full_pattern.clone(),
            source,
        })?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if let Some(code) = path.file_stem().and_then(|s| s.to_str()) {
                        debug!(code, path = %path.display(), "registered locale file");
                        self.insert(code.to_string(), BundleSource::File(path.clone()));
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable locale path"),
            }
        }
        Ok(self)
    }

    /// 加入远程语言包 `<base_url>/<code>.json`
    pub fn with_remote(
        mut self,
        base_url: &str,
        codes: &[String],
        timeout: Duration,
    ) -> Result<Self, LocaleError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LocaleError::Client)?;
        let base = base_url.trim_end_matches('/');

        for code in codes {
            let url = format!("{}/{}.json", base, code);
            self.insert(
                code.clone(),
                BundleSource::Remote {
                    url,
                    client: client.clone(),
                },
            );
        }
        Ok(self)
    }

    pub fn get(&self, code: &str) -> Option<&BundleSource> {
        self.sources.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.sources.contains_key(code)
    }

    /// 已注册的语言代码（字典序）
    pub fn codes(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BundleSource)> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// 单个语言包的检查结果
#[derive(Debug, Clone, Serialize)]
pub struct LocaleReport {
    pub code: String,
    pub source: String,
    /// 文本条目数
    pub keys: usize,
    /// 相对回退语言缺失的键
    pub missing: Vec<String>,
    pub error: Option<String>,
}

impl LocaleReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 语言包加载器
pub struct LocaleLoader {
    registry: LocaleRegistry,
    translator: Arc<RwLock<Translator>>,
    /// 最新一次已知语言请求的序号
    sequence: AtomicU64,
}

impl LocaleLoader {
    pub fn new(registry: LocaleRegistry, translator: Arc<RwLock<Translator>>) -> Self {
        Self {
            registry,
            translator,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn translator(&self) -> Arc<RwLock<Translator>> {
        Arc::clone(&self.translator)
    }

    /// 加载并激活语言
    ///
    /// 未注册的语言代码返回 `Ok(None)` 且不改变任何状态；获取失败时翻译状态保持不变。
    /// 完成时若已有更新的请求发出，只缓存语言包而不切换当前语言。
    pub async fn set_and_load_locale(&self, code: &str) -> Result<Option<Arc<Bundle>>, LocaleError> {
        let source = match self.registry.get(code) {
            Some(source) => source,
            None => {
                debug!(code, "unknown locale, skipping");
                return Ok(None);
            }
        };

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let cached = self.translator.read().await.locale_message(code);
        let bundle = match cached {
            Some(bundle) => {
                debug!(code, "locale already loaded");
                bundle
            }
            None => {
                let bundle = source.fetch(code).await?;
                debug!(code, keys = bundle.len(), source = %source.describe(), "locale fetched");
                Arc::new(bundle)
            }
        };

        let mut translator = self.translator.write().await;
        translator.set_locale_message(code, Arc::clone(&bundle));

        if self.sequence.load(Ordering::SeqCst) == ticket {
            translator.set_locale(code);
            info!(code, "active locale switched");
        } else {
            debug!(code, "newer locale request pending, not activating");
        }

        Ok(Some(bundle))
    }

    /// 并发获取全部已注册语言包并对比回退语言的键覆盖情况，不修改翻译状态
    pub async fn check_all(&self) -> Result<Vec<LocaleReport>, LocaleError> {
        let semaphore = Arc::new(Semaphore::new(num_cpus::get().max(1)));
        let mut join_set = JoinSet::new();

        for (code, source) in self.registry.iter() {
            let code = code.clone();
            let source = source.clone();
            let semaphore = Arc::clone(&semaphore);
            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let result = source.fetch(&code).await;
                (code, source.describe(), result)
            });
        }

        let mut fetched = BTreeMap::new();
        while let Some(joined) = join_set.join_next().await {
            let (code, source, result) = joined?;
            fetched.insert(code, (source, result));
        }

        let fallback = self.translator.read().await.fallback_locale().to_string();
        let reference: BTreeSet<String> = match fetched.get(&fallback) {
            Some((_, Ok(bundle))) => bundle.keys().into_iter().collect(),
            _ => BTreeSet::new(),
        };

        let reports = fetched
            .into_iter()
            .map(|(code, (source, result))| match result {
                Ok(bundle) => {
                    let keys: BTreeSet<String> = bundle.keys().into_iter().collect();
                    LocaleReport {
                        code,
                        source,
                        keys: keys.len(),
                        missing: reference.difference(&keys).cloned().collect(),
                        error: None,
                    }
                }
                Err(e) => LocaleReport {
                    code,
                    source,
                    keys: 0,
                    missing: Vec::new(),
                    error: Some(e.to_string()),
                },
            })
            .collect();
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    fn loader_with(registry: LocaleRegistry) -> LocaleLoader {
        LocaleLoader::new(registry, Arc::new(RwLock::new(Translator::new("en", "en"))))
    }

    fn static_bundle(value: serde_json::Value) -> BundleSource {
        BundleSource::custom(move || {
            let value = value.clone();
            async move {
                Bundle::from_value(value).map_err(|source| LocaleError::Decode {
                    code: "test".to_string(),
                    source,
                })
            }
        })
    }

    #[test]
    fn embedded_registry_lists_shipped_locales() {
        let registry = LocaleRegistry::embedded();
        assert!(registry.contains("en"));
        assert!(registry.contains("de"));
        assert!(!registry.contains("xx"));
    }

    #[tokio::test]
    async fn every_registered_locale_activates() {
        let loader = loader_with(LocaleRegistry::embedded());
        for code in loader.registry().codes() {
            let bundle = loader.set_and_load_locale(&code).await.unwrap().unwrap();
            assert!(!bundle.is_empty());

            let translator = loader.translator();
            let translator = translator.read().await;
            assert_eq!(translator.locale(), code);
            assert!(translator.has_locale_message(&code));
        }
    }

    #[tokio::test]
    async fn loading_de_installs_every_key() {
        let loader = loader_with(LocaleRegistry::embedded());
        loader.set_and_load_locale("de").await.unwrap().unwrap();

        let expected =
            Bundle::from_json_str(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/locales/de.json")))
                .unwrap();
        let translator = loader.translator();
        let translator = translator.read().await;
        assert_eq!(translator.locale(), "de");
        let installed = translator.locale_message("de").unwrap();
        for key in expected.keys() {
            assert_eq!(installed.get(&key), expected.get(&key), "key {}", key);
        }
        assert_eq!(translator.translate("Router.Console"), "Konsole");
    }

    #[tokio::test]
    async fn unknown_locale_is_silent_noop() {
        let loader = loader_with(LocaleRegistry::embedded());
        loader.set_and_load_locale("de").await.unwrap();

        let result = loader.set_and_load_locale("xx").await.unwrap();
        assert!(result.is_none());

        let translator = loader.translator();
        let translator = translator.read().await;
        assert_eq!(translator.locale(), "de");
        assert!(!translator.has_locale_message("xx"));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched() {
        let mut registry = LocaleRegistry::new();
        registry.insert(
            "fr",
            BundleSource::custom(|| async {
                Err(LocaleError::Custom {
                    code: "fr".to_string(),
                    message: "network down".to_string(),
                })
            }),
        );
        let loader = loader_with(registry);

        let err = loader.set_and_load_locale("fr").await.unwrap_err();
        assert!(matches!(err, LocaleError::Custom { .. }));

        let translator = loader.translator();
        let translator = translator.read().await;
        assert_eq!(translator.locale(), "en");
        assert!(translator.loaded_locales().is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("it.json"), "[1, 2]").unwrap();

        let registry = LocaleRegistry::new()
            .with_directory(dir.path(), "*.json")
            .unwrap();
        let loader = loader_with(registry);
        let err = loader.set_and_load_locale("it").await.unwrap_err();
        assert!(matches!(err, LocaleError::Decode { .. }));
    }

    #[tokio::test]
    async fn directory_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("de.json"), r#"{ "Router": { "Console": "Terminal" } }"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let registry = LocaleRegistry::embedded()
            .with_directory(dir.path(), "*.json")
            .unwrap();
        assert!(matches!(registry.get("de"), Some(BundleSource::File(_))));
        assert!(!registry.contains("notes"));

        let loader = loader_with(registry);
        loader.set_and_load_locale("de").await.unwrap();
        let translator = loader.translator();
        assert_eq!(translator.read().await.translate("Router.Console"), "Terminal");
    }

    #[tokio::test]
    async fn stale_fetch_does_not_override_newer_selection() {
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let gates = Arc::new(Mutex::new(Some((started_tx, release_rx))));

        let mut registry = LocaleRegistry::new();
        registry.insert(
            "de",
            BundleSource::custom(move || {
                let gate = gates.lock().unwrap().take();
                async move {
                    if let Some((started, release)) = gate {
                        let _ = started.send(());
                        let _ = release.await;
                    }
                    Ok(Bundle::from_value(json!({ "k": "de" })).unwrap())
                }
            }),
        );
        registry.insert("fr", static_bundle(json!({ "k": "fr" })));

        let loader = Arc::new(loader_with(registry));
        let slow = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.set_and_load_locale("de").await }
        });

        started_rx.await.unwrap();
        loader.set_and_load_locale("fr").await.unwrap();
        release_tx.send(()).unwrap();
        slow.await.unwrap().unwrap();

        let translator = loader.translator();
        let translator = translator.read().await;
        assert_eq!(translator.locale(), "fr");
        assert!(translator.has_locale_message("de"));
    }

    #[tokio::test]
    async fn cached_bundle_is_reused() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);

        let mut registry = LocaleRegistry::new();
        registry.insert(
            "de",
            BundleSource::custom(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(Bundle::from_value(json!({ "k": "v" })).unwrap()) }
            }),
        );
        let loader = loader_with(registry);
        loader.set_and_load_locale("de").await.unwrap();
        loader.set_and_load_locale("de").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn check_reports_missing_keys_against_fallback() {
        let mut registry = LocaleRegistry::new();
        registry.insert("en", static_bundle(json!({ "a": "A", "b": { "c": "C" } })));
        registry.insert("de", static_bundle(json!({ "a": "A" })));
        registry.insert(
            "xx",
            BundleSource::custom(|| async {
                Err(LocaleError::Custom {
                    code: "xx".to_string(),
                    message: "boom".to_string(),
                })
            }),
        );
        let loader = loader_with(registry);

        let reports = loader.check_all().await.unwrap();
        let codes: Vec<&str> = reports.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["de", "en", "xx"]);

        assert_eq!(reports[0].missing, vec!["b.c"]);
        assert!(reports[1].missing.is_empty());
        assert!(!reports[2].is_ok());

        // 检查不改变翻译状态
        assert!(loader.translator().read().await.loaded_locales().is_empty());
    }

    /// 本地 HTTP 服务：de 正常、fr 返回 404、it 响应缓慢、empty 无文本
    async fn spawn_bundle_server() -> String {
        use axum::{http::StatusCode, routing::get, Json, Router};

        let app = Router::new()
            .route(
                "/i18n/de.json",
                get(|| async { Json(json!({ "default": { "App": { "Title": "Tafel" } } })) }),
            )
            .route("/i18n/fr.json", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/i18n/it.json",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({ "App": { "Title": "Titolo" } }))
                }),
            )
            .route("/i18n/empty.json", get(|| async { Json(json!({ "Router": {} })) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/i18n/", addr)
    }

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn remote_bundle_is_fetched_and_unwrapped() {
        let base = spawn_bundle_server().await;
        let registry = LocaleRegistry::new()
            .with_remote(&base, &codes(&["de"]), Duration::from_secs(5))
            .unwrap();
        assert_eq!(registry.get("de").unwrap().describe(), format!("{}de.json", base));

        let loader = loader_with(registry);
        let bundle = loader.set_and_load_locale("de").await.unwrap().unwrap();
        assert_eq!(bundle.len(), 1);

        let translator = loader.translator();
        let translator = translator.read().await;
        assert_eq!(translator.locale(), "de");
        assert_eq!(translator.translate("App.Title"), "Tafel");
    }

    #[tokio::test]
    async fn remote_error_status_is_fetch_error() {
        let base = spawn_bundle_server().await;
        let registry = LocaleRegistry::new()
            .with_remote(&base, &codes(&["fr"]), Duration::from_secs(5))
            .unwrap();
        let loader = loader_with(registry);

        let result = loader.set_and_load_locale("fr").await;
        assert!(matches!(result, Err(LocaleError::Fetch { ref url, .. }) if url.ends_with("/fr.json")));

        let translator = loader.translator();
        let translator = translator.read().await;
        assert!(translator.loaded_locales().is_empty());
        assert_eq!(translator.locale(), "en");
    }

    #[tokio::test]
    async fn remote_timeout_is_fetch_error() {
        let base = spawn_bundle_server().await;
        let registry = LocaleRegistry::new()
            .with_remote(&base, &codes(&["it"]), Duration::from_millis(200))
            .unwrap();
        let loader = loader_with(registry);

        let result = loader.set_and_load_locale("it").await;
        assert!(matches!(result, Err(LocaleError::Fetch { .. })));
        assert!(loader.translator().read().await.loaded_locales().is_empty());
    }

    #[tokio::test]
    async fn remote_bundle_without_messages_is_decode_error() {
        let base = spawn_bundle_server().await;
        let registry = LocaleRegistry::new()
            .with_remote(&base, &codes(&["empty"]), Duration::from_secs(5))
            .unwrap();
        let loader = loader_with(registry);

        let result = loader.set_and_load_locale("empty").await;
        assert!(matches!(
            result,
            Err(LocaleError::Decode {
                source: BundleError::Empty,
                ..
            })
        ));
    }
}
