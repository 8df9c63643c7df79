// ============================================================================
// PTC - 配置数据模型
// ============================================================================
//
// 文件: src/models/config.rs
// 职责: 配置文件数据结构定义和操作
// 边界:
//   - ✅ 配置文件数据结构定义
//   - ✅ 配置序列化/反序列化
//   - ✅ 环境变量与运行时参数覆盖
//   - ✅ 配置文件读写操作
//   - ✅ 配置项默认数据
//   - ❌ 不应包含配置应用逻辑
//   - ❌ 不应包含 CLI 参数处理
//   - ❌ 不应包含语言包加载逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::models::route::BackendCapabilities;

/// 全局配置管理器
static GLOBAL_CONFIG: std::sync::OnceLock<Arc<RwLock<Config>>> = std::sync::OnceLock::new();

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "ptc.toml";

/// 当前语言覆盖的环境变量
pub const ENV_I18N_LOCALE: &str = "PTC_I18N_LOCALE";

/// 回退语言覆盖的环境变量
pub const ENV_I18N_FALLBACK_LOCALE: &str = "PTC_I18N_FALLBACK_LOCALE";

/// PTC 配置文件结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 静态服务配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 语言包来源配置
    #[serde(default)]
    pub locales: LocalesConfig,
    /// 面板翻译配置
    #[serde(default)]
    pub i18n: I18nConfig,
    /// 品牌替换配置
    #[serde(default)]
    pub branding: BrandingConfig,
    /// 导航预览使用的后端能力
    #[serde(default)]
    pub capabilities: BackendCapabilities,
    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 静态服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
    /// 前端构建产物目录
    pub dist_dir: String,
}

/// 语言包来源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// 语言包目录
    pub dir: String,
    /// 目录内的文件匹配模式
    pub pattern: String,
    /// 远程语言包地址前缀（`<base>/<code>.json`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_base_url: Option<String>,
    /// 远程提供的语言代码
    pub remote_codes: Vec<String>,
    /// 远程获取超时（秒）
    pub fetch_timeout: u64,
}

/// 面板翻译配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// 初始语言
    pub locale: String,
    /// 查找缺失时的回退语言
    pub fallback_locale: String,
}

/// 品牌替换配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// 被替换的品牌名
    pub from: String,
    /// 新品牌名
    pub to: String,
    /// 构建产物中需要处理的文件扩展名
    pub extensions: Vec<String>,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 是否显示进度条
    pub show_progress: bool,
    /// 是否详细输出
    pub verbose: bool,
    /// 是否彩色输出
    pub colored: bool,
    /// 命令行界面语言
    pub language: String,
}

/// CLI 运行时参数（用于覆盖配置文件）
#[derive(Debug, Clone, Default)]
pub struct RuntimeArgs {
    pub verbose: Option<bool>,
    pub colored: Option<bool>,
    pub show_progress: Option<bool>,
    pub language: Option<String>,
    pub locale: Option<String>,
    pub fallback_locale: Option<String>,
    pub locales_dir: Option<String>,
    pub dist_dir: Option<String>,
}

/// 配置默认值 trait - 不依赖全局配置初始化
pub trait ConfigDefaults {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_dist_dir() -> String {
        "dist".to_string()
    }

    fn default_locales_dir() -> String {
        "locales".to_string()
    }

    fn default_locales_pattern() -> String {
        "*.json".to_string()
    }

    fn default_fetch_timeout() -> u64 {
        10
    }

    /// 未设置环境变量时的语言
    fn default_locale() -> String {
        "en".to_string()
    }

    fn default_fallback_locale() -> String {
        "en".to_string()
    }

    fn default_brand_from() -> String {
        "Mainsail".to_string()
    }

    fn default_brand_to() -> String {
        "Probe Tech Control".to_string()
    }

    fn default_brand_extensions() -> Vec<String> {
        ["js", "json", "html", "webmanifest"]
            .iter()
            .map(|ext| ext.to_string())
            .collect()
    }

    fn default_show_progress() -> bool {
        true
    }

    fn default_verbose() -> bool {
        false
    }

    fn default_colored() -> bool {
        true
    }

    fn default_language() -> String {
        "en_us".to_string()
    }
}

impl ConfigDefaults for Config {}

impl Config {
    /// 初始化全局配置（程序启动时调用）
    pub fn initialize(config_path: Option<&Path>) -> anyhow::Result<()> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());

        GLOBAL_CONFIG
            .set(Arc::new(RwLock::new(config)))
            .map_err(|_| anyhow::anyhow!("Global config already initialized"))?;
        Ok(())
    }

    /// 加载配置文件，不存在时使用默认配置
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 应用环境变量覆盖，空值视为未设置
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(ENV_I18N_LOCALE).filter(|v| !v.trim().is_empty()) {
            self.i18n.locale = locale.trim().to_string();
        }
        if let Some(fallback) = lookup(ENV_I18N_FALLBACK_LOCALE).filter(|v| !v.trim().is_empty()) {
            self.i18n.fallback_locale = fallback.trim().to_string();
        }
    }

    /// 合并运行时参数到全局配置
    pub fn merge_runtime_args(args: RuntimeArgs) -> anyhow::Result<()> {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let mut config = global_config
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config write lock"))?;

        config.apply_runtime_args(args);
        Ok(())
    }

    /// 将运行时参数应用到当前配置
    pub fn apply_runtime_args(&mut self, args: RuntimeArgs) {
        if let Some(verbose) = args.verbose {
            self.output.verbose = verbose;
        }
        if let Some(colored) = args.colored {
            self.output.colored = colored;
        }
        if let Some(show_progress) = args.show_progress {
            self.output.show_progress = show_progress;
        }
        if let Some(language) = args.language {
            self.output.language = language;
        }
        if let Some(locale) = args.locale {
            self.i18n.locale = locale;
        }
        if let Some(fallback_locale) = args.fallback_locale {
            self.i18n.fallback_locale = fallback_locale;
        }
        if let Some(locales_dir) = args.locales_dir {
            self.locales.dir = locales_dir;
        }
        if let Some(dist_dir) = args.dist_dir {
            self.server.dist_dir = dist_dir;
        }
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, config_path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 生成默认配置模板
    pub fn generate_default_template() -> Self {
        let mut config = Self::default();

        // 示例能力：G-Code 目录与历史组件
        config
            .capabilities
            .registered_directories
            .insert("gcodes".to_string());
        config
            .capabilities
            .moonraker_components
            .insert("history".to_string());

        config
    }

    /// 生成默认配置模板并保存到文件
    pub fn create_default_config_file(config_path: &Path) -> anyhow::Result<()> {
        let default_config = Self::generate_default_template();
        default_config.save_to_file(config_path)?;
        Ok(())
    }

    /// 读取全局配置
    fn read_global<T, F>(read: F) -> anyhow::Result<T>
    where
        F: FnOnce(&Config) -> T,
    {
        let global_config = GLOBAL_CONFIG
            .get()
            .ok_or_else(|| anyhow::anyhow!("Global config not initialized"))?;

        let config = global_config
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire config read lock"))?;

        Ok(read(&config))
    }

    /// 当前配置快照（未初始化时为默认配置）
    pub fn snapshot() -> Config {
        Self::read_global(Config::clone).unwrap_or_default()
    }

    /// 获取界面语言
    pub fn get_language() -> anyhow::Result<String> {
        Self::read_global(|config| config.output.language.clone())
    }

    /// 获取详细输出设置（带默认值）
    pub fn get_verbose() -> bool {
        Self::read_global(|config| config.output.verbose).unwrap_or_else(|_| Self::default_verbose())
    }

    /// 获取是否彩色输出（带默认值）
    pub fn get_colored() -> bool {
        Self::read_global(|config| config.output.colored).unwrap_or_else(|_| Self::default_colored())
    }

    /// 获取是否显示进度条（带默认值）
    pub fn get_show_progress() -> bool {
        Self::read_global(|config| config.output.show_progress)
            .unwrap_or_else(|_| Self::default_show_progress())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            locales: LocalesConfig::default(),
            i18n: I18nConfig::default(),
            branding: BrandingConfig::default(),
            capabilities: BackendCapabilities::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Config::default_host(),
            port: Config::default_port(),
            dist_dir: Config::default_dist_dir(),
        }
    }
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            dir: Config::default_locales_dir(),
            pattern: Config::default_locales_pattern(),
            remote_base_url: None,
            remote_codes: Vec::new(),
            fetch_timeout: Config::default_fetch_timeout(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: Config::default_locale(),
            fallback_locale: Config::default_fallback_locale(),
        }
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            from: Config::default_brand_from(),
            to: Config::default_brand_to(),
            extensions: Config::default_brand_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: Config::default_show_progress(),
            verbose: Config::default_verbose(),
            colored: Config::default_colored(),
            language: Config::default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_panel_conventions() {
        let config = Config::default();
        assert_eq!(config.i18n.locale, "en");
        assert_eq!(config.i18n.fallback_locale, "en");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.branding.from, "Mainsail");
    }

    #[test]
    fn env_overrides_locale_settings() {
        let env: HashMap<&str, &str> = [
            (ENV_I18N_LOCALE, "de"),
            (ENV_I18N_FALLBACK_LOCALE, " fr "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.i18n.locale, "de");
        assert_eq!(config.i18n.fallback_locale, "fr");
    }

    #[test]
    fn empty_env_value_keeps_default() {
        let mut config = Config::default();
        config.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(config.i18n.locale, "en");
    }

    #[test]
    fn runtime_args_override_file_values() {
        let mut config = Config::default();
        config.apply_runtime_args(RuntimeArgs {
            locale: Some("zh".to_string()),
            dist_dir: Some("build".to_string()),
            colored: Some(false),
            ..RuntimeArgs::default()
        });
        assert_eq!(config.i18n.locale, "zh");
        assert_eq!(config.server.dist_dir, "build");
        assert!(!config.output.colored);
        assert!(config.output.show_progress);
    }

    #[test]
    fn template_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        Config::create_default_config_file(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.capabilities.registered_directories.contains("gcodes"));
        assert_eq!(loaded.locales.pattern, "*.json");
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.i18n.locale, "en");
    }
}
