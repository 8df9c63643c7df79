// ============================================================================
// PTC - 翻译引擎
// ============================================================================
//
// 文件: src/core/translator.rs
// 职责: 面板翻译状态（各语言消息集、当前语言、回退语言）
// 边界:
//   - ✅ 消息集注册与查询
//   - ✅ 当前语言与回退语言管理
//   - ✅ 带回退的翻译查找
//   - ❌ 不应包含语言包加载逻辑
//   - ❌ 不应包含命令行界面文本
//
// ============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::bundle::Bundle;
use crate::models::config::I18nConfig;

/// 翻译引擎状态
///
/// 由启动流程创建一次，再通过引用交给需要切换语言的组件；测试可以各自构造独立实例。
#[derive(Debug, Clone)]
pub struct Translator {
    messages: HashMap<String, Arc<Bundle>>,
    locale: String,
    fallback_locale: String,
}

impl Translator {
    /// 创建空消息集的翻译引擎
    pub fn new(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        Self {
            messages: HashMap::new(),
            locale: locale.into(),
            fallback_locale: fallback_locale.into(),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(config.locale.clone(), config.fallback_locale.clone())
    }

    /// 当前语言
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// 注册（或替换）某语言的消息集
    pub fn set_locale_message(&mut self, code: impl Into<String>, bundle: Arc<Bundle>) {
        self.messages.insert(code.into(), bundle);
    }

    pub fn locale_message(&self, code: &str) -> Option<Arc<Bundle>> {
        self.messages.get(code).cloned()
    }

    pub fn has_locale_message(&self, code: &str) -> bool {
        self.messages.contains_key(code)
    }

    /// 已加载消息集的语言代码
    pub fn loaded_locales(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.messages.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// 查找翻译：当前语言 → 回退语言，均缺失时返回 None
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.messages
            .get(&self.locale)
            .and_then(|bundle| bundle.get(key))
            .or_else(|| {
                self.messages
                    .get(&self.fallback_locale)
                    .and_then(|bundle| bundle.get(key))
            })
    }

    /// 翻译，缺失时原样返回键
    pub fn translate(&self, key: &str) -> String {
        self.lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: serde_json::Value) -> Arc<Bundle> {
        Arc::new(Bundle::from_value(value).unwrap())
    }

    #[test]
    fn starts_empty_with_configured_locales() {
        let translator = Translator::from_config(&I18nConfig {
            locale: "de".to_string(),
            fallback_locale: "en".to_string(),
        });
        assert_eq!(translator.locale(), "de");
        assert_eq!(translator.fallback_locale(), "en");
        assert!(translator.loaded_locales().is_empty());
    }

    #[test]
    fn falls_back_then_returns_key() {
        let mut translator = Translator::new("de", "en");
        translator.set_locale_message("en", bundle(json!({ "App": { "Title": "Panel", "Only": "EN" } })));
        translator.set_locale_message("de", bundle(json!({ "App": { "Title": "Tafel" } })));

        assert_eq!(translator.translate("App.Title"), "Tafel");
        assert_eq!(translator.translate("App.Only"), "EN");
        assert_eq!(translator.translate("App.Missing"), "App.Missing");
    }

    #[test]
    fn set_locale_message_replaces_bundle() {
        let mut translator = Translator::new("en", "en");
        translator.set_locale_message("en", bundle(json!({ "k": "one" })));
        translator.set_locale_message("en", bundle(json!({ "k": "two" })));
        assert_eq!(translator.translate("k"), "two");
        assert_eq!(translator.loaded_locales(), vec!["en"]);
    }
}
