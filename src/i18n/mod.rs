// ============================================================================
// PTC - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 命令行界面文本的国际化
// 边界:
//   - ✅ 翻译表选择与查找
//   - ✅ 翻译宏定义和实现
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含面板语言包（见 core::locale）
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

/// 按界面语言选择翻译表，未知语言使用英文
fn table_for(language: &str) -> &'static [(&'static str, &'static str)] {
    match language {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS,
    }
}

/// 在指定翻译表中查找
fn lookup(language: &str, key: &str) -> Option<&'static str> {
    table_for(language)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    // 每次都从配置获取语言设置
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());

    match lookup(&language, key).or_else(|| lookup("en_us", key)) {
        Some(text) => text.to_string(),
        None => format!("Unknown translation key: {}", key),
    }
}

/// 从配置获取语言设置，未初始化时返回 None
fn get_language_from_config() -> Option<String> {
    use crate::models::config::Config;

    Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带参数翻译的辅助函数
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = template;
    let mut search_from = 0;
    for arg in args.iter() {
        // 替换下一个 {} 占位符，参数本身含 {} 时不再被替换
        match result[search_from..].find("{}") {
            Some(offset) => {
                let pos = search_from + offset;
                result.replace_range(pos..pos + 2, arg);
                search_from = pos + arg.len();
            }
            None => break,
        }
    }
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn placeholders(table: &[(&str, &str)]) -> BTreeMap<String, usize> {
        table
            .iter()
            .map(|(k, v)| (k.to_string(), v.matches("{}").count()))
            .collect()
    }

    #[test]
    fn tables_share_keys_and_placeholders() {
        assert_eq!(placeholders(en_us::TRANSLATIONS), placeholders(zh_cn::TRANSLATIONS));
        assert_eq!(placeholders(en_us::TRANSLATIONS).len(), en_us::TRANSLATIONS.len());
    }

    #[test]
    fn format_fills_placeholders_in_order() {
        let text = format_with_args("{} of {}".to_string(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(text, "1 of 2");

        let text = format_with_args("a {} b {}".to_string(), vec!["{}".to_string(), "x".to_string()]);
        assert_eq!(text, "a {} b x");
    }

    #[test]
    fn unknown_language_uses_english() {
        assert_eq!(lookup("fr_fr", "serve.stopped"), Some("Server stopped"));
        assert_eq!(lookup("zh_cn", "serve.stopped"), Some("服务已停止"));
        assert_eq!(lookup("en_us", "nope"), None);
    }
}
