// ============================================================================
// PTC - 语言包模型
// ============================================================================
//
// 文件: src/models/bundle.rs
// 职责: 单个语言的翻译键值映射
// 边界:
//   - ✅ 语言包解码与结构校验
//   - ✅ 点分键查找
//   - ✅ 叶子键枚举（用于覆盖率检查）
//   - ❌ 不应包含语言包加载逻辑
//   - ❌ 不应包含当前语言状态
//
// ============================================================================

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// 语言包解码错误
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("invalid bundle JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundle root must be a JSON object")]
    NotAnObject,
    #[error("bundle contains no messages")]
    Empty,
}

/// 语言包：翻译键到本地化文本的映射
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bundle {
    messages: Map<String, Value>,
}

impl Bundle {
    /// 从 JSON 值构造
    ///
    /// 只含一个 `default` 对象的文档按模块默认导出处理，取其内部映射。
    pub fn from_value(value: Value) -> Result<Self, BundleError> {
        let mut messages = match value {
            Value::Object(map) => map,
            _ => return Err(BundleError::NotAnObject),
        };

        if messages.len() == 1 && matches!(messages.get("default"), Some(Value::Object(_))) {
            match messages.remove("default") {
                Some(Value::Object(inner)) => messages = inner,
                _ => return Err(BundleError::NotAnObject),
            }
        }

        // 没有任何文本叶子（如 `{"Router": {}}`）同样视为空
        let mut leaves = Vec::new();
        collect_keys(&messages, "", &mut leaves);
        if leaves.is_empty() {
            return Err(BundleError::Empty);
        }
        Ok(Self { messages })
    }

    /// 从 JSON 文本构造
    pub fn from_json_str(content: &str) -> Result<Self, BundleError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// 按点分键查找文本，例如 `Router.Dashboard`
    pub fn get(&self, key: &str) -> Option<&str> {
        // 顶层键本身可能带点
        if let Some(Value::String(text)) = self.messages.get(key) {
            return Some(text);
        }

        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.messages.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }

    /// 所有叶子文本的点分键（按字典序）
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.messages, "", &mut keys);
        keys.sort();
        keys
    }

    /// 叶子文本数量
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut Vec<String>) {
    for (key, value) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => collect_keys(inner, &full, keys),
            Value::String(_) => keys.push(full),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_lookup() {
        let bundle = Bundle::from_value(json!({
            "Router": { "Dashboard": "Übersicht" },
            "App": { "Title": "PTC" }
        }))
        .unwrap();
        assert_eq!(bundle.get("Router.Dashboard"), Some("Übersicht"));
        assert_eq!(bundle.get("App.Title"), Some("PTC"));
        assert_eq!(bundle.get("Router"), None);
        assert_eq!(bundle.get("Router.Missing"), None);
    }

    #[test]
    fn default_export_is_unwrapped() {
        let bundle = Bundle::from_value(json!({ "default": { "hello": "Hallo" } })).unwrap();
        assert_eq!(bundle.get("hello"), Some("Hallo"));
    }

    #[test]
    fn rejects_non_object_and_empty() {
        assert!(matches!(
            Bundle::from_value(json!(["a"])),
            Err(BundleError::NotAnObject)
        ));
        assert!(matches!(Bundle::from_value(json!({})), Err(BundleError::Empty)));
        assert!(matches!(
            Bundle::from_value(json!({ "Router": {} })),
            Err(BundleError::Empty)
        ));
        assert!(matches!(
            Bundle::from_value(json!({ "n": 1, "list": ["a"] })),
            Err(BundleError::Empty)
        ));
        assert!(matches!(
            Bundle::from_value(json!({ "default": { "App": {} } })),
            Err(BundleError::Empty)
        ));
        assert!(matches!(
            Bundle::from_json_str("{ not json"),
            Err(BundleError::Parse(_))
        ));
    }

    #[test]
    fn keys_are_flattened_and_sorted() {
        let bundle = Bundle::from_value(json!({
            "b": { "y": "1", "x": "2" },
            "a": "3",
            "n": 4
        }))
        .unwrap();
        assert_eq!(bundle.keys(), vec!["a", "b.x", "b.y"]);
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn dotted_top_level_key_wins() {
        let bundle = Bundle::from_value(json!({ "a.b": "flat", "a": { "b": "nested" } })).unwrap();
        assert_eq!(bundle.get("a.b"), Some("flat"));
    }
}
