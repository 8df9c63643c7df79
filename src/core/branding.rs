// ============================================================================
// PTC - 品牌替换
// ============================================================================
//
// 文件: src/core/branding.rs
// 职责: 语言包与构建产物中的品牌名替换
// 边界:
//   - ✅ 语言包 JSON 的递归文本替换
//   - ✅ 构建产物的整词替换
//   - ✅ 单文件失败记录但不中断
//   - ❌ 不应包含 CLI 参数处理
//   - ❌ 不应包含终端输出
//
// ============================================================================

use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 品牌替换错误
#[derive(Debug, Error)]
pub enum BrandingError {
    #[error("directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("brand name to replace must not be empty")]
    EmptyPattern,
    #[error("invalid replacement pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// 单个文件的处理结果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// 已改写（预演模式下为将要改写）
    Updated { path: PathBuf },
    /// 无需改动
    Unchanged { path: PathBuf },
    /// 读取或解析失败而跳过
    Skipped { path: PathBuf, reason: String },
}

/// 批量替换报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrandingReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BrandingReport {
    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Updated { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }
}

/// 递归替换 JSON 中所有字符串值（键保持不变）
pub fn rebrand_value(value: Value, from: &str, to: &str) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, rebrand_value(v, from, to)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| rebrand_value(v, from, to))
                .collect(),
        ),
        Value::String(text) => Value::String(text.replace(from, to)),
        other => other,
    }
}

/// 以 4 空格缩进输出 JSON，保留非 ASCII 字符
fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// 改写目录下所有 `*.json` 语言包
pub fn rebrand_locale_dir(
    dir: &Path,
    from: &str,
    to: &str,
    dry_run: bool,
) -> Result<BrandingReport, BrandingError> {
    if !dir.is_dir() {
        return Err(BrandingError::MissingDirectory(dir.to_path_buf()));
    }
    if from.is_empty() {
        return Err(BrandingError::EmptyPattern);
    }

    let pattern = dir.join("*.json").to_string_lossy().to_string();
    let mut paths: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(Result::ok).collect();
    paths.sort();

    let mut report = BrandingReport::default();
    for path in paths {
        let outcome = match rebrand_locale_file(&path, from, to, dry_run) {
            Ok(true) => FileOutcome::Updated { path },
            Ok(false) => FileOutcome::Unchanged { path },
            Err(reason) => {
                warn!(path = %path.display(), %reason, "failed to rebrand locale");
                FileOutcome::Skipped { path, reason }
            }
        };
        report.outcomes.push(outcome);
    }
    Ok(report)
}

fn rebrand_locale_file(path: &Path, from: &str, to: &str, dry_run: bool) -> Result<bool, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let value: Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    let updated = rebrand_value(value.clone(), from, to);
    if updated == value {
        return Ok(false);
    }
    if !dry_run {
        let output = to_pretty_json(&updated).map_err(|e| e.to_string())?;
        fs::write(path, output).map_err(|e| e.to_string())?;
    }
    debug!(path = %path.display(), dry_run, "locale rebranded");
    Ok(true)
}

/// 构建产物整词替换器
pub struct DistPatcher {
    pattern: Regex,
    replacement: String,
    extensions: Vec<String>,
}

impl DistPatcher {
    pub fn new(from: &str, to: &str, extensions: &[String]) -> Result<Self, BrandingError> {
        if from.is_empty() {
            return Err(BrandingError::EmptyPattern);
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(from)))?;
        Ok(Self {
            pattern,
            replacement: to.to_string(),
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
        })
    }

    /// 收集目录下需要处理的文件
    pub fn collect_files(&self, dir: &Path) -> Result<Vec<PathBuf>, BrandingError> {
        if !dir.is_dir() {
            return Err(BrandingError::MissingDirectory(dir.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable dist entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.matches_extension(path))
            .collect();
        files.sort();
        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// 替换文本，无匹配时返回 None
    pub fn patch_text(&self, content: &str) -> Option<String> {
        if self.pattern.is_match(content) {
            Some(
                self.pattern
                    .replace_all(content, regex::NoExpand(&self.replacement))
                    .into_owned(),
            )
        } else {
            None
        }
    }

    /// 处理单个文件
    pub fn patch_file(&self, path: &Path, dry_run: bool) -> FileOutcome {
        let path_buf = path.to_path_buf();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return FileOutcome::Skipped {
                    path: path_buf,
                    reason: e.to_string(),
                }
            }
        };

        match self.patch_text(&content) {
            Some(patched) => {
                if !dry_run {
                    if let Err(e) = fs::write(path, patched) {
                        return FileOutcome::Skipped {
                            path: path_buf,
                            reason: e.to_string(),
                        };
                    }
                }
                debug!(path = %path.display(), dry_run, "dist file patched");
                FileOutcome::Updated { path: path_buf }
            }
            None => FileOutcome::Unchanged { path: path_buf },
        }
    }

    /// 处理整个目录，每完成一个文件调用一次进度回调
    pub fn patch_dir<F>(&self, dir: &Path, dry_run: bool, mut on_progress: F) -> Result<BrandingReport, BrandingError>
    where
        F: FnMut(usize, usize),
    {
        let files = self.collect_files(dir)?;
        let total = files.len();
        let mut report = BrandingReport::default();
        for (index, path) in files.iter().enumerate() {
            report.outcomes.push(self.patch_file(path, dry_run));
            on_progress(index + 1, total);
        }
        Ok(report)
    }
}

/// 整词替换构建产物中的品牌名
pub fn patch_dist<F>(
    dir: &Path,
    from: &str,
    to: &str,
    extensions: &[String],
    dry_run: bool,
    on_progress: F,
) -> Result<BrandingReport, BrandingError>
where
    F: FnMut(usize, usize),
{
    DistPatcher::new(from, to, extensions)?.patch_dir(dir, dry_run, on_progress)
}
