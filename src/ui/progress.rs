// ============================================================================
// PTC - 进度显示组件
// ============================================================================
//
// 文件: src/ui/progress.rs
// 职责: 长耗时操作的进度条与加载动画
// 边界:
//   - ✅ 进度条与 spinner 的创建和更新
//   - ✅ 根据配置与 TTY 决定是否显示
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::config::Config;
use crate::utils::constants::progress;

/// 可选显示的进度条，关闭时所有操作为空操作
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    fn enabled() -> bool {
        Config::get_show_progress() && !Config::get_verbose() && atty::is(atty::Stream::Stdout)
    }

    /// 计数进度条
    pub fn bar(prefix: &str) -> Self {
        if !Self::enabled() {
            return Self { bar: None };
        }
        let style = ProgressStyle::with_template(progress::TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(progress::CHARS);
        let bar = ProgressBar::new(0).with_style(style);
        bar.set_prefix(prefix.to_string());
        Self { bar: Some(bar) }
    }

    /// 不定长加载动画
    pub fn spinner(message: &str) -> Self {
        if !Self::enabled() {
            return Self { bar: None };
        }
        let bar = ProgressBar::new_spinner();
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn update(&self, done: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
