// ============================================================================
// PTC - Theme 命令处理
// ============================================================================
//
// 文件: src/cli/theme.rs
// 职责: 渲染并导出主题配置
// 边界:
//   - ✅ 输出格式选择（table/json/toml/yaml/css）
//   - ✅ 输出到文件
//   - ❌ 不应包含主题字段定义
//
// ============================================================================

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::models::theme::{ThemeConfig, UiLibraryInit};
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 主题输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeFormat {
    Table,
    Json,
    Toml,
    Yaml,
    Css,
}

/// 主题命令参数
#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// 输出格式
    #[arg(short = 'f', long, value_enum, default_value_t = ThemeFormat::Table)]
    pub format: ThemeFormat,

    /// 写入文件而不是标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 处理 theme 命令
pub fn handle_theme(args: ThemeArgs) -> Result<()> {
    let init = UiLibraryInit::new(ThemeConfig::build());

    if args.format == ThemeFormat::Table {
        summary::print_palette(&init.theme);
        let directives: Vec<String> = init.directives.iter().map(|d| format!("{:?}", d)).collect();
        Logger::info(tf!("theme.directives", directives.join(", ")));
        return Ok(());
    }

    let rendered = render(&init, args.format)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            Logger::success(tf!("theme.written", path.display()));
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// 按格式渲染组件库初始化参数
pub fn render(init: &UiLibraryInit, format: ThemeFormat) -> Result<String> {
    let rendered = match format {
        ThemeFormat::Json => serde_json::to_string_pretty(init)? + "\n",
        ThemeFormat::Toml => toml::to_string_pretty(init)?,
        ThemeFormat::Yaml => serde_yaml::to_string(init)?,
        ThemeFormat::Css => init.theme.to_css(),
        ThemeFormat::Table => anyhow::bail!(t!("theme.table_not_renderable")),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() -> UiLibraryInit {
        UiLibraryInit::new(ThemeConfig::build())
    }

    #[test]
    fn json_carries_palette_and_directives() {
        let json = render(&init(), ThemeFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["theme"]["palette"]["primary"], "#00e5ff");
        assert_eq!(value["theme"]["icon_font"], "mdiSvg");
        assert_eq!(value["directives"], serde_json::json!(["Touch", "Ripple"]));
    }

    #[test]
    fn toml_and_yaml_render() {
        let toml = render(&init(), ThemeFormat::Toml).unwrap();
        assert!(toml.contains("mobile_breakpoint = 768"));
        assert!(toml.contains("warning = \"#fb8c00\""));

        let yaml = render(&init(), ThemeFormat::Yaml).unwrap();
        assert!(yaml.contains("dark: true"));
    }

    #[test]
    fn css_is_custom_properties() {
        let css = render(&init(), ThemeFormat::Css).unwrap();
        assert!(css.contains("--v-accent-base: #ff4081;"));
    }
}
