// ============================================================================
// PTC - 初始化命令处理
// ============================================================================
//
// 文件: src/cli/init.rs
// 职责: 处理配置文件初始化命令
// 边界:
//   - ✅ 初始化命令参数解析
//   - ✅ 默认配置文件生成
//   - ✅ 配置文件存在性检查
//   - ❌ 不应包含配置文件格式定义
//   - ❌ 不应包含配置验证逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::models::config::{Config, DEFAULT_CONFIG_FILE};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 初始化命令参数
#[derive(Debug, Args)]
pub struct InitArgs {
    /// 强制覆盖已存在的配置文件
    #[arg(short, long)]
    pub force: bool,
}

/// 处理初始化命令，写入全局 `--config` 指定的路径或默认文件名
pub fn handle_init(args: InitArgs, config_path: Option<PathBuf>) -> Result<()> {
    Logger::info(t!("init.start"));
    let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    // 检查配置文件是否已存在
    if path.exists() && !args.force {
        Logger::warn(tf!("init.config_exists", path.display()));
        Logger::info(t!("init.use_force_hint"));
        return Ok(());
    }

    // 生成默认配置文件
    match Config::create_default_config_file(&path) {
        Ok(_) => {
            Logger::info(tf!("init.config_created", path.display()));
            Logger::info(t!("init.next_steps"));
        }
        Err(e) => {
            Logger::error(tf!("init.create_failed", e));
            return Err(e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config_and_respects_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ptc.toml");

        handle_init(InitArgs { force: false }, Some(path.clone())).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.capabilities.registered_directories.contains("gcodes"));

        std::fs::write(&path, "# custom\n").unwrap();
        handle_init(InitArgs { force: false }, Some(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# custom\n");

        handle_init(InitArgs { force: true }, Some(path.clone())).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[server]"));
    }
}
