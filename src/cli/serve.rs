// ============================================================================
// PTC - Serve 命令处理
// ============================================================================
//
// 文件: src/cli/serve.rs
// 职责: 启动面板静态服务
// 边界:
//   - ✅ 监听地址参数解析
//   - ✅ 启动装配（路由表断言、初始语言加载）
//   - ✅ Ctrl-C 优雅停机
//   - ❌ 不应包含 HTTP 路由实现
//   - ❌ 不应包含路由表定义
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::server;
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 静态服务参数
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// 监听地址（默认取配置）
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口（默认取配置）
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// 处理 serve 命令
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let config = Config::snapshot();

    // 路由表非法时在此处失败，不会等到页面访问
    let shell = super::bootstrap_shell(&config).await?;
    Logger::info(tf!(
        "serve.shell_ready",
        shell.routes().entries().len(),
        shell.active_locale().await
    ));

    debug!(
        directives = ?shell.ui().directives,
        breakpoint = shell.ui().theme.mobile_breakpoint,
        "ui library initialised"
    );

    let dist_dir = PathBuf::from(&config.server.dist_dir);
    if !dist_dir.join("index.html").is_file() {
        Logger::warn(tf!("serve.missing_index", dist_dir.display()));
    }

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("ctrl-c received");
                signal.cancel();
            }
            Err(e) => debug!(error = %e, "failed to listen for ctrl-c"),
        }
    });

    Logger::info(tf!("serve.listening", addr, dist_dir.display()));
    server::serve(&addr, &dist_dir, shell.routes(), shutdown).await?;
    Logger::success(t!("serve.stopped"));
    Ok(())
}
