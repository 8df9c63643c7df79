// ============================================================================
// PTC - SPA 静态服务
// ============================================================================
//
// 文件: src/core/server.rs
// 职责: 构建产物的静态服务与前端路由回退
// 边界:
//   - ✅ 静态文件服务
//   - ✅ 非资源路径回退到 index.html
//   - ✅ 路由表中重定向条目的服务端跳转
//   - ✅ 优雅停机
//   - ❌ 不应包含路由表校验逻辑
//   - ❌ 不应包含终端输出
//
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, MethodRouter};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::core::routes::RouteTable;

/// 视为静态资源的最长扩展名
const MAX_ASSET_EXTENSION_LEN: usize = 3;

#[derive(Clone)]
struct SpaState {
    dist_dir: Arc<PathBuf>,
}

/// 路径是否像静态资源（短扩展名），这类路径缺失时返回 404 而不是 index.html
pub fn looks_like_asset(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or("");
    match Path::new(last).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => !ext.is_empty() && ext.len() <= MAX_ASSET_EXTENSION_LEN,
        None => false,
    }
}

/// 未命中文件时的回退
async fn spa_fallback(State(state): State<SpaState>, uri: Uri) -> Response {
    if looks_like_asset(uri.path()) {
        debug!(path = uri.path(), "missing asset");
        return StatusCode::NOT_FOUND.into_response();
    }

    let index = state.dist_dir.join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(path = %index.display(), error = %e, "index.html unavailable");
            (StatusCode::NOT_FOUND, "index.html not found").into_response()
        }
    }
}

/// 构建 SPA 路由：重定向条目 → 永久跳转；其余交给静态文件与回退
pub fn build_router(dist_dir: &Path, routes: &RouteTable) -> Router {
    let state = SpaState {
        dist_dir: Arc::new(dist_dir.to_path_buf()),
    };

    let mut router = Router::new();
    for (source, target) in routes.redirects() {
        debug!(%source, %target, "registering redirect");
        router = router.route(
            &source,
            get(move || {
                let target = target.clone();
                async move { Redirect::permanent(&target) }
            }),
        );
    }

    let fallback: MethodRouter = get(spa_fallback).with_state(state);
    let static_files = ServeDir::new(dist_dir).fallback(fallback);
    router.fallback_service(static_files)
}

/// 启动服务直到取消令牌触发
pub async fn serve(
    addr: &str,
    dist_dir: &Path,
    routes: &RouteTable,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let router = build_router(dist_dir, routes);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    info!(%local_addr, dist = %dist_dir.display(), "serving SPA");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn dist() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"app\"></div>").unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/app.js"), "console.log(1)").unwrap();
        dir
    }

    async fn get_path(router: Router, path: &str) -> (StatusCode, Option<String>, String) {
        let response = router
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8_lossy(&body).to_string())
    }

    #[test]
    fn asset_detection_follows_extension_length() {
        assert!(looks_like_asset("/assets/app.js"));
        assert!(looks_like_asset("/favicon.ico"));
        assert!(!looks_like_asset("/files"));
        assert!(!looks_like_asset("/settings/machine"));
        assert!(!looks_like_asset("/manifest.webmanifest"));
        assert!(!looks_like_asset("/locales/de.json"));
    }

    #[tokio::test]
    async fn serves_existing_files() {
        let dir = dist();
        let router = build_router(dir.path(), &RouteTable::builtin().unwrap());
        let (status, _, body) = get_path(router, "/assets/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn client_routes_fall_back_to_index() {
        let dir = dist();
        let router = build_router(dir.path(), &RouteTable::builtin().unwrap());
        let (status, _, body) = get_path(router, "/heightmap?tab=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id=\"app\""));
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let dir = dist();
        let router = build_router(dir.path(), &RouteTable::builtin().unwrap());
        let (status, _, _) = get_path(router, "/assets/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn redirect_entries_redirect() {
        let dir = dist();
        let router = build_router(dir.path(), &RouteTable::builtin().unwrap());
        let (status, location, _) = get_path(router, "/settings/machine").await;
        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location.as_deref(), Some("/config"));
    }
}
