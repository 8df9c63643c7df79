// ============================================================================
// PTC - 路由表
// ============================================================================
//
// 文件: src/core/routes.rs
// 职责: 内置路由表定义、启动校验与导航排序
// 边界:
//   - ✅ 内置路由条目声明
//   - ✅ 路径/名称唯一性与重定向一致性校验
//   - ✅ 重定向目标存在性与环检测
//   - ✅ 导航菜单排序与能力过滤
//   - ❌ 不应包含 HTTP 服务逻辑
//   - ❌ 不应包含终端输出逻辑
//
// ============================================================================

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::models::route::{BackendCapabilities, Icon, PageView, RouteEntry};

/// 路由表配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("duplicate route path '{path}' (entries #{first} and #{second})")]
    DuplicatePath {
        path: String,
        first: usize,
        second: usize,
    },
    #[error("duplicate route name '{name}' (path '{path}')")]
    DuplicateName { name: String, path: String },
    #[error("route '{path}' sets both redirect and component")]
    RedirectWithComponent { path: String },
    #[error("route '{path}' has neither component, redirect nor children")]
    MissingTarget { path: String },
    #[error("route path '{path}' must start with '/'")]
    InvalidPath { path: String },
    #[error("route '{path}' redirects to unknown path '{target}'")]
    UnknownRedirectTarget { path: String, target: String },
    #[error("redirect cycle detected involving '{path}'")]
    RedirectCycle { path: String },
}

/// 已校验的只读路由表
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

/// 内置路由条目（原始顺序即同位置时的排序依据）
pub fn builtin_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::page("dashboard", "Dashboard", "/", PageView::Dashboard)
            .with_icon(Icon::MonitorDashboard)
            .always_show()
            .in_navi(10),
        RouteEntry::page("agent", "AI Agent", "/agent", PageView::AgentDashboard)
            .with_icon(Icon::Robot)
            .always_show()
            .in_navi(15),
        RouteEntry::page("connectivity", "Pro Connect", "/connect", PageView::Connectivity)
            .with_icon(Icon::QrcodeScan)
            .always_show()
            .in_navi(16),
        RouteEntry::page("marketplace", "Pro Shop", "/marketplace", PageView::Marketplace)
            .with_icon(Icon::Shopping)
            .always_show()
            .in_navi(17),
        RouteEntry::page("farm", "Printers", "/allPrinters", PageView::Farm),
        RouteEntry::page("webcam", "Webcam", "/cam", PageView::Webcam)
            .with_icon(Icon::Webcam)
            .always_show()
            .in_navi(20)
            .fullscreen(),
        RouteEntry::page("console", "Console", "/console", PageView::Console)
            .with_icon(Icon::ConsoleLine)
            .always_show()
            .requires_klipper_connection()
            .in_navi(30),
        RouteEntry::page("heightmap", "Heightmap", "/heightmap", PageView::Heightmap)
            .with_icon(Icon::Grid)
            .requires_klipper("bed_mesh")
            .in_navi(40),
        RouteEntry::page("gcodefiles", "G-Code Files", "/files", PageView::Files)
            .with_icon(Icon::FileDocumentMultipleOutline)
            .always_show()
            .requires_directory("gcodes")
            .in_navi(50)
            .fullscreen(),
        RouteEntry::page("gcodeviewer", "G-Code Viewer", "/viewer", PageView::Viewer)
            .with_icon(Icon::Video3d)
            .always_show()
            .in_navi(60)
            .fullscreen(),
        RouteEntry::page("history", "History", "/history", PageView::History)
            .with_icon(Icon::History)
            .always_show()
            .requires_moonraker("history")
            .in_navi(70),
        RouteEntry::page("timelapse", "Timelapse", "/timelapse", PageView::Timelapse)
            .with_icon(Icon::Timelapse)
            .always_show()
            .requires_moonraker("timelapse")
            .in_navi(80),
        RouteEntry::page("machine", "Machine", "/config", PageView::Machine)
            .with_icon(Icon::Wrench)
            .always_show()
            .in_navi(90),
        RouteEntry::redirect("/settings/machine", "/config"),
    ]
}

impl RouteTable {
    /// 校验并构造路由表，第一个违规条目即失败
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        let table = Self { entries };
        table.validate()?;
        debug!(entries = table.entries.len(), "route table validated");
        Ok(table)
    }

    /// 内置路由表（启动断言）
    pub fn builtin() -> Result<Self, RouteError> {
        Self::new(builtin_routes())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// 展开子路由后的 (完整路径, 条目) 列表，保持声明顺序
    pub fn flatten(&self) -> Vec<(String, &RouteEntry)> {
        let mut flat = Vec::new();
        for entry in &self.entries {
            flatten_into(entry, "", &mut flat);
        }
        flat
    }

    /// 按完整路径查找条目
    pub fn find(&self, path: &str) -> Option<&RouteEntry> {
        self.flatten()
            .into_iter()
            .find(|(full, _)| full == path)
            .map(|(_, entry)| entry)
    }

    /// 沿重定向链解析到最终条目
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        let mut current = self.find(path)?;
        // 校验阶段已排除环，链长不会超过条目数
        for _ in 0..=self.entries.len() {
            match &current.redirect {
                Some(target) => current = self.find(target)?,
                None => return Some(current),
            }
        }
        None
    }

    /// 纯重定向条目 (源路径, 目标路径)
    pub fn redirects(&self) -> Vec<(String, String)> {
        self.flatten()
            .into_iter()
            .filter_map(|(full, entry)| entry.redirect.clone().map(|target| (full, target)))
            .collect()
    }

    /// 导航菜单条目：`show_in_navi` 为真，按 position 稳定排序，无 position 的排在最后
    pub fn navigation(&self) -> Vec<&RouteEntry> {
        let mut items: Vec<&RouteEntry> = self.entries.iter().filter(|e| e.show_in_navi).collect();
        items.sort_by_key(|entry| (entry.position.is_none(), entry.position.unwrap_or(0)));
        items
    }

    /// 给定后端能力下可见的导航条目
    pub fn available_navigation(&self, caps: &BackendCapabilities) -> Vec<&RouteEntry> {
        self.navigation()
            .into_iter()
            .filter(|entry| entry.is_available(caps))
            .collect()
    }

    fn validate(&self) -> Result<(), RouteError> {
        let flat = self.flatten();
        let mut seen_paths: HashMap<&str, usize> = HashMap::new();
        let mut seen_names: HashMap<&str, &str> = HashMap::new();

        for (index, (full, entry)) in flat.iter().enumerate() {
            if !full.starts_with('/') {
                return Err(RouteError::InvalidPath { path: full.clone() });
            }
            if let Some(&first) = seen_paths.get(full.as_str()) {
                return Err(RouteError::DuplicatePath {
                    path: full.clone(),
                    first,
                    second: index,
                });
            }
            seen_paths.insert(full.as_str(), index);

            if let Some(name) = entry.name.as_deref() {
                if seen_names.insert(name, full.as_str()).is_some() {
                    return Err(RouteError::DuplicateName {
                        name: name.to_string(),
                        path: full.clone(),
                    });
                }
            }

            match (&entry.redirect, &entry.component) {
                (Some(_), Some(_)) => {
                    return Err(RouteError::RedirectWithComponent { path: full.clone() })
                }
                (None, None) if entry.children.is_empty() => {
                    return Err(RouteError::MissingTarget { path: full.clone() })
                }
                _ => {}
            }
        }

        self.validate_redirects(&flat, &seen_paths)
    }

    /// 重定向目标必须存在且不能成环
    fn validate_redirects(
        &self,
        flat: &[(String, &RouteEntry)],
        paths: &HashMap<&str, usize>,
    ) -> Result<(), RouteError> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let nodes: Vec<NodeIndex> = flat.iter().map(|(full, _)| graph.add_node(full.as_str())).collect();

        for (index, (full, entry)) in flat.iter().enumerate() {
            if let Some(target) = &entry.redirect {
                let target_index = paths.get(target.as_str()).ok_or_else(|| {
                    RouteError::UnknownRedirectTarget {
                        path: full.clone(),
                        target: target.clone(),
                    }
                })?;
                graph.add_edge(nodes[index], nodes[*target_index], ());
            }
        }

        toposort(&graph, None).map_err(|cycle| RouteError::RedirectCycle {
            path: graph[cycle.node_id()].to_string(),
        })?;
        Ok(())
    }
}

fn flatten_into<'a>(entry: &'a RouteEntry, parent: &str, flat: &mut Vec<(String, &'a RouteEntry)>) {
    let full = join_path(parent, &entry.path);
    flat.push((full.clone(), entry));
    for child in &entry.children {
        flatten_into(child, &full, flat);
    }
}

/// 子路由相对父路径，以 `/` 开头的子路由视为绝对路径
fn join_path(parent: &str, path: &str) -> String {
    if parent.is_empty() || path.starts_with('/') {
        path.to_string()
    } else if parent.ends_with('/') {
        format!("{}{}", parent, path)
    } else {
        format!("{}/{}", parent, path)
    }
}
