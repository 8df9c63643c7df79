// ============================================================================
// PTC - 路由数据模型
// ============================================================================
//
// 文件: src/models/route.rs
// 职责: 导航路由条目的数据结构定义
// 边界:
//   - ✅ 路由条目结构定义
//   - ✅ 页面视图与图标引用定义
//   - ✅ 后端能力门控字段与匹配
//   - ✅ 路由条目构造辅助方法
//   - ❌ 不应包含路由表校验逻辑
//   - ❌ 不应包含导航排序逻辑
//   - ❌ 不应包含 HTTP 服务逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 页面视图引用（由前端独立实现，这里只是不透明的标识）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageView {
    Dashboard,
    AgentDashboard,
    Connectivity,
    Marketplace,
    Farm,
    Webcam,
    Console,
    Heightmap,
    Files,
    Viewer,
    History,
    Timelapse,
    Machine,
}

impl PageView {
    /// 视图组件名称
    pub fn as_str(&self) -> &'static str {
        match self {
            PageView::Dashboard => "Dashboard",
            PageView::AgentDashboard => "AgentDashboard",
            PageView::Connectivity => "Connectivity",
            PageView::Marketplace => "Marketplace",
            PageView::Farm => "Farm",
            PageView::Webcam => "Webcam",
            PageView::Console => "Console",
            PageView::Heightmap => "Heightmap",
            PageView::Files => "Files",
            PageView::Viewer => "Viewer",
            PageView::History => "History",
            PageView::Timelapse => "Timelapse",
            PageView::Machine => "Machine",
        }
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Material Design 图标引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    MonitorDashboard,
    Robot,
    QrcodeScan,
    Shopping,
    Webcam,
    ConsoleLine,
    Grid,
    FileDocumentMultipleOutline,
    Video3d,
    History,
    Timelapse,
    Wrench,
}

impl Icon {
    /// 图标在 @mdi/js 中的导出名
    pub fn mdi_name(&self) -> &'static str {
        match self {
            Icon::MonitorDashboard => "mdiMonitorDashboard",
            Icon::Robot => "mdiRobot",
            Icon::QrcodeScan => "mdiQrcodeScan",
            Icon::Shopping => "mdiShopping",
            Icon::Webcam => "mdiWebcam",
            Icon::ConsoleLine => "mdiConsoleLine",
            Icon::Grid => "mdiGrid",
            Icon::FileDocumentMultipleOutline => "mdiFileDocumentMultipleOutline",
            Icon::Video3d => "mdiVideo3d",
            Icon::History => "mdiHistory",
            Icon::Timelapse => "mdiTimelapse",
            Icon::Wrench => "mdiWrench",
        }
    }
}

/// 后端当前具备的能力（由导航渲染方提供）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendCapabilities {
    /// Moonraker 已注册的目录
    #[serde(default)]
    pub registered_directories: HashSet<String>,
    /// Moonraker 已加载的组件
    #[serde(default)]
    pub moonraker_components: HashSet<String>,
    /// Klipper 已配置的组件
    #[serde(default)]
    pub klipper_components: HashSet<String>,
    /// Klipper 是否已连接
    #[serde(default)]
    pub klipper_connected: bool,
}

/// 导航路由条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    /// 唯一标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 显示标题，纯重定向条目为空
    pub title: Option<String>,
    /// URL 路径
    pub path: String,
    /// 已废弃别名的跳转目标
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// 渲染的页面视图，纯重定向条目为空
    pub component: Option<PageView>,
    /// 不受后端能力影响，始终可用
    pub always_show: bool,
    /// 是否出现在导航菜单
    pub show_in_navi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moonraker_component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub klipper_component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub klipper_is_connected: Option<bool>,
    /// 菜单排序键，越小越靠前
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    /// 页面请求无边框布局
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    /// 创建页面条目
    pub fn page(name: &str, title: &str, path: &str, component: PageView) -> Self {
        Self {
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            path: path.to_string(),
            redirect: None,
            icon: None,
            component: Some(component),
            always_show: false,
            show_in_navi: false,
            registered_directory: None,
            moonraker_component: None,
            klipper_component: None,
            klipper_is_connected: None,
            position: None,
            fullscreen: false,
            children: Vec::new(),
        }
    }

    /// 创建纯重定向条目
    pub fn redirect(path: &str, target: &str) -> Self {
        Self {
            name: None,
            title: None,
            path: path.to_string(),
            redirect: Some(target.to_string()),
            icon: None,
            component: None,
            always_show: false,
            show_in_navi: false,
            registered_directory: None,
            moonraker_component: None,
            klipper_component: None,
            klipper_is_connected: None,
            position: None,
            fullscreen: false,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn always_show(mut self) -> Self {
        self.always_show = true;
        self
    }

    /// 加入导航菜单并指定排序位置
    pub fn in_navi(mut self, position: i32) -> Self {
        self.show_in_navi = true;
        self.position = Some(position);
        self
    }

    pub fn fullscreen(mut self) -> Self {
        self.fullscreen = true;
        self
    }

    pub fn requires_directory(mut self, directory: &str) -> Self {
        self.registered_directory = Some(directory.to_string());
        self
    }

    pub fn requires_moonraker(mut self, component: &str) -> Self {
        self.moonraker_component = Some(component.to_string());
        self
    }

    pub fn requires_klipper(mut self, component: &str) -> Self {
        self.klipper_component = Some(component.to_string());
        self
    }

    pub fn requires_klipper_connection(mut self) -> Self {
        self.klipper_is_connected = Some(true);
        self
    }

    pub fn with_children(mut self, children: Vec<RouteEntry>) -> Self {
        self.children = children;
        self
    }

    /// 是否为纯重定向条目
    pub fn is_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// 导航标题对应的翻译键
    pub fn title_key(&self) -> Option<String> {
        self.title.as_ref().map(|title| format!("Router.{}", title))
    }

    /// 条目在给定后端能力下是否可用
    ///
    /// `always_show` 的条目不受能力影响；其余条目上声明的每一个门控条件都必须满足。
    pub fn is_available(&self, caps: &BackendCapabilities) -> bool {
        if self.always_show {
            return true;
        }
        if let Some(directory) = &self.registered_directory {
            if !caps.registered_directories.contains(directory) {
                return false;
            }
        }
        if let Some(component) = &self.moonraker_component {
            if !caps.moonraker_components.contains(component) {
                return false;
            }
        }
        if let Some(component) = &self.klipper_component {
            if !caps.klipper_components.contains(component) {
                return false;
            }
        }
        if self.klipper_is_connected == Some(true) && !caps.klipper_connected {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_entry_has_no_component() {
        let entry = RouteEntry::redirect("/old", "/new");
        assert!(entry.is_redirect());
        assert_eq!(entry.component, None);
        assert_eq!(entry.title, None);
        assert!(!entry.show_in_navi);
    }

    #[test]
    fn always_show_ignores_missing_capabilities() {
        let entry = RouteEntry::page("history", "History", "/history", PageView::History)
            .always_show()
            .requires_moonraker("history");
        assert!(entry.is_available(&BackendCapabilities::default()));
    }

    #[test]
    fn gated_entry_requires_every_capability() {
        let entry = RouteEntry::page("heightmap", "Heightmap", "/heightmap", PageView::Heightmap)
            .requires_klipper("bed_mesh")
            .requires_klipper_connection();

        let mut caps = BackendCapabilities::default();
        assert!(!entry.is_available(&caps));

        caps.klipper_components.insert("bed_mesh".to_string());
        assert!(!entry.is_available(&caps));

        caps.klipper_connected = true;
        assert!(entry.is_available(&caps));
    }

    #[test]
    fn title_key_uses_router_namespace() {
        let entry = RouteEntry::page("gcodefiles", "G-Code Files", "/files", PageView::Files);
        assert_eq!(entry.title_key().as_deref(), Some("Router.G-Code Files"));
        assert_eq!(RouteEntry::redirect("/a", "/b").title_key(), None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let entry = RouteEntry::page("webcam", "Webcam", "/cam", PageView::Webcam)
            .always_show()
            .in_navi(20);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["showInNavi"], true);
        assert_eq!(json["alwaysShow"], true);
        assert_eq!(json["position"], 20);
        assert!(json.get("redirect").is_none());
    }
}
