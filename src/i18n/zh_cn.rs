// ============================================================================
// PTC - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ✅ 翻译键值对维护
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 服务相关
    ("serve.shell_ready", "路由表校验通过（{} 条），当前语言: {}"),
    ("serve.missing_index", "{} 中没有 index.html，前端路由将返回 404"),
    ("serve.listening", "服务地址 http://{}，目录 {}（Ctrl-C 停止）"),
    ("serve.stopped", "服务已停止"),
    // 路由相关
    ("routes.header", "共 {} 条路由，标题语言: {}"),
    ("routes.column.position", "顺序"),
    ("routes.column.path", "路径"),
    ("routes.column.title", "标题"),
    ("routes.column.target", "视图 / 跳转"),
    ("routes.fullscreen", "全屏"),
    // 语言包相关
    ("locale.unknown", "语言 '{}' 未注册，未做任何改动"),
    ("locale.loaded", "已切换到语言 '{}'，共 {} 条文本"),
    ("locale.key_missing", "'{}' 在语言 '{}' 中没有翻译"),
    ("locale.list.header", "已注册 {} 个语言包"),
    ("locale.list.active", "当前"),
    ("locale.list.fallback", "回退"),
    ("locale.check.fetching", "正在获取 {} 个语言包..."),
    ("locale.check.header", "语言包（参照: {}）"),
    ("locale.check.keys", "{} 条文本"),
    ("locale.check.missing", "缺失 {} 个键（共 {} 条文本）"),
    ("locale.check.failed", "加载失败: {}"),
    ("locale.check.all_good", "所有语言包完整"),
    ("locale.none_registered", "没有注册任何语言包"),
    ("locale.startup_failed", "启动时加载语言包失败: {}"),
    // 主题相关
    ("theme.palette", "调色板"),
    ("theme.dark", "深色模式: {}"),
    ("theme.breakpoint", "移动端断点: {}px"),
    ("theme.custom_properties", "CSS 自定义属性: {}"),
    ("theme.directives", "交互指令: {}"),
    ("theme.written", "主题已写入 {}"),
    ("theme.table_not_renderable", "表格格式仅用于终端显示，无法导出"),
    // 品牌替换相关
    ("brand.start", "将 '{}' 替换为 '{}'"),
    ("brand.dry_run", "预演模式：不会写入任何文件"),
    ("brand.locales", "语言包"),
    ("brand.dist", "构建产物"),
    ("brand.summary", "{}: 已更新 {}/{} 个文件，跳过 {} 个"),
    ("brand.summary_dry_run", "{}: 将更新 {}/{} 个文件，跳过 {} 个"),
    ("brand.skip_missing", "目录不存在，已跳过: {}"),
    // 检查相关
    ("check.start", "正在检查面板配置..."),
    (
        "check.routes.ok",
        "路由表有效: {} 条路由，导航 {} 条，可用 {} 条",
    ),
    ("check.routes.invalid", "路由表无效: {}"),
    ("check.theme.ok", "主题配置有效（断点 {}px）"),
    ("check.theme.invalid", "主题配置构造结果不确定"),
    ("check.all_good", "一切正常"),
    // 初始化相关
    ("init.start", "正在初始化配置文件..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖"),
    ("init.config_created", "配置文件已创建: {}"),
    ("init.next_steps", "编辑配置后运行 'ptc check' 与 'ptc serve'"),
    ("init.create_failed", "创建配置文件失败: {}"),
    // 错误
    ("error.unknown_format", "未知的输出格式: {}"),
];
