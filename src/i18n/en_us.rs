// ============================================================================
// PTC - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ✅ Translation key-value pairs maintenance
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Serve related
    ("serve.shell_ready", "Route table valid ({} entries), active locale: {}"),
    (
        "serve.missing_index",
        "No index.html in {}, client routes will return 404",
    ),
    ("serve.listening", "Serving on http://{} from {} (Ctrl-C to stop)"),
    ("serve.stopped", "Server stopped"),
    // Routes related
    ("routes.header", "{} routes, titles in locale: {}"),
    ("routes.column.position", "Pos"),
    ("routes.column.path", "Path"),
    ("routes.column.title", "Title"),
    ("routes.column.target", "View / Target"),
    ("routes.fullscreen", "fullscreen"),
    // Locale related
    ("locale.unknown", "Locale '{}' is not registered, nothing changed"),
    ("locale.loaded", "Locale '{}' active, {} messages"),
    ("locale.key_missing", "No translation for '{}' in locale '{}'"),
    ("locale.list.header", "{} registered locales"),
    ("locale.list.active", "active"),
    ("locale.list.fallback", "fallback"),
    ("locale.check.fetching", "Fetching {} locale bundles..."),
    ("locale.check.header", "Locale bundles (reference: {})"),
    ("locale.check.keys", "{} messages"),
    ("locale.check.missing", "{} keys missing ({} messages)"),
    ("locale.check.failed", "failed to load: {}"),
    ("locale.check.all_good", "All locale bundles are complete"),
    ("locale.none_registered", "No locale bundles are registered"),
    ("locale.startup_failed", "Failed to load locale at startup: {}"),
    // Theme related
    ("theme.palette", "Palette"),
    ("theme.dark", "Dark mode: {}"),
    ("theme.breakpoint", "Mobile breakpoint: {}px"),
    ("theme.custom_properties", "CSS custom properties: {}"),
    ("theme.directives", "Directives: {}"),
    ("theme.written", "Theme written to {}"),
    (
        "theme.table_not_renderable",
        "Table format is terminal-only and cannot be exported",
    ),
    // Brand related
    ("brand.start", "Replacing '{}' with '{}'"),
    ("brand.dry_run", "Dry run: no files will be written"),
    ("brand.locales", "locales"),
    ("brand.dist", "dist"),
    ("brand.summary", "{}: {} of {} files updated, {} skipped"),
    (
        "brand.summary_dry_run",
        "{}: {} of {} files would be updated, {} skipped",
    ),
    ("brand.skip_missing", "Directory not found, skipped: {}"),
    // Check related
    ("check.start", "Checking panel configuration..."),
    (
        "check.routes.ok",
        "Route table valid: {} routes, {} in navigation, {} available",
    ),
    ("check.routes.invalid", "Route table invalid: {}"),
    ("check.theme.ok", "Theme configuration valid (breakpoint {}px)"),
    ("check.theme.invalid", "Theme configuration is not deterministic"),
    ("check.all_good", "Everything looks good"),
    // Init related
    ("init.start", "Initializing configuration file..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Edit the file, then run 'ptc check' and 'ptc serve'",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
    // Errors
    ("error.unknown_format", "Unknown output format: {}"),
];
