//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--filter`, `--output`, etc.)
//! 2. `$FOLDER_BROWSER_CONFIG` environment variable (path to config file)
//! 3. Project-local `.folder-browser.toml` in the current working directory
//! 4. Global `~/.config/folder-browser/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Starting directory (overridden by the CLI positional arg).
    pub start_path: Option<String>,
    /// Show hidden files by default.
    pub show_hidden: Option<bool>,
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Filter settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Initial filter pattern applied at startup.
    pub pattern: Option<String>,
    /// Directory visibility policy under a filter: "shallow" or "prune".
    pub policy: Option<String>,
    /// Restrict visible files to known image extensions.
    pub images_only: Option<bool>,
}

/// Open hand-off settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OpenConfig {
    /// Output format for emitted open requests: "lines", "null", "json".
    pub output: Option<String>,
    /// External viewer command; when set, opens spawn it and the browser
    /// keeps running.
    pub exec: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub tree_image_fg: Option<String>,
    pub tree_hidden_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub filter: FilterConfig,
    pub open: OpenConfig,
    pub theme: ThemeConfig,
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $FOLDER_BROWSER_CONFIG environment variable
    if let Ok(env_path) = std::env::var("FOLDER_BROWSER_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.folder-browser.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".folder-browser.toml"));
    }

    // 3. Global `~/.config/folder-browser/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("folder-browser").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_path: other
                    .general
                    .start_path
                    .clone()
                    .or(self.general.start_path),
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
                mouse: other.general.mouse.or(self.general.mouse),
            },
            filter: FilterConfig {
                pattern: other.filter.pattern.clone().or(self.filter.pattern),
                policy: other.filter.policy.clone().or(self.filter.policy),
                images_only: other.filter.images_only.or(self.filter.images_only),
            },
            open: OpenConfig {
                output: other.open.output.clone().or(self.open.output),
                exec: other.open.exec.clone().or(self.open.exec),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether to show hidden files by default.
    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(false)
    }

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Initial filter pattern.
    pub fn filter_pattern(&self) -> &str {
        self.filter.pattern.as_deref().unwrap_or("")
    }

    /// Directory visibility policy: "shallow" or "prune".
    pub fn filter_policy(&self) -> &str {
        self.filter.policy.as_deref().unwrap_or("shallow")
    }

    /// Whether only image files are listed.
    pub fn images_only(&self) -> bool {
        self.filter.images_only.unwrap_or(false)
    }

    /// Output format name for open requests.
    pub fn open_output(&self) -> &str {
        self.open.output.as_deref().unwrap_or("lines")
    }

    /// External viewer command, if configured.
    pub fn open_exec(&self) -> Option<&str> {
        self.open.exec.as_deref()
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.show_hidden(), false);
        assert_eq!(cfg.mouse_enabled(), true);
        assert_eq!(cfg.filter_pattern(), "");
        assert_eq!(cfg.filter_policy(), "shallow");
        assert_eq!(cfg.images_only(), false);
        assert_eq!(cfg.open_output(), "lines");
        assert_eq!(cfg.open_exec(), None);
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn toml_parsing_full() {
        let toml = r##"
[general]
start_path = "/data/images"
show_hidden = true
mouse = false

[filter]
pattern = "png"
policy = "prune"
images_only = true

[open]
output = "json"
exec = "napari"

[theme]
scheme = "light"

[theme.custom]
tree_dir_fg = "#89b4fa"
"##;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.general.start_path.as_deref(), Some("/data/images"));
        assert_eq!(cfg.show_hidden(), true);
        assert_eq!(cfg.mouse_enabled(), false);
        assert_eq!(cfg.filter_pattern(), "png");
        assert_eq!(cfg.filter_policy(), "prune");
        assert_eq!(cfg.images_only(), true);
        assert_eq!(cfg.open_output(), "json");
        assert_eq!(cfg.open_exec(), Some("napari"));
        assert_eq!(cfg.theme_scheme(), "light");
        assert_eq!(
            cfg.theme.custom.as_ref().unwrap().tree_dir_fg.as_deref(),
            Some("#89b4fa")
        );
    }

    #[test]
    fn toml_parsing_partial_keeps_defaults() {
        let toml = r#"
[filter]
pattern = "tif"
"#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.filter_pattern(), "tif");
        assert_eq!(cfg.filter_policy(), "shallow");
        assert_eq!(cfg.show_hidden(), false);
    }

    #[test]
    fn merge_other_wins() {
        let base: AppConfig = toml::from_str(
            r#"
[general]
show_hidden = false

[filter]
pattern = "png"
"#,
        )
        .unwrap();
        let over: AppConfig = toml::from_str(
            r#"
[general]
show_hidden = true
"#,
        )
        .unwrap();

        let merged = base.merge(&over);
        assert_eq!(merged.show_hidden(), true);
        // Fields absent in `over` survive from `base`.
        assert_eq!(merged.filter_pattern(), "png");
    }

    #[test]
    fn merge_custom_theme_override_replaces() {
        let base: AppConfig = toml::from_str(
            r##"
[theme.custom]
tree_dir_fg = "#111111"
"##,
        )
        .unwrap();
        let over: AppConfig = toml::from_str(
            r##"
[theme.custom]
tree_dir_fg = "#222222"
"##,
        )
        .unwrap();

        let merged = base.merge(&over);
        assert_eq!(
            merged.theme.custom.unwrap().tree_dir_fg.as_deref(),
            Some("#222222")
        );
    }

    #[test]
    fn unparseable_file_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not toml [").unwrap();
        assert!(load_file(&path).is_none());
    }

    #[test]
    fn missing_file_is_ignored() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }
}
