//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom color overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree pane
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_dir_fg: Color,
    pub tree_file_fg: Color,
    pub tree_image_fg: Color,
    pub tree_hidden_fg: Color,

    // Status bar and filter line
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        tree_file_fg: Color::Rgb(205, 214, 244),     // #cdd6f4
        tree_image_fg: Color::Rgb(166, 227, 161),    // #a6e3a1 (green)
        tree_hidden_fg: Color::Rgb(108, 112, 134),   // #6c7086 (overlay0)

        status_bg: Color::Rgb(49, 50, 68), // #313244 (surface0)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)

        error_fg: Color::Rgb(243, 139, 168),  // #f38ba8 (red)
        accent_fg: Color::Rgb(137, 220, 235), // #89dceb (sky)
        dim_fg: Color::Rgb(108, 112, 134),    // #6c7086
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),              // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(188, 192, 204),   // #bcc0cc (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),     // #4c4f69
        tree_dir_fg: Color::Rgb(30, 102, 245),         // #1e66f5 (blue)
        tree_file_fg: Color::Rgb(76, 79, 105),         // #4c4f69
        tree_image_fg: Color::Rgb(64, 160, 43),        // #40a02b (green)
        tree_hidden_fg: Color::Rgb(156, 160, 176),     // #9ca0b0 (overlay0)

        status_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface0)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)

        error_fg: Color::Rgb(210, 15, 57),   // #d20f39 (red)
        accent_fg: Color::Rgb(4, 165, 229),  // #04a5e5 (sky)
        dim_fg: Color::Rgb(156, 160, 176),   // #9ca0b0
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let fields: [(&Option<String>, &mut Color); 10] = [
        (&custom.tree_fg, &mut theme.tree_fg),
        (&custom.tree_selected_bg, &mut theme.tree_selected_bg),
        (&custom.tree_selected_fg, &mut theme.tree_selected_fg),
        (&custom.tree_dir_fg, &mut theme.tree_dir_fg),
        (&custom.tree_file_fg, &mut theme.tree_file_fg),
        (&custom.tree_image_fg, &mut theme.tree_image_fg),
        (&custom.tree_hidden_fg, &mut theme.tree_hidden_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.status_fg, &mut theme.status_fg),
        (&custom.border_fg, &mut theme.border_fg),
    ];
    for (hex, slot) in fields {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
