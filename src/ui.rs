use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, Mode};
use crate::components::filter::FilterLineWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::components::tree::TreeWidget;
use crate::fs::tree::NodeKind;
use crate::theme::ThemeColors;

/// Render the application UI: tree pane, filter line, status bar.
pub fn render(app: &mut App, theme: &ThemeColors, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Keep the selected row visible, and remember the pane height for mouse
    // hit-testing.
    let visible_height = chunks[0].height.saturating_sub(2) as usize;
    app.tree.update_scroll(visible_height);
    app.tree_view_height = visible_height;

    let title = format!(" {} ", app.tree.display_root().resolve_path().display());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    frame.render_widget(TreeWidget::new(&app.tree, theme).block(block), chunks[0]);

    let file_count = app
        .tree
        .rows
        .iter()
        .filter(|r| r.kind == NodeKind::File)
        .count();
    let pattern = if app.mode == Mode::FilterEntry {
        app.filter_entry.input.as_str()
    } else {
        app.tree.filter().pattern()
    };
    frame.render_widget(
        FilterLineWidget::new(
            pattern,
            app.filter_entry.cursor,
            app.mode == Mode::FilterEntry,
            file_count,
            theme,
        ),
        chunks[1],
    );

    let summary = format!(
        "{} shown · {} marked · hidden {} · {} filtering",
        app.tree.rows.len(),
        app.tree.multi_selected.len(),
        if app.tree.show_hidden { "on" } else { "off" },
        app.tree.policy.label(),
    );
    let mut status = StatusBarWidget::new(&summary, theme);
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, chunks[2]);
}
