use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Single-line filter input rendered below the tree pane.
///
/// When active, the cursor position is drawn as an inverted block; when
/// inactive, the line just echoes the pattern currently in effect.
pub struct FilterLineWidget<'a> {
    pattern: &'a str,
    cursor: usize,
    active: bool,
    file_count: usize,
    theme: &'a ThemeColors,
}

impl<'a> FilterLineWidget<'a> {
    pub fn new(
        pattern: &'a str,
        cursor: usize,
        active: bool,
        file_count: usize,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            pattern,
            cursor,
            active,
            file_count,
            theme,
        }
    }
}

impl<'a> Widget for FilterLineWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let prompt_style = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);
        let input_style = Style::default().fg(self.theme.tree_fg);
        let dim_style = Style::default().fg(self.theme.dim_fg);

        let mut spans = vec![Span::styled("Filter: ", prompt_style)];

        if self.active {
            let cursor_style = Style::default()
                .bg(self.theme.tree_fg)
                .fg(self.theme.status_bg)
                .add_modifier(Modifier::BOLD);
            let (before, cursor_char, after) = if self.cursor < self.pattern.len() {
                let ch_end = self.pattern[self.cursor..]
                    .chars()
                    .next()
                    .map(|c| self.cursor + c.len_utf8())
                    .unwrap_or(self.pattern.len());
                (
                    &self.pattern[..self.cursor],
                    &self.pattern[self.cursor..ch_end],
                    &self.pattern[ch_end..],
                )
            } else {
                (self.pattern, " ", "")
            };
            spans.push(Span::styled(before, input_style));
            spans.push(Span::styled(cursor_char, cursor_style));
            spans.push(Span::styled(after, input_style));
        } else if self.pattern.is_empty() {
            spans.push(Span::styled("(none) press / to filter", dim_style));
        } else {
            spans.push(Span::styled(self.pattern, input_style));
        }

        let count = format!(
            "  {} file{}",
            self.file_count,
            if self.file_count == 1 { "" } else { "s" }
        );
        spans.push(Span::styled(count, dim_style));

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
