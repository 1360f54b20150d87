use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = "enter open/descend  o open  s stack  space mark  / filter  q quit";

/// Status bar: browse summary on the left, key hints on the right, with
/// transient messages replacing the summary while they last.
pub struct StatusBarWidget<'a> {
    summary: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(summary: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            summary,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        let bar_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        // Paint the full-width background first.
        let filler = " ".repeat(width);
        buf.set_line(
            area.x,
            area.y,
            &Line::from(Span::styled(filler, bar_style)),
            area.width,
        );

        let left = match self.status_message {
            Some(msg) => msg,
            None => self.summary,
        };
        let left_style = if self.status_message.is_some() && self.is_error {
            Style::default()
                .bg(self.theme.status_bg)
                .fg(self.theme.error_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            bar_style
        };
        buf.set_line(
            area.x,
            area.y,
            &Line::from(Span::styled(format!(" {}", left), left_style)),
            area.width,
        );

        // Right-aligned key hints, only when nothing would overlap.
        let hints_len = KEY_HINTS.len() + 1;
        if self.status_message.is_none() && left.len() + 2 + hints_len < width {
            let x = area.x + (width - hints_len) as u16;
            let hint_style = Style::default()
                .bg(self.theme.status_bg)
                .fg(self.theme.dim_fg);
            buf.set_line(
                x,
                area.y,
                &Line::from(Span::styled(format!("{} ", KEY_HINTS), hint_style)),
                area.width,
            );
        }
    }
}
