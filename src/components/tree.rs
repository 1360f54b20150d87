use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::tree::{is_image_name, FolderTree, NodeKind, VisibleRow};
use crate::theme::ThemeColors;

/// Tree pane widget that renders the visible set with box-drawing characters.
pub struct TreeWidget<'a> {
    tree: &'a FolderTree,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(tree: &'a FolderTree, theme: &'a ThemeColors) -> Self {
        Self {
            tree,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Build the indentation prefix for a row from its ancestor chain.
    ///
    /// For each ancestor depth we need to know whether that ancestor was the
    /// last of its siblings, to decide between a continuation line and a gap.
    /// The ancestor at depth `d` is the nearest preceding row at depth `d`.
    fn build_prefix(rows: &[VisibleRow], index: usize) -> String {
        let row = &rows[index];
        if row.depth == 0 {
            return String::new();
        }

        let mut prefix = String::new();
        for d in 1..row.depth {
            let mut ancestor_is_last = false;
            for prior in rows[..index].iter().rev() {
                if prior.depth == d {
                    ancestor_is_last = prior.is_last_sibling;
                    break;
                }
                if prior.depth < d {
                    break;
                }
            }
            prefix.push_str(if ancestor_is_last { "   " } else { "│  " });
        }

        prefix.push_str(if row.is_last_sibling { "└──" } else { "├──" });
        prefix
    }

    fn row_indicator(row: &VisibleRow) -> &'static str {
        match row.kind {
            NodeKind::Directory if row.is_expanded => "▾ ",
            NodeKind::Directory => "▸ ",
            NodeKind::File => "  ",
        }
    }

    fn row_style(&self, row: &VisibleRow, is_selected: bool, is_multi: bool) -> Style {
        if is_selected {
            return Style::default()
                .bg(self.theme.tree_selected_bg)
                .fg(self.theme.tree_selected_fg)
                .add_modifier(Modifier::BOLD);
        }
        if is_multi {
            return Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD);
        }
        if row.is_hidden {
            return Style::default().fg(self.theme.tree_hidden_fg);
        }
        match row.kind {
            NodeKind::Directory => Style::default()
                .fg(self.theme.tree_dir_fg)
                .add_modifier(Modifier::BOLD),
            NodeKind::File if is_image_name(&row.name) => {
                Style::default().fg(self.theme.tree_image_fg)
            }
            NodeKind::File => Style::default().fg(self.theme.tree_file_fg),
        }
    }
}

impl<'a> Widget for TreeWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = &self.tree.rows;
        let visible_height = inner_area.height as usize;
        if rows.is_empty() || visible_height == 0 {
            return;
        }

        let scroll = self.tree.scroll_offset;
        let visible_rows = rows.iter().enumerate().skip(scroll).take(visible_height);

        for (i, (idx, row)) in visible_rows.enumerate() {
            let y = inner_area.y + i as u16;

            let prefix = Self::build_prefix(rows, idx);
            let indicator = Self::row_indicator(row);

            let is_selected = idx == self.tree.selected_index;
            let is_multi = self.tree.multi_selected.contains(&idx);
            let style = self.row_style(row, is_selected, is_multi);

            let marker = if is_multi { "● " } else { "" };
            let content = format!("{}{}{}{}", prefix, marker, indicator, row.name);
            let line = Line::from(Span::styled(content, style));
            buf.set_line(inner_area.x, y, &line, inner_area.width);
        }
    }
}
