use std::time::{Duration, Instant};

use crate::fs::tree::{FolderTree, NodeKind};
use crate::open::OpenRequest;

/// Two consecutive clicks on the same row within this window count as a
/// double click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Application mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    FilterEntry,
}

/// State of the filter input line while it has focus.
#[derive(Debug, Default)]
pub struct FilterEntry {
    pub input: String,
    pub cursor: usize,
    /// Pattern in effect when entry began; restored on Esc.
    previous: String,
}

/// A transient status bar message.
#[derive(Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    created: Instant,
}

/// Main application state.
pub struct App {
    pub tree: FolderTree,
    pub mode: Mode,
    pub filter_entry: FilterEntry,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
    /// Open request to emit on stdout once the terminal is restored.
    pub pending_open: Option<OpenRequest>,
    /// External viewer command; when set, opens spawn it instead of quitting.
    pub exec_command: Option<String>,
    /// Whether any open request was delivered during this session.
    pub opened_any: bool,
    /// Inner height of the tree pane, recorded at render time so mouse
    /// clicks can be bounds-checked.
    pub tree_view_height: usize,
    last_click: Option<(usize, Instant)>,
}

impl App {
    /// Create a new App over an already-rooted tree.
    pub fn new(tree: FolderTree, exec_command: Option<String>) -> Self {
        Self {
            tree,
            mode: Mode::default(),
            filter_entry: FilterEntry::default(),
            should_quit: false,
            status_message: None,
            pending_open: None,
            exec_command,
            opened_any: false,
            tree_view_height: 0,
            last_click: None,
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Selection movement ───────────────────────────────────────────────────

    /// Move selection down by one row.
    pub fn select_next(&mut self) {
        let len = self.tree.rows.len();
        if len > 0 && self.tree.selected_index < len - 1 {
            self.tree.selected_index += 1;
        }
    }

    /// Move selection up by one row.
    pub fn select_previous(&mut self) {
        if self.tree.selected_index > 0 {
            self.tree.selected_index -= 1;
        }
    }

    /// Jump to the first row.
    pub fn select_first(&mut self) {
        self.tree.selected_index = 0;
    }

    /// Jump to the last row.
    pub fn select_last(&mut self) {
        let len = self.tree.rows.len();
        if len > 0 {
            self.tree.selected_index = len - 1;
        }
    }

    // ── Activation and opening ───────────────────────────────────────────────

    /// Activate the focused row: a directory becomes the new display root
    /// (the filter is kept), a file becomes a single-file open request.
    pub fn activate_selected(&mut self) {
        let (kind, path) = match self.tree.rows.get(self.tree.selected_index) {
            Some(row) => (row.kind, row.path.clone()),
            None => return,
        };
        if kind == NodeKind::Directory {
            if let Err(e) = self.tree.navigate_into(&path) {
                self.set_error(e.to_string());
            }
        } else {
            self.dispatch_open(OpenRequest::single(path));
        }
    }

    /// Build an open request from the multi-selection (falling back to the
    /// focused row) and dispatch it. Directories are silently dropped; an
    /// empty result is a no-op.
    pub fn open_selection(&mut self, stack: bool) {
        let mut paths = self.tree.selection_open_targets();
        if paths.is_empty() {
            if let Some(row) = self.tree.rows.get(self.tree.selected_index) {
                if row.kind == NodeKind::File {
                    paths.push(row.path.clone());
                }
            }
        }
        if paths.is_empty() {
            return;
        }
        self.dispatch_open(OpenRequest::batch(paths, stack));
    }

    fn dispatch_open(&mut self, request: OpenRequest) {
        if request.is_empty() {
            return;
        }
        match self.exec_command.clone() {
            Some(command) => match request.spawn_viewer(&command) {
                Ok(()) => {
                    self.opened_any = true;
                    let n = request.paths.len();
                    self.set_status(format!(
                        "Opened {} file{}",
                        n,
                        if n == 1 { "" } else { "s" }
                    ));
                }
                Err(e) => self.set_error(format!("Viewer failed: {e}")),
            },
            None => {
                self.opened_any = true;
                self.pending_open = Some(request);
                self.should_quit = true;
            }
        }
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    /// Re-root at the parent of the current root.
    pub fn navigate_up(&mut self) {
        match self.tree.navigate_up() {
            Ok(false) => self.set_status("Already at filesystem root".to_string()),
            Ok(true) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Expand the focused directory row.
    pub fn expand_selected(&mut self) {
        if let Err(e) = self.tree.expand_selected() {
            self.set_error(e.to_string());
        }
    }

    /// Collapse the focused directory, or jump to the parent row.
    pub fn collapse_selected(&mut self) {
        self.tree.collapse_selected();
    }

    /// Re-read the root directory.
    pub fn reload(&mut self) {
        match self.tree.reload() {
            Ok(()) => self.set_status("Reloaded".to_string()),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Toggle hidden file visibility.
    pub fn toggle_hidden(&mut self) {
        self.tree.toggle_hidden();
    }

    /// Switch between shallow and prune directory filtering.
    pub fn toggle_policy(&mut self) {
        self.tree.toggle_policy();
        self.set_status(format!("Filter policy: {}", self.tree.policy.label()));
    }

    // ── Filter entry ─────────────────────────────────────────────────────────

    /// Give focus to the filter input line.
    pub fn begin_filter_entry(&mut self) {
        self.filter_entry.previous = self.tree.filter().pattern().to_string();
        self.filter_entry.input = self.filter_entry.previous.clone();
        self.filter_entry.cursor = self.filter_entry.input.len();
        self.mode = Mode::FilterEntry;
    }

    /// Keep the entered pattern and return focus to the tree.
    pub fn accept_filter_entry(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Discard edits, restore the previous pattern, return focus to the tree.
    pub fn cancel_filter_entry(&mut self) {
        let previous = self.filter_entry.previous.clone();
        self.tree.set_filter(&previous);
        self.filter_entry.input = previous;
        self.filter_entry.cursor = self.filter_entry.input.len();
        self.mode = Mode::Browse;
    }

    /// Every edit reapplies the filter so the tree narrows live.
    fn apply_filter_entry(&mut self) {
        let pattern = self.filter_entry.input.clone();
        self.tree.set_filter(&pattern);
    }

    /// Insert a character at the cursor.
    pub fn filter_input_char(&mut self, c: char) {
        self.filter_entry.input.insert(self.filter_entry.cursor, c);
        self.filter_entry.cursor += c.len_utf8();
        self.apply_filter_entry();
    }

    /// Delete the character before the cursor (backspace).
    pub fn filter_delete_char(&mut self) {
        if self.filter_entry.cursor > 0 {
            let prev_char = self.filter_entry.input[..self.filter_entry.cursor]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.filter_entry.cursor -= prev_char.len_utf8();
            self.filter_entry.input.remove(self.filter_entry.cursor);
            self.apply_filter_entry();
        }
    }

    /// Move cursor left by one character.
    pub fn filter_move_cursor_left(&mut self) {
        if self.filter_entry.cursor > 0 {
            let prev_char = self.filter_entry.input[..self.filter_entry.cursor]
                .chars()
                .next_back()
                .expect("cursor > 0 guarantees at least one char");
            self.filter_entry.cursor -= prev_char.len_utf8();
        }
    }

    /// Move cursor right by one character.
    pub fn filter_move_cursor_right(&mut self) {
        if self.filter_entry.cursor < self.filter_entry.input.len() {
            let next_char = self.filter_entry.input[self.filter_entry.cursor..]
                .chars()
                .next()
                .expect("cursor < len guarantees at least one char");
            self.filter_entry.cursor += next_char.len_utf8();
        }
    }

    /// Move cursor to the beginning of the input.
    pub fn filter_cursor_home(&mut self) {
        self.filter_entry.cursor = 0;
    }

    /// Move cursor to the end of the input.
    pub fn filter_cursor_end(&mut self) {
        self.filter_entry.cursor = self.filter_entry.input.len();
    }

    // ── Mouse ────────────────────────────────────────────────────────────────

    /// Select the clicked row; returns `true` on a double click.
    pub fn click_row(&mut self, row: usize) -> bool {
        if row >= self.tree.rows.len() {
            return false;
        }
        self.tree.selected_index = row;
        let now = Instant::now();
        let double = matches!(
            self.last_click,
            Some((idx, at)) if idx == row && now.duration_since(at) < DOUBLE_CLICK_WINDOW
        );
        self.last_click = if double { None } else { Some((row, now)) };
        double
    }

    // ── Status messages ──────────────────────────────────────────────────────

    /// Set an informational status message.
    pub fn set_status(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    /// Set an error status message.
    pub fn set_error(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(msg) = &self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }
}
