use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Mode};

/// Handle a key event, dispatching on the current mode.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Browse => handle_browse_key(app, key),
        Mode::FilterEntry => handle_filter_key(app, key),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Right | KeyCode::Char('l') => app.expand_selected(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse_selected(),
        KeyCode::Backspace | KeyCode::Char('u') => app.navigate_up(),
        KeyCode::Char(' ') => app.tree.toggle_multi_select(),
        KeyCode::Esc => app.tree.clear_multi_select(),
        KeyCode::Char('o') => app.open_selection(false),
        KeyCode::Char('s') => app.open_selection(true),
        KeyCode::Char('/') => app.begin_filter_entry(),
        KeyCode::Char('.') => app.toggle_hidden(),
        KeyCode::Char('p') => app.toggle_policy(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_filter_entry(),
        KeyCode::Enter => app.accept_filter_entry(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.cancel_filter_entry()
        }
        KeyCode::Backspace => app.filter_delete_char(),
        KeyCode::Left => app.filter_move_cursor_left(),
        KeyCode::Right => app.filter_move_cursor_right(),
        KeyCode::Home => app.filter_cursor_home(),
        KeyCode::End => app.filter_cursor_end(),
        KeyCode::Char(c) => app.filter_input_char(c),
        _ => {}
    }
}

/// Handle a mouse event.
///
/// The tree pane starts at frame row 0 with a border, so visible row 0 sits
/// at terminal row 1; `App::tree_view_height` bounds the clickable area.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Browse {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(visual_row) = (mouse.row as usize).checked_sub(1) else {
                return;
            };
            if visual_row >= app.tree_view_height {
                return;
            }
            let row = app.tree.scroll_offset + visual_row;
            if app.click_row(row) {
                // Double click mirrors Enter: descend into a directory,
                // open a file.
                app.activate_selected();
            }
        }
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_previous(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::tree::FolderTree;
    use std::fs::File;
    use tempfile::TempDir;

    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        let tree = FolderTree::new(dir.path()).unwrap();
        let mut app = App::new(tree, None);
        app.tree_view_height = 20;
        (dir, app)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_in_browse_mode() {
        let (_dir, mut app) = setup_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn arrows_move_selection() {
        let (_dir, mut app) = setup_app();
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.tree.selected_index, 1);
        handle_key_event(&mut app, key(KeyCode::Up));
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn slash_enters_filter_mode_and_chars_are_typed() {
        let (_dir, mut app) = setup_app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, Mode::FilterEntry);
        // 'q' must edit the pattern now, not quit.
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.tree.filter().pattern(), "q");
    }

    #[test]
    fn enter_accepts_filter_entry() {
        let (_dir, mut app) = setup_app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        handle_key_event(&mut app, key(KeyCode::Char('p')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.tree.filter().pattern(), "p");
    }

    #[test]
    fn space_toggles_multi_select() {
        let (_dir, mut app) = setup_app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert!(app.tree.multi_selected.contains(&1));
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.tree.multi_selected.is_empty());
    }

    #[test]
    fn click_outside_tree_area_is_ignored() {
        let (_dir, mut app) = setup_app();
        app.tree_view_height = 2;
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, mouse);
        assert_eq!(app.tree.selected_index, 0);
    }

    #[test]
    fn click_selects_row() {
        let (_dir, mut app) = setup_app();
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 2, // border at 0, row 0 at 1, row 1 at 2
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, mouse);
        assert_eq!(app.tree.selected_index, 1);
    }

    #[test]
    fn scroll_wheel_moves_selection() {
        let (_dir, mut app) = setup_app();
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, mouse);
        assert_eq!(app.tree.selected_index, 1);
    }
}
