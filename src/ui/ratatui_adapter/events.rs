//! Event handling for the gallery
//!
//! Handles keyboard and mouse events. Pure state changes (moving the cursor,
//! stepping the modal, editing the search text) happen here; anything that
//! needs the network, the library or the OS comes back as an [`Action`] for
//! the app loop to carry out.

use super::state::{GalleryState, Mode};
use crate::api::FeedQuery;
use crate::history::MenuKey;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

/// Work the app loop has to do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state change already made
    None,
    /// Leave the gallery
    Quit,
    /// Replace the feed
    Search(FeedQuery),
    /// Ask for an album name for the image at this index
    PromptAlbum(usize),
    /// Save the image at `index` to `album`
    SaveToAlbum { album: String, index: usize },
    /// Flip the favorite mark on the image at this index
    ToggleFavorite(usize),
    /// Open the full-size image in the system viewer
    OpenDownload(usize),
}

/// Dispatch one terminal event
pub fn handle_event(state: &mut GalleryState, event: &Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, *key),
        Event::Mouse(mouse) => handle_mouse(state, *mouse),
        _ => Action::None,
    }
}

/// Dispatch a key press for the current mode
pub fn handle_key(state: &mut GalleryState, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match state.mode {
        Mode::Search => handle_search_mode(state, key),
        Mode::AlbumPrompt => handle_album_prompt(state, key),
        Mode::Browse if state.modal_state().is_open() => handle_modal(state, key),
        Mode::Browse => handle_grid(state, key),
    }
}

/// Keys shared by the grid and the modal
fn handle_common(state: &mut GalleryState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::ALT) {
        match key.code {
            KeyCode::Left => {
                state.history_back();
            }
            KeyCode::Right => {
                state.history_forward();
            }
            _ => {}
        }
        return Action::None;
    }

    let Some(index) = state.target_index() else {
        return match key.code {
            KeyCode::Char('/') => {
                state.begin_search();
                Action::None
            }
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    };

    match key.code {
        KeyCode::Char('s') => Action::PromptAlbum(index),
        KeyCode::Char('f') => Action::ToggleFavorite(index),
        KeyCode::Char('o') => Action::OpenDownload(index),
        KeyCode::Char('/') => {
            state.begin_search();
            Action::None
        }
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

fn handle_grid(state: &mut GalleryState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return handle_common(state, key);
    }
    let page = isize::try_from(state.visible_rows()).unwrap_or(1);
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(0, 1),
        KeyCode::PageUp => state.move_cursor(0, -page),
        KeyCode::PageDown => state.move_cursor(0, page),
        KeyCode::Home | KeyCode::Char('g') => state.jump_to_start(),
        KeyCode::End | KeyCode::Char('G') => state.jump_to_end(),
        KeyCode::Enter => {
            state.open_modal(state.cursor);
        }
        KeyCode::Tab => return Action::Search(state.cycle_orientation()),
        _ => return handle_common(state, key),
    }
    Action::None
}

fn handle_modal(state: &mut GalleryState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return handle_common(state, key);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            state.modal_prev();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.modal_next();
        }
        KeyCode::Esc => {
            state.close_modal();
        }
        KeyCode::Char('z') | KeyCode::Enter => {
            state.toggle_zoom();
        }
        _ => return handle_common(state, key),
    }
    Action::None
}

fn handle_search_mode(state: &mut GalleryState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => state.mode = Mode::Browse,
        KeyCode::Enter => return Action::Search(state.submit_search()),
        KeyCode::Up => {
            state.suggestion_key(MenuKey::Up);
        }
        KeyCode::Down => {
            state.suggestion_key(MenuKey::Down);
        }
        KeyCode::Backspace => state.query_backspace(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.query.clear();
            state.refresh_suggestions();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => state.query_push(c),
        _ => {}
    }
    Action::None
}

fn handle_album_prompt(state: &mut GalleryState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => state.cancel_album_prompt(),
        KeyCode::Enter => {
            if let Some((index, album)) = state.finish_album_prompt() {
                return Action::SaveToAlbum { album, index };
            }
        }
        KeyCode::Backspace => {
            if let Some(prompt) = state.album_prompt.as_mut() {
                prompt.input.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(prompt) = state.album_prompt.as_mut() {
                prompt.input.push(c);
            }
        }
        _ => {}
    }
    Action::None
}

/// Handle mouse input
///
/// With the modal open a click on the image toggles zoom, a click outside
/// the modal closes it, and pointer motion pans. Otherwise the wheel
/// scrolls the grid and a click opens the card under the pointer.
pub fn handle_mouse(state: &mut GalleryState, mouse: MouseEvent) -> Action {
    if state.mode != Mode::Browse {
        return Action::None;
    }
    let point = Position::new(mouse.column, mouse.row);

    if state.modal_state().is_open() {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if state.image_area.is_some_and(|area| area.contains(point)) {
                    state.toggle_zoom();
                    state.pan(mouse.column, mouse.row);
                } else if state.modal_area.is_some_and(|area| !area.contains(point)) {
                    state.close_modal();
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                state.pan(mouse.column, mouse.row);
            }
            MouseEventKind::ScrollUp => {
                state.modal_prev();
            }
            MouseEventKind::ScrollDown => {
                state.modal_next();
            }
            _ => {}
        }
        return Action::None;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll_by(-1),
        MouseEventKind::ScrollDown => state.scroll_by(1),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = state.card_at(mouse.column, mouse.row) {
                state.open_modal(index);
            }
        }
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImagePage;
    use crate::config::UiConfig;
    use crate::history::SearchHistory;
    use crate::testing::page_of;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn alt(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::ALT)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn gallery(count: usize) -> GalleryState {
        let ui = UiConfig {
            min_column_width: 20,
            scroll_threshold: 6,
            card_height: 6,
        };
        let history = SearchHistory::from_entries(["otters", "owls"]);
        let mut state = GalleryState::new(FeedQuery::curated(), &ui, history)
            .expect("valid ui config");
        state.set_viewport(60, 12);
        if count > 0 {
            let pending = state.poll_more().expect("first page requested");
            let page = ImagePage {
                has_more: true,
                ..page_of(count, 100, 1)
            };
            state.controller.complete(pending.ticket, Ok(page));
        }
        state
    }

    #[test]
    fn test_enter_opens_and_arrows_step() {
        let mut state = gallery(5);
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), Action::None);
        assert_eq!(state.modal_state().index(), Some(1));

        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.modal_state().index(), Some(2));
        handle_key(&mut state, key(KeyCode::Left));
        handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.modal_state().index(), Some(0));

        // prev disabled on the first image
        handle_key(&mut state, key(KeyCode::Left));
        assert_eq!(state.modal_state().index(), Some(0));

        handle_key(&mut state, key(KeyCode::Esc));
        assert!(!state.modal_state().is_open());
    }

    #[test]
    fn test_next_disabled_on_last_image() {
        let mut state = gallery(3);
        state.open_modal(2);
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.modal_state().index(), Some(2));
    }

    #[test]
    fn test_library_actions_target_modal_image() {
        let mut state = gallery(4);
        state.open_modal(3);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('f'))), Action::ToggleFavorite(3));
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('s'))), Action::PromptAlbum(3));
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('o'))), Action::OpenDownload(3));
    }

    #[test]
    fn test_library_actions_need_an_image() {
        let mut state = gallery(0);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('f'))), Action::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut state = gallery(1);
        state.begin_search();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c), Action::Quit);
    }

    #[test]
    fn test_search_typing_and_submit() {
        let mut state = gallery(2);
        handle_key(&mut state, key(KeyCode::Char('/')));
        assert_eq!(state.mode, Mode::Search);

        for c in "ow".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        // 'q' is text while searching
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(state.query, "owq");
        handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.suggestions(), vec!["owls"]);

        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            Action::Search(FeedQuery::search("owls"))
        );
        assert_eq!(state.mode, Mode::Browse);
    }

    #[test]
    fn test_escape_leaves_search() {
        let mut state = gallery(1);
        state.begin_search();
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.mode, Mode::Browse);
    }

    #[test]
    fn test_album_prompt_flow() {
        let mut state = gallery(2);
        state.begin_album_prompt(1, Vec::new());
        for c in "pets".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            Action::SaveToAlbum {
                album: "pets".into(),
                index: 1
            }
        );
    }

    #[test]
    fn test_alt_arrows_walk_history() {
        let mut state = gallery(3);
        state.open_modal(1);
        handle_key(&mut state, alt(KeyCode::Left));
        assert!(!state.modal_state().is_open());
        handle_key(&mut state, alt(KeyCode::Right));
        assert_eq!(state.modal_state().index(), Some(1));
    }

    #[test]
    fn test_tab_cycles_orientation() {
        let mut state = gallery(1);
        let action = handle_key(&mut state, key(KeyCode::Tab));
        assert!(matches!(action, Action::Search(FeedQuery::Curated { .. })));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut state = gallery(2);
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_event(&mut state, &Event::Key(release));
        assert!(!state.modal_state().is_open());
    }

    #[test]
    fn test_click_card_opens_modal() {
        let mut state = gallery(3);
        state.card_areas = vec![(Rect::new(0, 0, 20, 6), 0), (Rect::new(20, 0, 20, 6), 1)];
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 25, 3));
        assert_eq!(state.modal_state().index(), Some(1));
    }

    #[test]
    fn test_click_image_zooms_and_outside_closes() {
        let mut state = gallery(3);
        state.open_modal(0);
        state.modal_area = Some(Rect::new(5, 2, 50, 20));
        state.image_area = Some(Rect::new(10, 4, 40, 14));

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 30, 10));
        assert!(state.zoom().is_some_and(|z| z.is_zoomed()));

        handle_mouse(&mut state, mouse(MouseEventKind::Moved, 10, 4));
        let (dx, dy) = state.zoom().map(|z| z.translation()).unwrap_or_default();
        assert!(dx > 0.0 && dy > 0.0);

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(!state.modal_state().is_open());
    }

    #[test]
    fn test_wheel_scrolls_grid() {
        let mut state = gallery(24);
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 1, 1));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 1, 1));
        assert_eq!(state.scroll_row, 2);
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 1, 1));
        assert_eq!(state.scroll_row, 1);
    }
}
