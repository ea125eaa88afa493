use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_char(c);
        }
        KeyCode::Backspace => app.search_input_backspace(),
        KeyCode::Enter => app.navigate_to(View::Entries),
        KeyCode::Esc => {
            app.search_input_clear();
            app.navigate_to(View::Entries);
        }
        _ => {}
    }
}
