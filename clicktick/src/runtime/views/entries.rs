use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_entries_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('t') | KeyCode::Char(' ') => enqueue_action(action_tx, Action::Toggle),
        KeyCode::Enter => enqueue_action(action_tx, Action::StartSelected),
        KeyCode::Char('s') => enqueue_action(action_tx, Action::Stop),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::Refresh),
        KeyCode::Char('d') | KeyCode::Delete => app.enter_delete_confirm(),
        KeyCode::Char('h') => app.toggle_hide_duplicates(),
        KeyCode::Char('/') => app.navigate_to(View::Search),
        KeyCode::Esc => {
            if app.search_input.value.is_empty() {
                app.clear_status();
            } else {
                app.search_input_clear();
            }
        }
        _ => {}
    }
}
