use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(ch) => app.push_search_char(ch),
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Enter | KeyCode::Down => {
            app.commit_search();
            app.focus = Focus::Sidebar;
        }
        KeyCode::Esc => {
            app.clear_search();
            app.focus = Focus::Sidebar;
        }
        _ => {}
    }
}
