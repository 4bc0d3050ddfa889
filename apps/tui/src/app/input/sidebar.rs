use crate::app::state::{App, PAGE_STEP};
use crossterm::event::KeyCode;

#[allow(clippy::cast_possible_wrap)]
pub fn handle_sidebar_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_STEP as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_STEP as isize),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.activate_selection(),
        KeyCode::Right => app.cycle_category(true),
        KeyCode::Left => app.cycle_category(false),
        _ => {}
    }
}
