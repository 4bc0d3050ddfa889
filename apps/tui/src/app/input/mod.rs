mod help;
mod map;
mod search;
mod sidebar;

use crate::app::state::{App, Focus};
use crossterm::event::KeyCode;
use neighborhood_map_core::Language;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.focus {
        Focus::Search => search::handle_search_input(app, key),
        Focus::Sidebar => {
            if !handle_shared_input(app, key) {
                sidebar::handle_sidebar_input(app, key);
            }
        }
        Focus::Map => {
            if !handle_shared_input(app, key) {
                map::handle_map_input(app, key);
            }
        }
    }
}

/// Keys that behave the same in the sidebar and on the map.
fn handle_shared_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('l') => app.toggle_language(),
        KeyCode::Char('e') => app.set_language(Language::En),
        KeyCode::Char('a') => app.set_language(Language::Ar),
        KeyCode::Char('s') => app.toggle_sidebar(),
        KeyCode::Char(']') => app.cycle_category(true),
        KeyCode::Char('[') => app.cycle_category(false),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Map if !app.sidebar_collapsed => Focus::Sidebar,
                _ => Focus::Map,
            };
        }
        KeyCode::Esc => {
            app.close_popup();
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::app;
    use neighborhood_map_core::{Category, CategoryFilter};

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            handle_input(app, *key);
        }
    }

    #[test]
    fn slash_focuses_search_and_typing_edits_it() {
        let mut app = app();
        press(
            &mut app,
            &[
                KeyCode::Char('/'),
                KeyCode::Char('q'),
                KeyCode::Char('l'),
                KeyCode::Backspace,
            ],
        );

        assert!(app.running, "q types into the search field");
        assert_eq!(app.controller.language(), Language::En);
        assert_eq!(app.controller.search_input(), "q");

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.focus, Focus::Sidebar);
        assert_eq!(app.controller.state().search_text(), "q");
    }

    #[test]
    fn escape_in_search_clears_it() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('z'), KeyCode::Esc]);
        assert_eq!(app.focus, Focus::Sidebar);
        assert_eq!(app.controller.search_input(), "");
        assert_eq!(app.item_count(), 15);
    }

    #[test]
    fn arrows_cycle_categories_in_the_sidebar() {
        let mut app = app();
        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(
            app.controller.state().category_filter(),
            CategoryFilter::Only(Category::Telecom)
        );
        press(&mut app, &[KeyCode::Left, KeyCode::Left]);
        assert_eq!(app.controller.state().category_filter(), CategoryFilter::All);
    }

    #[test]
    fn enter_selects_and_escape_closes() {
        let mut app = app();
        press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.open_marker_location(), Some(3));
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.open_marker_location(), None);
    }

    #[test]
    fn map_focus_pans_and_cycles_markers() {
        let mut app = app();
        let before = app.controller.map().viewport();
        press(&mut app, &[KeyCode::Tab, KeyCode::Right, KeyCode::Char('+')]);
        assert_eq!(app.focus, Focus::Map);

        let after = app.controller.map().viewport();
        assert!(after.center.lon > before.center.lon);
        assert!(after.zoom > before.zoom);

        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.marker_cursor, Some(1));
        assert_eq!(app.open_marker_location(), Some(1));
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        press(&mut app, &[KeyCode::F(1), KeyCode::Char('q')]);
        assert!(app.show_help);
        assert!(app.running);
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]);
        assert!(!app.show_help);
        assert!(!app.running);
    }

    #[test]
    fn language_keys_switch_bundle() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('a')]);
        assert_eq!(app.controller.language(), Language::Ar);
        press(&mut app, &[KeyCode::Char('e')]);
        assert_eq!(app.controller.language(), Language::En);
    }
}
