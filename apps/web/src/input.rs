use std::time::Duration;

use neighborhood_map_core::{Controller, LocationId, MarkerLayer};
use ratzilla::event::KeyCode;

/// Everything the page keeps between frames once the catalog has loaded.
pub struct WebApp {
    pub controller: Controller<MarkerLayer>,
    pub selected: usize,
}

impl WebApp {
    pub const fn new(controller: Controller<MarkerLayer>) -> Self {
        Self {
            controller,
            selected: 0,
        }
    }

    pub fn selected_location(&self) -> Option<LocationId> {
        self.controller
            .sidebar()
            .item(self.selected)
            .map(|item| item.id)
    }

    /// Advances timers and keeps the selection inside the list.
    pub fn tick(&mut self, now: Duration) {
        if self.controller.tick(now) {
            self.selected = 0;
        }
        let count = self.controller.sidebar().item_count();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.controller.sidebar().item_count();
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(count - 1);
    }

    fn activate_selection(&mut self, now: Duration) {
        let Some(id) = self.selected_location() else {
            return;
        };
        if let Err(error) = self.controller.on_item_selected(id, now) {
            web_sys::console::error_1(&format!("Selection failed: {error}").into());
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        let current = self.controller.state().category_filter();
        let next = if forward { current.next() } else { current.prev() };
        if self.controller.on_category_changed(next) {
            self.selected = 0;
        }
    }

    fn edit_search(&mut self, edit: impl FnOnce(&mut String), now: Duration) {
        let mut text = self.controller.search_input().to_string();
        edit(&mut text);
        if text != self.controller.search_input() {
            self.controller.on_search_input(text, now);
        }
    }
}

/// Typing goes to the search box, so commands that would collide with text
/// live on arrows, Enter, Esc and Alt.
pub fn handle_key(app: &mut WebApp, code: KeyCode, alt: bool, now: Duration) {
    match code {
        KeyCode::Char('l') if alt => {
            let next = app.controller.language().toggle();
            app.controller.on_language_selected(next);
        }
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-5),
        KeyCode::PageDown => app.move_selection(5),
        KeyCode::Home => app.selected = 0,
        KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Enter => {
            if app.controller.flush_search() {
                app.selected = 0;
            }
            app.activate_selection(now);
        }
        KeyCode::Left => app.cycle_category(false),
        KeyCode::Right => app.cycle_category(true),
        KeyCode::Char(ch) if !alt => app.edit_search(|text| text.push(ch), now),
        KeyCode::Backspace => app.edit_search(
            |text| {
                text.pop();
            },
            now,
        ),
        KeyCode::Esc => {
            if app.controller.map().open_marker().is_some() {
                app.controller.map_mut().close_popup();
            } else {
                app.edit_search(String::clear, now);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighborhood_map_core::{Catalog, CategoryFilter, ControllerOptions, Language};

    fn app() -> WebApp {
        let catalog = Catalog::embedded().expect("embedded catalog");
        WebApp::new(Controller::new(
            catalog,
            MarkerLayer::default(),
            ControllerOptions::default(),
        ))
    }

    fn type_text(app: &mut WebApp, text: &str, now: Duration) {
        for ch in text.chars() {
            handle_key(app, KeyCode::Char(ch), false, now);
        }
    }

    #[test]
    fn alt_l_toggles_language_and_plain_l_searches() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('l'), true, Duration::ZERO);
        assert_eq!(app.controller.language(), Language::Ar);
        assert_eq!(app.controller.search_input(), "");

        handle_key(&mut app, KeyCode::Char('l'), false, Duration::ZERO);
        assert_eq!(app.controller.search_input(), "l");
    }

    #[test]
    fn typed_search_applies_after_the_pause() {
        let mut app = app();
        type_text(&mut app, "hospital", Duration::from_millis(100));
        assert!(app.controller.is_search_pending());

        app.tick(Duration::from_millis(200));
        assert_eq!(app.controller.sidebar().item_count(), 15);

        app.tick(Duration::from_millis(450));
        assert_eq!(app.controller.sidebar().item_count(), 2);
    }

    #[test]
    fn enter_applies_pending_search_before_selecting() {
        let mut app = app();
        app.selected = 9;
        type_text(&mut app, "hospital", Duration::ZERO);
        handle_key(&mut app, KeyCode::Enter, false, Duration::from_millis(10));

        assert_eq!(app.selected, 0);
        let first = app.selected_location().expect("first hospital");
        assert!(app.controller.is_highlighted(first));
        assert!(app.controller.map().open_marker().is_some());
    }

    #[test]
    fn esc_closes_popup_before_clearing_search() {
        let mut app = app();
        type_text(&mut app, "coffee", Duration::ZERO);
        app.controller.flush_search();
        handle_key(&mut app, KeyCode::Enter, false, Duration::ZERO);

        handle_key(&mut app, KeyCode::Esc, false, Duration::ZERO);
        assert!(app.controller.map().open_marker().is_none());
        assert_eq!(app.controller.search_input(), "coffee");

        handle_key(&mut app, KeyCode::Esc, false, Duration::ZERO);
        assert_eq!(app.controller.search_input(), "");
    }

    #[test]
    fn arrows_cycle_categories_and_reset_selection() {
        let mut app = app();
        app.selected = 4;
        handle_key(&mut app, KeyCode::Right, false, Duration::ZERO);
        assert_ne!(app.controller.state().category_filter(), CategoryFilter::All);
        assert_eq!(app.selected, 0);

        handle_key(&mut app, KeyCode::Left, false, Duration::ZERO);
        assert_eq!(app.controller.state().category_filter(), CategoryFilter::All);
    }

    #[test]
    fn selection_stays_inside_the_list() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Up, false, Duration::ZERO);
        assert_eq!(app.selected, 0);
        handle_key(&mut app, KeyCode::End, false, Duration::ZERO);
        assert_eq!(app.selected, 14);
        handle_key(&mut app, KeyCode::PageDown, false, Duration::ZERO);
        assert_eq!(app.selected, 14);
    }
}
