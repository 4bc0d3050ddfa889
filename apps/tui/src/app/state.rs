use neighborhood_map_core::map::MarkerLayer;
use neighborhood_map_core::{CategoryFilter, Controller, Language, LocationId};
use std::time::{Duration, Instant};

/// Share of the visible span moved by one pan step.
const PAN_STEP: f64 = 0.1;
const ZOOM_STEP: f64 = 0.5;
pub const PAGE_STEP: usize = 5;

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Search,
    Map,
}

pub struct App {
    pub controller: Controller<MarkerLayer>,
    pub running: bool,
    pub focus: Focus,
    pub selected_index: usize,
    pub marker_cursor: Option<LocationId>,
    pub sidebar_collapsed: bool,
    pub show_help: bool,
    pub status_message: String,
    pub last_updated: String,
    started: Instant,
}

impl App {
    pub fn new(controller: Controller<MarkerLayer>) -> Self {
        Self {
            controller,
            running: true,
            focus: Focus::Sidebar,
            selected_index: 0,
            marker_cursor: None,
            sidebar_collapsed: false,
            show_help: false,
            status_message: String::new(),
            last_updated: chrono::Local::now().format("%Y-%m-%d").to_string(),
            started: Instant::now(),
        }
    }

    /// Time since startup; the only clock the core sees.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Called once per frame.
    pub fn update(&mut self) {
        let now = self.elapsed();
        if self.controller.tick(now) {
            self.selected_index = 0;
        }
        self.clamp_selection();
        if self
            .marker_cursor
            .is_some_and(|id| !self.is_marker_visible(id))
        {
            self.marker_cursor = None;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.controller.sidebar().item_count();
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    pub fn item_count(&self) -> usize {
        self.controller.sidebar().item_count()
    }

    pub fn selected_location(&self) -> Option<LocationId> {
        self.controller
            .sidebar()
            .item(self.selected_index)
            .map(|item| item.id)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.item_count();
        if count == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = self
            .selected_index
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.item_count().saturating_sub(1);
    }

    /// Sidebar Enter: fly to the location and open its popup.
    pub fn activate_selection(&mut self) {
        let Some(id) = self.selected_location() else {
            return;
        };
        let now = self.elapsed();
        match self.controller.on_item_selected(id, now) {
            Ok(()) => {
                self.marker_cursor = Some(id);
                self.status_message = self.location_name(id);
            }
            Err(e) => {
                tracing::warn!(error = %e, "sidebar selection failed");
                self.status_message = format!("Error: {e}");
            }
        }
    }

    fn location_name(&self, id: LocationId) -> String {
        self.controller
            .catalog()
            .get(id)
            .map(|record| record.name(self.controller.language()).to_string())
            .unwrap_or_default()
    }

    fn is_marker_visible(&self, id: LocationId) -> bool {
        let layer = self.controller.map();
        self.controller
            .sync()
            .marker_for(id)
            .and_then(|marker| layer.marker(marker))
            .is_some_and(|marker| marker.visible)
    }

    /// Locations whose markers are currently shown, in catalog order.
    pub fn visible_marker_locations(&self) -> Vec<LocationId> {
        let layer = self.controller.map();
        self.controller
            .sync()
            .bindings()
            .iter()
            .filter(|binding| {
                layer
                    .marker(binding.marker)
                    .is_some_and(|marker| marker.visible)
            })
            .map(|binding| binding.location)
            .collect()
    }

    /// Moves the map cursor to the next visible marker and selects it the
    /// way a click on the marker would.
    pub fn cycle_marker(&mut self, forward: bool) {
        let visible = self.visible_marker_locations();
        if visible.is_empty() {
            self.marker_cursor = None;
            return;
        }

        let current = self
            .marker_cursor
            .and_then(|id| visible.iter().position(|candidate| *candidate == id));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => visible.len() - 1,
            (Some(index), true) => (index + 1) % visible.len(),
            (Some(index), false) => (index + visible.len() - 1) % visible.len(),
        };
        let id = visible[index];
        self.marker_cursor = Some(id);

        let now = self.elapsed();
        if let Err(e) = self.controller.on_marker_selected(id, now) {
            tracing::warn!(error = %e, "marker selection failed");
        }
        if let Some(position) = self.controller.sidebar().position_of(id) {
            self.selected_index = position;
        }
        self.status_message = self.location_name(id);
    }

    pub fn pan(&mut self, east: f64, north: f64) {
        self.controller
            .map_mut()
            .pan(east * PAN_STEP, north * PAN_STEP);
    }

    pub fn zoom(&mut self, steps: f64) {
        self.controller.map_mut().zoom_by(steps * ZOOM_STEP);
    }

    pub fn set_language(&mut self, language: Language) {
        if self.controller.on_language_selected(language) {
            self.status_message = language.native_name().to_string();
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.controller.language().toggle());
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let current = self.controller.state().category_filter();
        let next = if forward {
            current.next()
        } else {
            current.prev()
        };
        self.set_category(next);
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        if self.controller.on_category_changed(filter) {
            self.selected_index = 0;
            self.status_message = filter.label(self.controller.strings()).to_string();
        }
    }

    pub fn push_search_char(&mut self, ch: char) {
        let mut text = self.controller.search_input().to_string();
        text.push(ch);
        let now = self.elapsed();
        self.controller.on_search_input(text, now);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.controller.search_input().to_string();
        if text.pop().is_some() {
            let now = self.elapsed();
            self.controller.on_search_input(text, now);
        }
    }

    pub fn clear_search(&mut self) {
        let now = self.elapsed();
        self.controller.on_search_input(String::new(), now);
        if self.controller.flush_search() {
            self.selected_index = 0;
        }
    }

    pub fn commit_search(&mut self) {
        if self.controller.flush_search() {
            self.selected_index = 0;
        }
    }

    pub fn close_popup(&mut self) -> bool {
        let open = self.controller.map().open_marker().is_some();
        self.controller.map_mut().close_popup();
        open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        if self.sidebar_collapsed && self.focus == Focus::Sidebar {
            self.focus = Focus::Map;
        }
    }

    pub fn open_marker_location(&self) -> Option<LocationId> {
        self.controller
            .map()
            .open_popup_content()
            .map(|popup| popup.location)
    }

    pub fn now(&self) -> Duration {
        self.controller.map().now()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use neighborhood_map_core::{Catalog, Category, ControllerOptions};

    pub(crate) fn app() -> App {
        let controller = Controller::new(
            Catalog::embedded().expect("embedded catalog"),
            MarkerLayer::default(),
            ControllerOptions::default(),
        );
        App::new(controller)
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();
        app.move_selection(-3);
        assert_eq!(app.selected_index, 0);
        app.move_selection(100);
        assert_eq!(app.selected_index, 14);

        app.set_category(CategoryFilter::Only(Category::Sport));
        assert_eq!(app.selected_index, 0);
        app.select_last();
        assert_eq!(app.selected_location(), Some(9));
    }

    #[test]
    fn activating_opens_the_popup() {
        let mut app = app();
        app.set_category(CategoryFilter::Only(Category::Abandoned));
        app.activate_selection();

        assert_eq!(app.open_marker_location(), Some(5));
        assert!(app.controller.is_highlighted(5));
        assert_eq!(app.status_message, "Tripoli Train Station");
        assert!(app.close_popup());
        assert!(!app.close_popup());
    }

    #[test]
    fn marker_cycle_only_visits_visible_markers() {
        let mut app = app();
        app.set_category(CategoryFilter::Only(Category::Telecom));
        app.cycle_marker(true);
        assert_eq!(app.marker_cursor, Some(2));
        app.cycle_marker(true);
        assert_eq!(app.marker_cursor, Some(3));
        assert_eq!(app.selected_index, 1);
        app.cycle_marker(true);
        assert_eq!(app.marker_cursor, Some(2));
        app.cycle_marker(false);
        assert_eq!(app.marker_cursor, Some(3));
        assert_eq!(app.open_marker_location(), Some(3));
    }

    #[test]
    fn filtered_away_cursor_is_dropped() {
        let mut app = app();
        app.cycle_marker(true);
        assert_eq!(app.marker_cursor, Some(1));
        app.set_category(CategoryFilter::Only(Category::Health));
        app.update();
        assert_eq!(app.marker_cursor, None);
    }

    #[test]
    fn search_edits_apply_on_commit() {
        let mut app = app();
        for ch in "gym".chars() {
            app.push_search_char(ch);
        }
        assert_eq!(app.controller.search_input(), "gym");
        app.commit_search();
        assert_eq!(app.controller.state().search_text(), "gym");
        assert_eq!(app.item_count(), 1);

        app.pop_search_char();
        assert_eq!(app.controller.search_input(), "gy");
        app.clear_search();
        assert_eq!(app.controller.state().search_text(), "");
        assert_eq!(app.item_count(), 15);
    }

    #[test]
    fn language_toggle_round_trips() {
        let mut app = app();
        app.toggle_language();
        assert_eq!(app.controller.language(), Language::Ar);
        assert_eq!(app.status_message, "العربية");
        app.toggle_language();
        assert_eq!(app.controller.language(), Language::En);
    }

    #[test]
    fn collapsing_sidebar_moves_focus_to_map() {
        let mut app = app();
        app.toggle_sidebar();
        assert!(app.sidebar_collapsed);
        assert_eq!(app.focus, Focus::Map);
    }
}
