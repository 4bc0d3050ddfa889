use std::time::Duration;

use crate::catalog::{Catalog, LocationId, LocationRecord};
use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::filter::{filter_locations, group_by_category, CategoryGroup};
use crate::i18n::{Language, TextDirection, UiStrings};
use crate::map::MapProvider;
use crate::popup::AssetResolver;
use crate::sidebar::SidebarView;
use crate::state::{CategoryFilter, ViewState};
use crate::sync::{PresentationSync, SyncError, SyncOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub initial: ViewState,
    pub search_debounce: Duration,
    pub sync: SyncOptions,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial: ViewState::new(),
            search_debounce: SEARCH_DEBOUNCE,
            sync: SyncOptions::default(),
        }
    }
}

/// Owns the view state and keeps both views in step with it.
///
/// Frontends call one handler per UI event and [`Controller::tick`] on every
/// frame with the time elapsed since they started.
pub struct Controller<M: MapProvider> {
    catalog: Catalog,
    state: ViewState,
    search_input: String,
    sync: PresentationSync<M>,
    debouncer: Debouncer,
}

impl<M: MapProvider> Controller<M> {
    pub fn new(catalog: Catalog, map: M, options: ControllerOptions) -> Self {
        let sync = PresentationSync::new(map, &catalog, options.sync);
        Self::assemble(catalog, sync, options)
    }

    /// Like [`Controller::new`], resolving popup images through `assets`.
    pub fn with_assets(
        catalog: Catalog,
        map: M,
        options: ControllerOptions,
        assets: Box<dyn AssetResolver>,
    ) -> Self {
        let sync = PresentationSync::new(map, &catalog, options.sync).with_assets(assets);
        Self::assemble(catalog, sync, options)
    }

    fn assemble(catalog: Catalog, sync: PresentationSync<M>, options: ControllerOptions) -> Self {
        let mut controller = Self {
            search_input: options.initial.search_text().to_string(),
            catalog,
            state: options.initial,
            sync,
            debouncer: Debouncer::new(options.search_debounce),
        };
        controller.render();
        tracing::info!(
            locations = controller.catalog.len(),
            language = controller.state.language().code(),
            "controller ready"
        );
        controller
    }

    fn render(&mut self) {
        self.sync.render(&self.catalog, &self.state);
    }

    pub fn on_language_selected(&mut self, language: Language) -> bool {
        let searched = self.take_pending_search();
        if self.state.set_language(language) {
            tracing::info!(language = language.code(), "language changed");
        } else if !searched {
            return false;
        }
        self.render();
        true
    }

    /// Language picked by code; unsupported codes fall back to English.
    pub fn on_language_code(&mut self, code: &str) -> bool {
        self.on_language_selected(Language::from_code_or_default(code))
    }

    pub fn on_category_changed(&mut self, filter: CategoryFilter) -> bool {
        let searched = self.take_pending_search();
        if self.state.set_category_filter(filter) {
            tracing::info!(filter = filter.as_str(), "category filter changed");
        } else if !searched {
            return false;
        }
        self.render();
        true
    }

    /// Updates the visible search field now; filtering waits for the
    /// debounce window to pass.
    pub fn on_search_input(&mut self, text: impl Into<String>, now: Duration) {
        self.search_input = text.into();
        self.debouncer.trigger(now);
    }

    /// Applies the pending search text right away, if any.
    pub fn flush_search(&mut self) -> bool {
        let searched = self.take_pending_search();
        if searched {
            self.render();
        }
        searched
    }

    /// Moves a pending search into the state without rendering.
    fn take_pending_search(&mut self) -> bool {
        self.debouncer.cancel() && self.store_search()
    }

    fn store_search(&mut self) -> bool {
        if !self.state.set_search_text(self.search_input.clone()) {
            return false;
        }
        tracing::debug!(search = self.state.search_text(), "search applied");
        true
    }

    pub fn on_item_selected(&mut self, id: LocationId, now: Duration) -> Result<(), SyncError> {
        self.sync.select(&self.catalog, id, now)
    }

    pub fn on_marker_selected(&mut self, id: LocationId, now: Duration) -> Result<(), SyncError> {
        self.sync.select_marker(id, now)
    }

    /// Advances animations and fires a due search. Returns whether the views
    /// were re-rendered.
    pub fn tick(&mut self, now: Duration) -> bool {
        let rendered = self.debouncer.poll(now) && self.store_search();
        if rendered {
            self.render();
        }
        self.sync.tick(now);
        rendered
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn language(&self) -> Language {
        self.state.language()
    }

    pub const fn strings(&self) -> &'static UiStrings {
        self.state.strings()
    }

    pub const fn direction(&self) -> TextDirection {
        self.state.language().direction()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub const fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn sidebar(&self) -> &SidebarView {
        self.sync.sidebar()
    }

    pub fn is_highlighted(&self, id: LocationId) -> bool {
        self.sync.is_highlighted(id)
    }

    pub const fn sync(&self) -> &PresentationSync<M> {
        &self.sync
    }

    pub const fn map(&self) -> &M {
        self.sync.map()
    }

    pub fn map_mut(&mut self) -> &mut M {
        self.sync.map_mut()
    }

    /// The records currently admitted by the applied state.
    pub fn filtered(&self) -> Vec<&LocationRecord> {
        filter_locations(&self.catalog, &self.state)
    }

    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.filtered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Coordinates};
    use crate::map::{MarkerIcon, MarkerId, MarkerLayer, Viewport, ZoomLevel};
    use crate::popup::Popup;
    use crate::sync::{HIGHLIGHT_DURATION, SELECT_ZOOM};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn controller() -> Controller<MarkerLayer> {
        Controller::new(
            Catalog::embedded().expect("embedded catalog"),
            MarkerLayer::default(),
            ControllerOptions::default(),
        )
    }

    fn listed(controller: &Controller<MarkerLayer>) -> Vec<LocationId> {
        controller.sidebar().items().map(|item| item.id).collect()
    }

    #[test]
    fn first_render_happens_on_construction() {
        let controller = controller();
        assert!(!controller.sidebar().is_pending());
        assert_eq!(controller.sidebar().item_count(), 15);
        assert_eq!(controller.map().len(), 15);
    }

    #[test]
    fn search_waits_for_the_debounce_window() {
        let mut controller = controller();
        controller.on_search_input("c", ms(0));
        controller.on_search_input("co", ms(100));
        controller.on_search_input("coffee", ms(200));

        assert_eq!(controller.search_input(), "coffee");
        assert_eq!(controller.state().search_text(), "");
        assert!(!controller.tick(ms(499)));
        assert_eq!(controller.sidebar().item_count(), 15);

        assert!(controller.tick(ms(500)));
        assert_eq!(listed(&controller), [10, 12]);
        assert!(!controller.tick(ms(900)));
    }

    #[test]
    fn category_change_flushes_pending_search() {
        let mut controller = controller();
        controller.on_search_input("hospital", ms(0));
        assert!(controller.on_category_changed(CategoryFilter::Only(Category::Health)));
        assert_eq!(controller.state().search_text(), "hospital");
        assert!(!controller.is_search_pending());
        assert_eq!(listed(&controller), [14, 15]);
    }

    #[test]
    fn sport_filter_shows_one_group() {
        let mut controller = controller();
        controller.on_category_changed(CategoryFilter::Only(Category::Sport));

        let groups = controller.sidebar().groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, Category::Sport);
        assert_eq!(listed(&controller), [7, 8, 9]);

        let visible: Vec<_> = controller
            .map()
            .visible_markers()
            .map(|(_, marker)| marker.icon.category)
            .collect();
        assert_eq!(visible, [Category::Sport; 3]);
    }

    #[test]
    fn unchanged_selection_does_not_rerender() {
        let mut controller = controller();
        assert!(!controller.on_category_changed(CategoryFilter::All));
        assert!(!controller.on_language_selected(Language::En));
    }

    #[test]
    fn unsupported_language_code_falls_back_to_english() {
        let mut controller = controller();
        controller.on_language_code("ar");
        assert_eq!(controller.direction(), TextDirection::Rtl);
        controller.on_language_code("fr");
        assert_eq!(controller.language(), Language::En);
        assert_eq!(controller.strings().title, "Welcome to My Neighborhood in Tripoli");
    }

    #[test]
    fn arabic_switch_relabels_everything() {
        let mut controller = controller();
        controller.on_search_input("مقهى", ms(0));
        controller.on_language_selected(Language::Ar);

        assert_eq!(listed(&controller), [10, 11, 12]);
        assert_eq!(controller.sidebar().groups()[0].heading, "مقاهي");
        assert!(controller
            .map()
            .markers()
            .filter_map(|(_, marker)| marker.popup.as_ref())
            .all(|popup| popup.language == Language::Ar));
    }

    #[test]
    fn selecting_train_station_flies_and_highlights() {
        let mut controller = controller();
        let now = Duration::from_secs(3);
        controller.on_item_selected(5, now).expect("select");

        let station = controller.catalog().get(5).expect("station").coordinates;
        let open = controller.map().open_popup_content().expect("popup open");
        assert_eq!(open.location, 5);
        assert_eq!(open.title, "Tripoli Train Station");
        assert!(controller.is_highlighted(5));

        controller.tick(now + ms(600));
        assert_eq!(
            controller.map().viewport(),
            Viewport {
                center: station,
                zoom: f64::from(SELECT_ZOOM),
            }
        );
        assert!(controller.is_highlighted(5));

        controller.tick(now + HIGHLIGHT_DURATION);
        assert!(!controller.is_highlighted(5));
    }

    #[test]
    fn marker_selection_opens_popup_and_bounces() {
        let mut controller = controller();
        controller.on_marker_selected(8, ms(0)).expect("select marker");

        let layer = controller.map();
        let open = layer.open_marker().expect("open marker");
        let marker = layer.marker(open).expect("marker");
        assert!(marker.is_bouncing(layer.now()));
        assert_eq!(layer.open_popup_content().map(|popup| popup.location), Some(8));
    }

    #[test]
    fn unknown_selection_is_reported() {
        let mut controller = controller();
        assert_eq!(
            controller.on_item_selected(404, ms(0)),
            Err(SyncError::UnknownLocation(404))
        );
    }

    #[test]
    fn initial_state_is_respected() {
        let mut initial = ViewState::new();
        initial.set_language(Language::Ar);
        initial.set_category_filter(CategoryFilter::Only(Category::Company));
        let controller = Controller::new(
            Catalog::embedded().expect("embedded catalog"),
            MarkerLayer::default(),
            ControllerOptions {
                initial,
                ..ControllerOptions::default()
            },
        );

        let empty = Language::Ar.strings().no_results;
        assert!(matches!(
            controller.sidebar(),
            SidebarView::NoResults { message } if message == empty
        ));
        assert_eq!(controller.map().visible_markers().count(), 0);
        assert!(controller.groups().is_empty());
    }

    /// Marker layer that counts full renders by their visibility passes.
    #[derive(Default)]
    struct CountingMap {
        layer: MarkerLayer,
        visibility_calls: usize,
    }

    impl CountingMap {
        fn renders(&self) -> usize {
            self.visibility_calls / self.layer.len()
        }
    }

    impl MapProvider for CountingMap {
        type Marker = MarkerId;

        fn create_marker(&mut self, coordinates: Coordinates, icon: MarkerIcon) -> MarkerId {
            self.layer.create_marker(coordinates, icon)
        }

        fn bind_popup(&mut self, marker: MarkerId, popup: Popup) {
            self.layer.bind_popup(marker, popup);
        }

        fn open_popup(&mut self, marker: MarkerId) {
            self.layer.open_popup(marker);
        }

        fn fly_to(&mut self, coordinates: Coordinates, zoom: ZoomLevel, duration: Duration) {
            self.layer.fly_to(coordinates, zoom, duration);
        }

        fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
            self.visibility_calls += 1;
            self.layer.set_marker_visible(marker, visible);
        }

        fn bounce_marker(&mut self, marker: MarkerId, duration: Duration) {
            self.layer.bounce_marker(marker, duration);
        }
    }

    fn counting_controller() -> Controller<CountingMap> {
        Controller::new(
            Catalog::embedded().expect("embedded catalog"),
            CountingMap::default(),
            ControllerOptions::default(),
        )
    }

    #[test]
    fn language_switch_with_pending_search_renders_once() {
        let mut controller = counting_controller();
        assert_eq!(controller.map().renders(), 1);

        controller.on_search_input("hospital", ms(0));
        assert!(controller.on_language_selected(Language::Ar));
        assert_eq!(controller.map().renders(), 2);
        assert_eq!(controller.state().search_text(), "hospital");
        let empty = Language::Ar.strings().no_results;
        assert!(matches!(
            controller.sidebar(),
            SidebarView::NoResults { message } if message == empty
        ));
    }

    #[test]
    fn category_change_with_pending_search_renders_once() {
        let mut controller = counting_controller();
        controller.on_search_input("hospital", ms(0));
        assert!(controller.on_category_changed(CategoryFilter::Only(Category::Health)));
        assert_eq!(controller.map().renders(), 2);
        assert_eq!(
            controller.sidebar().items().map(|item| item.id).collect::<Vec<_>>(),
            [14, 15]
        );
    }

    #[test]
    fn pending_search_alone_still_renders_on_unchanged_language() {
        let mut controller = counting_controller();
        controller.on_search_input("coffee", ms(0));
        assert!(controller.on_language_selected(Language::En));
        assert_eq!(controller.map().renders(), 2);
        assert!(!controller.on_language_selected(Language::En));
        assert_eq!(controller.map().renders(), 2);
    }

    #[test]
    fn filtered_out_item_is_not_selected() {
        let mut controller = controller();
        controller.on_category_changed(CategoryFilter::Only(Category::Health));
        let before = controller.map().viewport();

        assert_eq!(
            controller.on_item_selected(5, ms(1_000)),
            Err(SyncError::NotVisible(5))
        );
        controller.tick(ms(2_000));
        assert!(!controller.is_highlighted(5));
        assert_eq!(controller.map().open_marker(), None);
        assert_eq!(controller.map().viewport(), before);
    }
}
