//! Core of the neighborhood map: the location catalog, the localization
//! bundles, the view state, the filter/search engine and the presentation
//! sync that keeps the map markers and the sidebar list in agreement.
//!
//! Nothing in here touches a terminal or a browser. Frontends own a
//! [`Controller`], feed it UI events plus the elapsed time, and draw from the
//! [`SidebarView`] and the [`MarkerLayer`] it exposes.

pub mod catalog;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod i18n;
pub mod map;
pub mod popup;
pub mod sidebar;
pub mod state;
pub mod sync;

pub use catalog::{Catalog, CatalogError, Category, Coordinates, LocationId, LocationRecord};
pub use controller::{Controller, ControllerOptions};
pub use i18n::{translate, Language, TextDirection, UiStrings};
pub use map::{MapProvider, MarkerLayer};
pub use sidebar::SidebarView;
pub use state::{CategoryFilter, ViewState};
pub use sync::{PresentationSync, SyncError, SyncOptions};
