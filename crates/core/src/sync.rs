//! Keeps the map markers and the sidebar list showing the same filtered,
//! localized data.

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::catalog::{Catalog, LocationId};
use crate::filter::{filter_locations, group_by_category};
use crate::i18n::Language;
use crate::map::{MapProvider, MarkerIcon, ZoomLevel};
use crate::popup::{AnyAsset, AssetResolver, Popup};
use crate::sidebar::SidebarView;
use crate::state::ViewState;

pub const SELECT_ZOOM: ZoomLevel = 17;
pub const FLY_DURATION: Duration = Duration::from_millis(500);
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);
pub const BOUNCE_DURATION: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("no location with id {0}")]
    UnknownLocation(LocationId),
    #[error("location {0} is filtered out of the list")]
    NotVisible(LocationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Hide markers whose location is filtered out of the sidebar.
    pub hide_filtered_markers: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            hide_filtered_markers: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerBinding<M> {
    pub location: LocationId,
    pub marker: M,
}

/// A sidebar item lit up after selection, until `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub location: LocationId,
    pub until: Duration,
}

pub struct PresentationSync<M: MapProvider> {
    map: M,
    bindings: Vec<MarkerBinding<M::Marker>>,
    sidebar: SidebarView,
    popup_language: Option<Language>,
    highlight: Option<Highlight>,
    options: SyncOptions,
    assets: Box<dyn AssetResolver>,
}

impl<M: MapProvider> PresentationSync<M> {
    /// Creates one marker per catalog record. Markers live as long as the
    /// sync; later renders only look them up.
    pub fn new(mut map: M, catalog: &Catalog, options: SyncOptions) -> Self {
        let bindings = catalog
            .iter()
            .map(|record| MarkerBinding {
                location: record.id,
                marker: map.create_marker(
                    record.coordinates,
                    MarkerIcon::for_category(record.category),
                ),
            })
            .collect();

        Self {
            map,
            bindings,
            sidebar: SidebarView::Pending,
            popup_language: None,
            highlight: None,
            options,
            assets: Box::new(AnyAsset),
        }
    }

    #[must_use]
    pub fn with_assets(mut self, assets: Box<dyn AssetResolver>) -> Self {
        self.assets = assets;
        self.popup_language = None;
        self
    }

    /// Re-derives both views from the state in one pass.
    pub fn render(&mut self, catalog: &Catalog, state: &ViewState) {
        let language = state.language();
        let visible = filter_locations(catalog, state);
        let groups = group_by_category(&visible);

        if self.popup_language != Some(language) {
            for binding in &self.bindings {
                if let Some(record) = catalog.get(binding.location) {
                    let popup = Popup::build(record, language, self.assets.as_ref());
                    self.map.bind_popup(binding.marker, popup);
                }
            }
            self.popup_language = Some(language);
        }

        let shown: HashSet<LocationId> = visible.iter().map(|record| record.id).collect();
        for binding in &self.bindings {
            let show = !self.options.hide_filtered_markers || shown.contains(&binding.location);
            self.map.set_marker_visible(binding.marker, show);
        }

        self.sidebar = SidebarView::build(&groups, language);

        if self
            .highlight
            .is_some_and(|highlight| !self.sidebar.contains(highlight.location))
        {
            self.highlight = None;
        }

        tracing::debug!(
            language = language.code(),
            filter = state.category_filter().as_str(),
            search = state.search_text(),
            visible = visible.len(),
            "views rendered"
        );
    }

    /// Sidebar selection: fly to the location, open its popup and light up
    /// the item for a while. Only locations the sidebar lists can be selected.
    pub fn select(
        &mut self,
        catalog: &Catalog,
        id: LocationId,
        now: Duration,
    ) -> Result<(), SyncError> {
        let record = catalog.get(id).ok_or(SyncError::UnknownLocation(id))?;
        let marker = self.marker_for(id).ok_or(SyncError::UnknownLocation(id))?;
        if !self.sidebar.contains(id) {
            return Err(SyncError::NotVisible(id));
        }

        self.map.advance(now);
        self.map.fly_to(record.coordinates, SELECT_ZOOM, FLY_DURATION);
        self.map.open_popup(marker);
        self.highlight = Some(Highlight {
            location: id,
            until: now + HIGHLIGHT_DURATION,
        });
        Ok(())
    }

    /// Map-side selection: open the popup and bounce the marker.
    pub fn select_marker(&mut self, id: LocationId, now: Duration) -> Result<(), SyncError> {
        let marker = self.marker_for(id).ok_or(SyncError::UnknownLocation(id))?;
        self.map.advance(now);
        self.map.open_popup(marker);
        self.map.bounce_marker(marker, BOUNCE_DURATION);
        Ok(())
    }

    pub fn tick(&mut self, now: Duration) {
        self.map.advance(now);
        if self.highlight.is_some_and(|highlight| now >= highlight.until) {
            self.highlight = None;
        }
    }

    pub const fn sidebar(&self) -> &SidebarView {
        &self.sidebar
    }

    pub const fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn is_highlighted(&self, id: LocationId) -> bool {
        self.highlight
            .is_some_and(|highlight| highlight.location == id)
    }

    pub fn marker_for(&self, id: LocationId) -> Option<M::Marker> {
        self.bindings
            .iter()
            .find(|binding| binding.location == id)
            .map(|binding| binding.marker)
    }

    pub fn location_for(&self, marker: M::Marker) -> Option<LocationId> {
        self.bindings
            .iter()
            .find(|binding| binding.marker == marker)
            .map(|binding| binding.location)
    }

    pub fn bindings(&self) -> &[MarkerBinding<M::Marker>] {
        &self.bindings
    }

    pub const fn options(&self) -> SyncOptions {
        self.options
    }

    pub const fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }
}
