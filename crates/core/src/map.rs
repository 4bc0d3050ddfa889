use std::fmt;
use std::time::Duration;

use crate::catalog::{Category, Coordinates};
use crate::popup::Popup;

pub type ZoomLevel = u8;

/// Center of the neighborhood on first load.
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(34.4367, 35.8497);
pub const DEFAULT_ZOOM: f64 = 15.0;
pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Degrees of longitude visible at zoom 0 across the viewport.
const WORLD_SPAN: f64 = 360.0 * 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerIcon {
    pub category: Category,
}

impl MarkerIcon {
    pub const fn for_category(category: Category) -> Self {
        Self { category }
    }

    pub fn css_class(self) -> String {
        format!("custom-marker marker-{}", self.category)
    }
}

/// The subset of a map widget the presentation sync depends on.
///
/// Marker handles are plain values; all mutation goes through the provider.
pub trait MapProvider {
    type Marker: Copy + Eq + fmt::Debug;

    fn create_marker(&mut self, coordinates: Coordinates, icon: MarkerIcon) -> Self::Marker;

    fn bind_popup(&mut self, marker: Self::Marker, popup: Popup);

    fn open_popup(&mut self, marker: Self::Marker);

    fn fly_to(&mut self, coordinates: Coordinates, zoom: ZoomLevel, duration: Duration);

    fn set_marker_visible(&mut self, marker: Self::Marker, visible: bool);

    /// Short attention animation on a marker.
    fn bounce_marker(&mut self, marker: Self::Marker, duration: Duration);

    /// Time moves forward; providers with animations catch up here.
    fn advance(&mut self, _now: Duration) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewport {
    pub fn lon_span(&self) -> f64 {
        WORLD_SPAN / self.zoom.exp2()
    }

    /// `(lon_bounds, lat_bounds)` for a drawing area whose width is `aspect`
    /// times its height.
    pub fn bounds(&self, aspect: f64) -> ([f64; 2], [f64; 2]) {
        let half_lon = self.lon_span() / 2.0;
        let half_lat = half_lon / aspect.max(f64::EPSILON);
        (
            [self.center.lon - half_lon, self.center.lon + half_lon],
            [self.center.lat - half_lat, self.center.lat + half_lat],
        )
    }

    pub fn contains(&self, point: Coordinates, aspect: f64) -> bool {
        let ([west, east], [south, north]) = self.bounds(aspect);
        (west..=east).contains(&point.lon) && (south..=north).contains(&point.lat)
    }

    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            center: Coordinates::new(
                (to.center.lat - self.center.lat).mul_add(t, self.center.lat),
                (to.center.lon - self.center.lon).mul_add(t, self.center.lon),
            ),
            zoom: (to.zoom - self.zoom).mul_add(t, self.zoom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    from: Viewport,
    to: Viewport,
    started: Duration,
    duration: Duration,
}

impl Flight {
    fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn at(&self, now: Duration) -> Viewport {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        // ease-out cubic
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from.lerp(self.to, eased)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(usize);

impl MarkerId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: Coordinates,
    pub icon: MarkerIcon,
    pub popup: Option<Popup>,
    pub visible: bool,
    bounce_until: Option<Duration>,
}

impl Marker {
    pub fn is_bouncing(&self, now: Duration) -> bool {
        self.bounce_until.is_some_and(|until| now < until)
    }
}

/// In-memory map that frontends draw from: markers with their popups, which
/// popup is open, and an animated viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    viewport: Viewport,
    flight: Option<Flight>,
    open_popup: Option<MarkerId>,
    now: Duration,
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl MarkerLayer {
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            markers: Vec::new(),
            viewport,
            flight: None,
            open_popup: None,
            now: Duration::ZERO,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.flight
            .map_or(self.viewport, |flight| flight.at(self.now))
    }

    pub const fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub const fn now(&self) -> Duration {
        self.now
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.markers
            .iter()
            .enumerate()
            .map(|(index, marker)| (MarkerId(index), marker))
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.markers().filter(|(_, marker)| marker.visible)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub const fn open_marker(&self) -> Option<MarkerId> {
        self.open_popup
    }

    pub fn open_popup_content(&self) -> Option<&Popup> {
        self.open_popup
            .and_then(|id| self.marker(id))
            .and_then(|marker| marker.popup.as_ref())
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    /// Moves the resting viewport by a fraction of the visible span.
    pub fn pan(&mut self, east: f64, north: f64) {
        let mut viewport = self.viewport();
        let span = viewport.lon_span();
        viewport.center = Coordinates::new(
            north.mul_add(span, viewport.center.lat).clamp(-85.0, 85.0),
            east.mul_add(span, viewport.center.lon).clamp(-180.0, 180.0),
        );
        self.flight = None;
        self.viewport = viewport;
    }

    pub fn zoom_by(&mut self, delta: f64) {
        let mut viewport = self.viewport();
        viewport.zoom = (viewport.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        self.flight = None;
        self.viewport = viewport;
    }
}

impl MapProvider for MarkerLayer {
    type Marker = MarkerId;

    fn create_marker(&mut self, coordinates: Coordinates, icon: MarkerIcon) -> MarkerId {
        self.markers.push(Marker {
            coordinates,
            icon,
            popup: None,
            visible: true,
            bounce_until: None,
        });
        MarkerId(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: MarkerId, popup: Popup) {
        if let Some(entry) = self.markers.get_mut(marker.0) {
            entry.popup = Some(popup);
        }
    }

    fn open_popup(&mut self, marker: MarkerId) {
        if self.marker(marker).is_some_and(|entry| entry.visible) {
            self.open_popup = Some(marker);
        }
    }

    fn fly_to(&mut self, coordinates: Coordinates, zoom: ZoomLevel, duration: Duration) {
        let from = self.viewport();
        self.flight = Some(Flight {
            from,
            to: Viewport {
                center: coordinates,
                zoom: f64::from(zoom),
            },
            started: self.now,
            duration,
        });
    }

    fn set_marker_visible(&mut self, marker: MarkerId, visible: bool) {
        if let Some(entry) = self.markers.get_mut(marker.0) {
            entry.visible = visible;
        }
        if !visible && self.open_popup == Some(marker) {
            self.open_popup = None;
        }
    }

    fn bounce_marker(&mut self, marker: MarkerId, duration: Duration) {
        let until = self.now + duration;
        if let Some(entry) = self.markers.get_mut(marker.0) {
            entry.bounce_until = Some(until);
        }
    }

    fn advance(&mut self, now: Duration) {
        self.now = self.now.max(now);
        if let Some(flight) = self.flight {
            if flight.progress(self.now) >= 1.0 {
                self.viewport = flight.to;
                self.flight = None;
            }
        }
        for marker in &mut self.markers {
            if marker.bounce_until.is_some_and(|until| self.now >= until) {
                marker.bounce_until = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn layer_with_marker() -> (MarkerLayer, MarkerId) {
        let mut layer = MarkerLayer::default();
        let id = layer.create_marker(
            Coordinates::new(34.449, 35.825),
            MarkerIcon::for_category(Category::Abandoned),
        );
        (layer, id)
    }

    #[test]
    fn fly_to_animates_then_settles() {
        let (mut layer, _) = layer_with_marker();
        let target = Coordinates::new(34.449, 35.825);

        layer.advance(Duration::from_secs(1));
        layer.fly_to(target, 17, Duration::from_millis(500));
        assert!(layer.is_flying());

        layer.advance(Duration::from_millis(1250));
        let midway = layer.viewport();
        assert!(midway.zoom > DEFAULT_ZOOM && midway.zoom < 17.0);

        layer.advance(Duration::from_millis(1500));
        assert!(!layer.is_flying());
        assert_eq!(layer.viewport().center, target);
        assert_close(layer.viewport().zoom, 17.0);
    }

    #[test]
    fn zero_duration_flight_lands_immediately() {
        let (mut layer, _) = layer_with_marker();
        layer.fly_to(Coordinates::new(1.0, 2.0), 12, Duration::ZERO);
        assert_eq!(layer.viewport().center, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn time_never_runs_backwards() {
        let (mut layer, _) = layer_with_marker();
        layer.advance(Duration::from_secs(5));
        layer.advance(Duration::from_secs(2));
        assert_eq!(layer.now(), Duration::from_secs(5));
    }

    #[test]
    fn hiding_a_marker_closes_its_popup() {
        let (mut layer, id) = layer_with_marker();
        layer.open_popup(id);
        assert_eq!(layer.open_marker(), Some(id));

        layer.set_marker_visible(id, false);
        assert_eq!(layer.open_marker(), None);

        layer.open_popup(id);
        assert_eq!(layer.open_marker(), None);
    }

    #[test]
    fn bounce_expires() {
        let (mut layer, id) = layer_with_marker();
        layer.bounce_marker(id, Duration::from_secs(1));
        assert!(layer.marker(id).is_some_and(|marker| marker.is_bouncing(layer.now())));

        layer.advance(Duration::from_millis(1000));
        assert!(!layer.marker(id).is_some_and(|marker| marker.is_bouncing(layer.now())));
    }

    #[test]
    fn viewport_bounds_shrink_with_zoom() {
        let near = Viewport {
            center: DEFAULT_CENTER,
            zoom: 17.0,
        };
        let far = Viewport::default();
        assert_close(far.lon_span() / near.lon_span(), 4.0);

        let ([west, east], [south, north]) = far.bounds(2.0);
        assert_close((east - west) / (north - south), 2.0);
        assert!(far.contains(DEFAULT_CENTER, 2.0));
    }

    #[test]
    fn pan_and_zoom_are_clamped() {
        let mut layer = MarkerLayer::default();
        layer.zoom_by(100.0);
        assert_close(layer.viewport().zoom, MAX_ZOOM);
        layer.zoom_by(-100.0);
        assert_close(layer.viewport().zoom, MIN_ZOOM);

        layer.pan(0.0, 1_000.0);
        assert!(layer.viewport().center.lat <= 85.0);
    }

    #[test]
    fn icon_class_names_the_category() {
        assert_eq!(
            MarkerIcon::for_category(Category::Coffeeshop).css_class(),
            "custom-marker marker-coffeeshop"
        );
    }
}
