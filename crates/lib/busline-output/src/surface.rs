use indexmap::IndexMap;
use log::trace;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use busline_core::geo::{Bounds, LatLng};
use busline_core::surface::{
    LayerId, LineStyle, MapSurface, MarkerIcon, RotationOrigin, Viewport,
};

pub const MAX_ZOOM: f64 = 18.0;
pub const MIN_ZOOM: f64 = 1.0;

/// Background tile layer. The attribution must stay visible whenever the map is shown.
#[derive(Deserialize, Debug, Clone)]
pub struct TileSettings {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSettings {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_owned(),
            attribution: "© OpenStreetMap contributors".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLayer {
    pub position: LatLng,
    pub popup: String,
    pub angle: f64,
    pub origin: RotationOrigin,
    pub opacity: f64,
    pub heading_offset: f64,
}

impl MarkerLayer {
    /// Direction of travel in degrees, with the icon offset taken back out.
    pub fn bearing(&self) -> f64 {
        (self.angle - self.heading_offset).rem_euclid(360.0)
    }

    /// Arrow pointing in the direction of travel.
    pub fn glyph(&self) -> &'static str {
        if self.angle == 0.0 {
            return "●";
        }
        const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];
        let sector = ((self.bearing() + 22.5) / 45.0).floor() as usize % ARROWS.len();
        ARROWS[sector]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CanvasLayer {
    Line { path: Vec<LatLng>, style: LineStyle },
    Marker(MarkerLayer),
}

/// Map surface drawn on a terminal canvas. It only holds the layers and the viewport;
/// turning them into widgets is left to the renderer.
#[derive(Clone, Debug, TypedBuilder)]
pub struct CanvasSurface {
    view: Viewport,
    #[builder(default)]
    tiles: TileSettings,
    #[builder(default)]
    layers: IndexMap<LayerId, CanvasLayer>,
    #[builder(default)]
    next_id: u64,
}

impl CanvasSurface {
    pub fn layers(&self) -> impl Iterator<Item = &CanvasLayer> {
        self.layers.values()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Vec<LatLng>, &LineStyle)> {
        self.layers.values().filter_map(|layer| match layer {
            CanvasLayer::Line { path, style } => Some((path, style)),
            CanvasLayer::Marker(_) => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerLayer> {
        self.layers.values().filter_map(|layer| match layer {
            CanvasLayer::Marker(marker) => Some(marker),
            CanvasLayer::Line { .. } => None,
        })
    }

    pub fn tiles(&self) -> &TileSettings {
        &self.tiles
    }

    pub fn attribution(&self) -> &str {
        &self.tiles.attribution
    }

    /// Area shown at the current zoom. One zoom level halves the span; terminal cells are
    /// about twice as tall as wide, so the latitude span is half the longitude span.
    pub fn view_bounds(&self) -> Bounds {
        let half_lng = 180.0 / 2f64.powf(self.view.zoom);
        let half_lat = half_lng / 2.0;
        let center = self.view.center;
        Bounds {
            south_west: LatLng::new(center.lat - half_lat, center.lng - half_lng),
            north_east: LatLng::new(center.lat + half_lat, center.lng + half_lng),
        }
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.view.zoom = (self.view.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn marker_mut(&mut self, layer: LayerId) -> Option<&mut MarkerLayer> {
        match self.layers.get_mut(&layer) {
            Some(CanvasLayer::Marker(marker)) => Some(marker),
            _ => None,
        }
    }
}

/// Largest whole zoom at which `bounds` fits in the view.
pub fn fit_zoom(bounds: &Bounds) -> f64 {
    let lng_zoom = (360.0 / bounds.lng_span()).log2();
    let lat_zoom = (180.0 / bounds.lat_span()).log2();
    lng_zoom.min(lat_zoom).floor().clamp(MIN_ZOOM, MAX_ZOOM)
}

impl MapSurface for CanvasSurface {
    fn add_polyline(&mut self, path: &[LatLng], style: LineStyle) -> LayerId {
        self.next_id += 1;
        let layer = LayerId::from(self.next_id);
        self.layers.insert(
            layer,
            CanvasLayer::Line {
                path: path.to_vec(),
                style,
            },
        );
        layer
    }

    fn add_marker(&mut self, position: LatLng, icon: &MarkerIcon, popup: &str) -> LayerId {
        self.next_id += 1;
        let layer = LayerId::from(self.next_id);
        self.layers.insert(
            layer,
            CanvasLayer::Marker(MarkerLayer {
                position,
                popup: popup.to_owned(),
                angle: 0.0,
                origin: RotationOrigin::from(icon),
                opacity: 1.0,
                heading_offset: icon.heading_offset,
            }),
        );
        layer
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.shift_remove(&layer);
    }

    fn set_marker_position(&mut self, layer: LayerId, position: LatLng) {
        if let Some(marker) = self.marker_mut(layer) {
            marker.position = position;
        }
    }

    fn set_marker_rotation(&mut self, layer: LayerId, angle: f64, origin: RotationOrigin) {
        if let Some(marker) = self.marker_mut(layer) {
            marker.angle = angle;
            marker.origin = origin;
        }
    }

    fn set_marker_opacity(&mut self, layer: LayerId, opacity: f64) {
        if let Some(marker) = self.marker_mut(layer) {
            marker.opacity = opacity;
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.view = Viewport {
            center: bounds.center(),
            zoom: fit_zoom(&bounds),
        };
        trace!("Fitted view to {} at zoom {}", self.view.center, self.view.zoom);
    }

    fn set_view(&mut self, viewport: Viewport) {
        self.view = viewport;
    }

    fn viewport(&self) -> Viewport {
        self.view
    }
}
