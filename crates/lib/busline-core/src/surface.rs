use std::fmt;

use serde::Deserialize;

use crate::geo::{Bounds, LatLng};
use crate::route::RouteColor;

/// Handle of a layer added to a [`MapSurface`].
#[derive(Default, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct LayerId(u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LayerId {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl LayerId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Stroke of a route line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: RouteColor,
    pub weight: f64,
    pub opacity: f64,
}

/// Image used for every vehicle marker. Sizes and anchors are in pixels.
///
/// `heading_offset` is added to the travel direction before the marker is rotated. It
/// depends on which way the artwork points, so it is configured with the icon and never
/// derived.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MarkerIcon {
    pub icon_url: String,
    pub size: [u32; 2],
    pub anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub heading_offset: f64,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            icon_url: "bus-icon.svg".to_owned(),
            size: [38, 38],
            anchor: [19, 38],
            popup_anchor: [0, -40],
            heading_offset: 90.0,
        }
    }
}

impl fmt::Display for MarkerIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{}, popup at {},{}",
            self.icon_url, self.size[0], self.size[1], self.popup_anchor[0], self.popup_anchor[1]
        )
    }
}

/// Point of the icon around which a marker is rotated.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RotationOrigin {
    /// Offset in pixels from the top-left corner of the icon.
    Pixels(i32, i32),
    #[default]
    CenterBottom,
}

impl fmt::Display for RotationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationOrigin::Pixels(x, y) => write!(f, "{}px {}px", x, y),
            RotationOrigin::CenterBottom => write!(f, "center bottom"),
        }
    }
}

impl From<&MarkerIcon> for RotationOrigin {
    fn from(icon: &MarkerIcon) -> Self {
        RotationOrigin::Pixels(icon.anchor[0], icon.anchor[1])
    }
}

/// Visible area of the map.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

/// The map canvas. Routes are drawn on it as polylines and vehicles as markers; both
/// are addressed through the [`LayerId`] returned when they are added.
///
/// Operations on a layer that was already removed are ignored by implementations.
pub trait MapSurface {
    fn add_polyline(&mut self, path: &[LatLng], style: LineStyle) -> LayerId;
    fn add_marker(&mut self, position: LatLng, icon: &MarkerIcon, popup: &str) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);
    fn set_marker_position(&mut self, layer: LayerId, position: LatLng);
    fn set_marker_rotation(&mut self, layer: LayerId, angle: f64, origin: RotationOrigin);
    fn set_marker_opacity(&mut self, layer: LayerId, opacity: f64);
    fn fit_bounds(&mut self, bounds: Bounds);
    fn set_view(&mut self, viewport: Viewport);
    fn viewport(&self) -> Viewport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_description() {
        assert_eq!(
            MarkerIcon::default().to_string(),
            "bus-icon.svg 38x38, popup at 0,-40"
        );
    }
}
