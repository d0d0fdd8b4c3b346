use crate::geo::LatLng;
use crate::surface::{LayerId, MapSurface, MarkerIcon, RotationOrigin};

/// A marker that can be rotated around a point of its icon.
///
/// The surface only knows how to place a marker; the wrapper keeps the rotation state
/// and re-applies it whenever the marker moves, so the icon never snaps back to its
/// unrotated orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct RotatableMarker {
    layer: LayerId,
    position: LatLng,
    angle: f64,
    origin: RotationOrigin,
    opacity: f64,
}

impl RotatableMarker {
    /// Adds a marker to the surface. The rotation origin defaults to the icon anchor.
    pub fn place<S: MapSurface>(
        surface: &mut S,
        position: LatLng,
        icon: &MarkerIcon,
        popup: &str,
    ) -> Self {
        let layer = surface.add_marker(position, icon, popup);
        Self {
            layer,
            position,
            angle: 0.0,
            origin: RotationOrigin::from(icon),
            opacity: 1.0,
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn origin(&self) -> RotationOrigin {
        self.origin
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn set_lat_lng<S: MapSurface>(&mut self, surface: &mut S, position: LatLng) {
        self.position = position;
        surface.set_marker_position(self.layer, position);
        self.apply_rotation(surface);
    }

    pub fn set_angle<S: MapSurface>(&mut self, surface: &mut S, angle: f64) {
        self.angle = angle;
        self.apply_rotation(surface);
    }

    pub fn set_origin<S: MapSurface>(&mut self, surface: &mut S, origin: RotationOrigin) {
        self.origin = origin;
        self.apply_rotation(surface);
    }

    pub fn set_opacity<S: MapSurface>(&mut self, surface: &mut S, opacity: f64) {
        self.opacity = opacity;
        surface.set_marker_opacity(self.layer, opacity);
    }

    pub fn remove<S: MapSurface>(self, surface: &mut S) {
        surface.remove_layer(self.layer);
    }

    // A zero angle leaves the icon as drawn.
    fn apply_rotation<S: MapSurface>(&self, surface: &mut S) {
        if self.angle != 0.0 {
            surface.set_marker_rotation(self.layer, self.angle, self.origin);
        }
    }
}
