use std::fmt;

use serde::Deserialize;

/// A geographic position in degrees. Deserialized from a `[lat, lng]` pair so that
/// route paths can be written compactly in the scenario files.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(from = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<[f64; 2]> for LatLng {
    fn from(f: [f64; 2]) -> Self {
        Self {
            lat: f[0],
            lng: f[1],
        }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from(f: (f64, f64)) -> Self {
        Self { lat: f.0, lng: f.1 }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear blend between `self` and `other`. The ratio is not clamped, a ratio
    /// slightly above one overshoots the segment end.
    pub fn lerp(&self, other: &LatLng, ratio: f64) -> LatLng {
        LatLng {
            lat: self.lat + (other.lat - self.lat) * ratio,
            lng: self.lng + (other.lng - self.lng) * ratio,
        }
    }

    /// Angle in degrees of the vector from `self` to `other`, measured as
    /// `atan2(Δlng, Δlat)`. North is zero and east is ninety.
    pub fn heading_to(&self, other: &LatLng) -> f64 {
        (other.lng - self.lng)
            .atan2(other.lat - self.lat)
            .to_degrees()
    }
}

/// Rectangular area spanned by a set of positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn from_point(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest bounds containing all the points. Returns `None` for an empty slice.
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Bounds::from_point(*first);
        rest.iter().for_each(|point| bounds.extend(point));
        Some(bounds)
    }

    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Grows every side by `ratio` times the span along that axis.
    pub fn pad(&self, ratio: f64) -> Bounds {
        let lat_buffer = self.lat_span() * ratio;
        let lng_buffer = self.lng_span() * ratio;
        Bounds {
            south_west: LatLng::new(
                self.south_west.lat - lat_buffer,
                self.south_west.lng - lng_buffer,
            ),
            north_east: LatLng::new(
                self.north_east.lat + lat_buffer,
                self.north_east.lng + lng_buffer,
            ),
        }
    }

    pub fn center(&self) -> LatLng {
        self.south_west.lerp(&self.north_east, 0.5)
    }

    pub fn lat_span(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    pub fn lng_span(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}
