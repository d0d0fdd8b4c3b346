use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use typed_builder::TypedBuilder;

use crate::error::SettingsError;
use crate::geo::LatLng;
use crate::marker::RotatableMarker;
use crate::route::{RouteCatalog, RouteName};
use crate::surface::{MapSurface, MarkerIcon};
use crate::vehicle::{Movement, Vehicle, VehicleState};

pub const DEFAULT_BASE_SPEED: f64 = 0.00005;

/// Range of the random factor applied to the base speed of each vehicle.
pub const SPEED_FACTOR_MIN: f64 = 1.0;
pub const SPEED_FACTOR_MAX: f64 = 5.0;

/// Accepts only base speeds that move a bus forward along its route.
pub fn validate_base_speed(speed: f64) -> Result<f64, SettingsError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(SettingsError::InvalidSpeed(speed))
    }
}

/// A vehicle together with the marker that shows it on the map.
#[derive(Clone, Debug)]
pub struct Bus {
    vehicle: Vehicle,
    marker: RotatableMarker,
}

impl Bus {
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn marker(&self) -> &RotatableMarker {
        &self.marker
    }

    pub fn route_name(&self) -> &RouteName {
        self.vehicle.route_name()
    }

    pub fn state(&self) -> VehicleState {
        self.vehicle.state()
    }

    pub fn position(&self) -> LatLng {
        self.marker.position()
    }

    /// Marker angle, icon offset included.
    pub fn heading(&self) -> f64 {
        self.marker.angle()
    }

    pub fn is_visible(&self) -> bool {
        self.marker.is_visible()
    }
}

/// Owns the simulated buses, one per route, and moves them along their routes.
#[derive(TypedBuilder)]
pub struct BusAnimator {
    #[builder(default = DEFAULT_BASE_SPEED)]
    base_speed: f64,
    #[builder(default)]
    icon: MarkerIcon,
    #[builder(default = Pcg64::from_entropy())]
    rng: Pcg64,
    #[builder(default)]
    buses: Vec<Bus>,
}

impl BusAnimator {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    /// Removes every bus and its marker, then places one new bus at the start of each
    /// route with a freshly drawn speed. Nothing changes when the base speed is invalid.
    pub fn initialize<S: MapSurface>(
        &mut self,
        surface: &mut S,
        catalog: &RouteCatalog,
    ) -> Result<(), SettingsError> {
        validate_base_speed(self.base_speed)?;
        self.buses
            .drain(..)
            .for_each(|bus| bus.marker.remove(surface));

        for route in catalog.routes() {
            let factor = self.rng.gen_range(SPEED_FACTOR_MIN..SPEED_FACTOR_MAX);
            let speed = self.base_speed * factor;
            let marker = RotatableMarker::place(
                surface,
                route.start(),
                &self.icon,
                route.name().as_str(),
            );
            debug!("Placed bus on {} with speed {}", route.name(), speed);
            self.buses.push(Bus {
                vehicle: Vehicle::builder().route(route.clone()).speed(speed).build(),
                marker,
            });
        }
        info!("Initialized {} buses", self.buses.len());
        Ok(())
    }

    /// Moves every bus by one step. Hidden buses keep moving.
    pub fn tick<S: MapSurface>(&mut self, surface: &mut S) {
        let heading_offset = self.icon.heading_offset;
        for bus in self.buses.iter_mut() {
            match bus.vehicle.advance() {
                Movement::Reset { position } => {
                    debug!("Bus on {} reached the end, resetting", bus.route_name());
                    bus.marker.set_lat_lng(surface, position);
                }
                Movement::Moved { position, heading } => {
                    bus.marker.set_angle(surface, heading + heading_offset);
                    bus.marker.set_lat_lng(surface, position);
                }
            }
        }
        trace!("Moved {} buses", self.buses.len());
    }

    /// Sets every marker fully opaque when `visible` holds for its route, and fully
    /// transparent otherwise.
    pub fn set_visibility<S, F>(&mut self, surface: &mut S, visible: F)
    where
        S: MapSurface,
        F: Fn(&RouteName) -> bool,
    {
        for bus in self.buses.iter_mut() {
            let opacity = if visible(bus.vehicle.route_name()) {
                1.0
            } else {
                0.0
            };
            bus.marker.set_opacity(surface, opacity);
        }
    }
}
