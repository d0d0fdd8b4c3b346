use std::sync::Arc;

use typed_builder::TypedBuilder;

use crate::geo::LatLng;
use crate::route::{Route, RouteName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    /// A next point exists after the current segment start.
    Traveling,
    /// The segment index reached the last point of the route.
    Arrived,
}

/// Outcome of advancing a vehicle by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Moved along the current segment. `heading` is the raw direction of the segment
    /// in degrees, without any icon offset.
    Moved { position: LatLng, heading: f64 },
    /// Returned to the first point of the route after arriving at its end.
    Reset { position: LatLng },
}

impl Movement {
    pub fn position(&self) -> LatLng {
        match self {
            Movement::Moved { position, .. } => *position,
            Movement::Reset { position } => *position,
        }
    }
}

/// Simulated vehicle advancing along the segments of one route.
#[derive(Clone, Debug, TypedBuilder)]
pub struct Vehicle {
    route: Arc<Route>,
    speed: f64,
    #[builder(default)]
    segment: usize,
    #[builder(default)]
    progress: f64,
}

impl Vehicle {
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn route_name(&self) -> &RouteName {
        self.route.name()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn segment(&self) -> usize {
        self.segment
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> VehicleState {
        if self.segment + 1 < self.route.path().len() {
            VehicleState::Traveling
        } else {
            VehicleState::Arrived
        }
    }

    /// Position implied by the stored segment and progress.
    pub fn position(&self) -> LatLng {
        let path = self.route.path();
        match path.get(self.segment + 1) {
            Some(next) => path[self.segment].lerp(next, self.progress),
            None => path[path.len() - 1],
        }
    }

    /// Advances the vehicle by one tick.
    ///
    /// The position is interpolated with the progress before it is normalized, so the
    /// tick that completes a segment lands exactly on (or just past) its end point. A
    /// completed segment is carried into the segment index in the same tick.
    pub fn advance(&mut self) -> Movement {
        let path = self.route.path();
        let (current, next) = match path.get(self.segment + 1) {
            Some(next) => (path[self.segment], *next),
            None => {
                self.segment = 0;
                self.progress = 0.0;
                return Movement::Reset { position: path[0] };
            }
        };

        self.progress += self.speed;
        let position = current.lerp(&next, self.progress);
        let heading = current.heading_to(&next);

        if self.progress >= 1.0 {
            self.segment += 1;
            self.progress = 0.0;
        }
        Movement::Moved { position, heading }
    }
}
