use busline_core::animator::BusAnimator;
use busline_core::context::AppContext;
use busline_core::controller::SelectionController;
use busline_core::geo::LatLng;
use busline_core::route::{Route, RouteCatalog, RouteColor};
use busline_core::surface::Viewport;

use crate::surface::RecordingSurface;

pub const TEST_SEED: u64 = 42;

pub fn initial_view() -> Viewport {
    Viewport {
        center: LatLng::new(12.9716, 77.5946),
        zoom: 12.0,
    }
}

/// Two short routes: a northbound one with three points and an eastbound one with two.
pub fn make_catalog() -> RouteCatalog {
    let north = Route::new(
        "north",
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(2.0, 0.0),
        ],
        RouteColor::Blue,
    )
    .expect("valid route");
    let east = Route::new(
        "east",
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 10.0)],
        RouteColor::Red,
    )
    .expect("valid route");
    RouteCatalog::new(vec![north, east]).expect("valid catalog")
}

pub fn make_animator(base_speed: f64) -> BusAnimator {
    BusAnimator::builder()
        .base_speed(base_speed)
        .build()
        .with_seed(TEST_SEED)
}

pub fn make_context(catalog: RouteCatalog, base_speed: f64) -> AppContext<RecordingSurface> {
    AppContext::builder()
        .surface(RecordingSurface::default())
        .catalog(catalog)
        .animator(make_animator(base_speed))
        .controller(SelectionController::new(initial_view()))
        .build()
}
