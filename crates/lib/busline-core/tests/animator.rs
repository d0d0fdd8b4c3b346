use assert_approx_eq::assert_approx_eq;

use busline_core::animator::Bus;
use busline_core::error::{MapError, SettingsError};
use busline_core::geo::LatLng;
use busline_core::route::{Route, RouteCatalog, RouteColor, RouteName};
use busline_core::vehicle::VehicleState;
use busline_testutils::context::{make_animator, make_catalog, make_context};
use busline_testutils::surface::{RecordingSurface, SurfaceCall, TLayer};

#[test]
fn test_initialize_one_bus_per_route() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.1);
    animator.initialize(&mut surface, &catalog).expect("initialize");

    assert_eq!(animator.buses().len(), 2);
    assert_eq!(surface.marker_count(), 2);
    for (bus, route) in animator.buses().iter().zip(catalog.routes()) {
        assert_eq!(bus.route_name(), route.name());
        assert_eq!(bus.position(), route.start());
        assert_eq!(bus.vehicle().segment(), 0);
        assert_eq!(bus.vehicle().progress(), 0.0);
        assert!(bus.vehicle().speed() >= 0.1);
        assert!(bus.vehicle().speed() < 0.5);
        match surface.marker(bus.marker().layer()) {
            Some(TLayer::Marker { popup, .. }) => assert_eq!(popup, route.name().as_str()),
            other => panic!("expected a marker, found {:?}", other),
        }
    }
}

#[test]
fn test_reinitialize_leaks_no_markers() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.1);
    animator.initialize(&mut surface, &catalog).expect("initialize");
    let first_layers: Vec<_> = animator.buses().iter().map(|b| b.marker().layer()).collect();
    animator.initialize(&mut surface, &catalog).expect("initialize");

    assert_eq!(animator.buses().len(), catalog.len());
    assert_eq!(surface.marker_count(), catalog.len());
    for layer in first_layers {
        assert!(surface.marker(layer).is_none());
    }
}

#[test]
fn test_segments_visited_in_order() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.1);
    animator.initialize(&mut surface, &catalog).expect("initialize");

    let mut visited: Vec<usize> = vec![0];
    loop {
        animator.tick(&mut surface);
        let vehicle = animator.buses()[0].vehicle();
        if vehicle.state() == VehicleState::Arrived {
            break;
        }
        if *visited.last().expect("not empty") != vehicle.segment() {
            visited.push(vehicle.segment());
        }
    }
    assert_eq!(visited, vec![0, 1]);

    animator.tick(&mut surface);
    let bus = &animator.buses()[0];
    assert_eq!(bus.vehicle().segment(), 0);
    assert_eq!(bus.position(), LatLng::new(0.0, 0.0));
}

#[test]
fn test_progress_stays_normalized() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.3);
    animator.initialize(&mut surface, &catalog).expect("initialize");

    for _ in 0..100 {
        animator.tick(&mut surface);
        for bus in animator.buses() {
            let progress = bus.vehicle().progress();
            assert!((0.0..1.0).contains(&progress));
            assert!(bus.vehicle().segment() < bus.vehicle().route().path().len());
        }
    }
}

#[test]
fn test_heading_includes_icon_offset() {
    let route = Route::new(
        "diagonal",
        vec![LatLng::new(12.97, 77.59), LatLng::new(12.98, 77.60)],
        RouteColor::Green,
    )
    .expect("valid route");
    let catalog = RouteCatalog::new(vec![route]).expect("valid catalog");
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.001);
    animator.initialize(&mut surface, &catalog).expect("initialize");
    animator.tick(&mut surface);

    let expected = (77.60f64 - 77.59).atan2(12.98 - 12.97).to_degrees() + 90.0;
    let bus = &animator.buses()[0];
    assert_approx_eq!(bus.heading(), expected);
    assert_approx_eq!(bus.heading(), 135.0, 1e-6);
    match surface.marker(bus.marker().layer()) {
        Some(TLayer::Marker { angle, .. }) => assert_approx_eq!(*angle, expected),
        other => panic!("expected a marker, found {:?}", other),
    }
}

#[test]
fn test_reset_keeps_last_rotation() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.5);
    animator.initialize(&mut surface, &catalog).expect("initialize");

    let east = RouteName::from("east");
    let layer = animator
        .buses()
        .iter()
        .find(|bus| bus.route_name() == &east)
        .map(|bus| bus.marker().layer())
        .expect("bus on east");

    let east_state = |buses: &[Bus]| {
        buses
            .iter()
            .find(|bus| bus.route_name() == &east)
            .map(|bus| bus.state())
    };
    while east_state(animator.buses()) != Some(VehicleState::Arrived) {
        animator.tick(&mut surface);
    }
    surface.calls.clear();
    animator.tick(&mut surface);

    let rotations = surface
        .calls
        .iter()
        .filter(|call| matches!(call, SurfaceCall::Rotate(l, _) if *l == layer))
        .count();
    assert_eq!(rotations, 1, "only the re-applied rotation after the move");
    match surface.marker(layer) {
        Some(TLayer::Marker { position, .. }) => assert_eq!(*position, LatLng::new(0.0, 0.0)),
        other => panic!("expected a marker, found {:?}", other),
    }
}

#[test]
fn test_hidden_buses_keep_moving() {
    let mut context = make_context(make_catalog(), 0.01);
    context.start().expect("start");
    context.select_value("north").expect("known route");

    let hidden = context
        .buses()
        .iter()
        .find(|bus| !bus.is_visible())
        .map(|bus| bus.position())
        .expect("east bus is hidden");
    context.tick();
    let moved = context
        .buses()
        .iter()
        .find(|bus| !bus.is_visible())
        .map(|bus| bus.position())
        .expect("east bus is hidden");
    assert_ne!(hidden, moved);
    assert_eq!(context.ticks(), 1);
}

#[test]
fn test_initialize_rejects_stalled_or_backward_speed() {
    let catalog = make_catalog();
    for base_speed in [0.0, -0.1] {
        let mut surface = RecordingSurface::default();
        let mut animator = make_animator(base_speed);
        let result = animator.initialize(&mut surface, &catalog);
        assert_eq!(result, Err(SettingsError::InvalidSpeed(base_speed)));
        assert!(animator.buses().is_empty());
        assert_eq!(surface.marker_count(), 0);
    }
}

#[test]
fn test_buses_never_move_backwards() {
    let catalog = make_catalog();
    let mut surface = RecordingSurface::default();
    let mut animator = make_animator(0.1);
    animator.initialize(&mut surface, &catalog).expect("initialize");
    for _ in 0..1000 {
        animator.tick(&mut surface);
        for bus in animator.buses() {
            let vehicle = bus.vehicle();
            assert!(vehicle.speed() > 0.0);
            assert!((0.0..1.0).contains(&vehicle.progress()));
            assert!(bus.position().lat >= 0.0);
            assert!(bus.position().lng >= 0.0);
        }
    }
}

#[test]
fn test_start_rejects_invalid_speed() {
    let mut context = make_context(make_catalog(), -0.1);
    let result = context.start();
    assert_eq!(
        result,
        Err(MapError::Settings(SettingsError::InvalidSpeed(-0.1)))
    );
    assert!(context.buses().is_empty());
    assert_eq!(context.surface().marker_count(), 0);
}
