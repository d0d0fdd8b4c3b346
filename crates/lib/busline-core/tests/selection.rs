use busline_core::error::CatalogError;
use busline_core::route::{RouteCatalog, RouteName};
use busline_core::selection::{selector_options, Selection, ALL_ROUTES_LABEL};
use busline_testutils::context::{initial_view, make_catalog, make_context};
use busline_testutils::surface::SurfaceCall;

#[test]
fn test_selector_options() {
    let options = selector_options(&RouteCatalog::bangalore());
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![ALL_ROUTES_LABEL, "Route-1", "Route-2", "Route-3"]
    );
    assert_eq!(options[0].value, Selection::All);
    assert_eq!(
        options[2].value,
        Selection::Route(RouteName::from("Route-2"))
    );
}

#[test]
fn test_parse_selection() {
    let catalog = make_catalog();
    assert_eq!(Selection::parse("all", &catalog), Ok(Selection::All));
    assert_eq!(
        Selection::parse("east", &catalog),
        Ok(Selection::Route(RouteName::from("east")))
    );
    assert_eq!(
        Selection::parse("west", &catalog),
        Err(CatalogError::UnknownRoute("west".to_owned()))
    );
}

#[test]
fn test_single_route_shows_only_its_bus() {
    let mut context = make_context(make_catalog(), 0.01);
    context.start().expect("start");
    context.select_value("east").expect("known route");

    for bus in context.buses() {
        let expected = if bus.route_name().as_str() == "east" {
            1.0
        } else {
            0.0
        };
        assert_eq!(bus.marker().opacity(), expected);
    }
    assert_eq!(context.surface().line_count(), 1);
    assert_eq!(context.surface().fitted_bounds().len(), 1);
    assert_eq!(
        context.selection(),
        &Selection::Route(RouteName::from("east"))
    );
}

#[test]
fn test_all_routes_restores_view() {
    let mut context = make_context(make_catalog(), 0.01);
    context.start().expect("start");
    context.select_value("north").expect("known route");
    assert_ne!(context.surface().view, initial_view());

    context.select(Selection::All).expect("all routes");
    assert!(context.buses().iter().all(|bus| bus.is_visible()));
    assert_eq!(context.surface().view, initial_view());
    assert_eq!(context.surface().line_count(), 2);
    assert_eq!(
        context.surface().calls.last(),
        Some(&SurfaceCall::SetView(initial_view()))
    );
}

#[test]
fn test_unknown_value_changes_nothing() {
    let mut context = make_context(make_catalog(), 0.01);
    context.start().expect("start");
    let calls = context.surface().calls.len();

    let result = context.select_value("west");
    assert_eq!(result, Err(CatalogError::UnknownRoute("west".to_owned())));
    assert_eq!(context.surface().calls.len(), calls);
    assert_eq!(context.selection(), &Selection::All);
}

#[test]
fn test_reinitialize_keeps_selection() {
    let mut context = make_context(make_catalog(), 0.01);
    context.start().expect("start");
    context.select_value("north").expect("known route");
    context.reinitialize().expect("reinitialize");

    assert_eq!(context.buses().len(), 2);
    assert_eq!(context.surface().marker_count(), 2);
    for bus in context.buses() {
        assert_eq!(bus.is_visible(), bus.route_name().as_str() == "north");
        assert_eq!(bus.vehicle().segment(), 0);
    }
}
