use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::geo::{Bounds, LatLng};

/// Name that identifies a route. It is also the value emitted by the route selector.
#[derive(Deserialize, Default, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct RouteName(String);

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteName {
    fn from(f: &str) -> Self {
        Self(f.to_owned())
    }
}

impl From<String> for RouteName {
    fn from(f: String) -> Self {
        Self(f)
    }
}

impl RouteName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display color of a route line.
#[derive(Deserialize, Debug, Hash, Copy, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteColor {
    #[default]
    Blue,
    Red,
    Green,
    Yellow,
    Magenta,
    Cyan,
    White,
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteColor::Blue => write!(f, "blue"),
            RouteColor::Red => write!(f, "red"),
            RouteColor::Green => write!(f, "green"),
            RouteColor::Yellow => write!(f, "yellow"),
            RouteColor::Magenta => write!(f, "magenta"),
            RouteColor::Cyan => write!(f, "cyan"),
            RouteColor::White => write!(f, "white"),
        }
    }
}

/// A named, ordered, fixed sequence of points plus a display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    name: RouteName,
    path: Vec<LatLng>,
    color: RouteColor,
}

impl Route {
    pub fn new(
        name: impl Into<RouteName>,
        path: Vec<LatLng>,
        color: RouteColor,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if path.len() < 2 {
            return Err(CatalogError::TooFewPoints {
                route: name.to_string(),
                count: path.len(),
            });
        }
        Ok(Self { name, path, color })
    }

    pub fn name(&self) -> &RouteName {
        &self.name
    }

    pub fn path(&self) -> &[LatLng] {
        &self.path
    }

    pub fn color(&self) -> RouteColor {
        self.color
    }

    pub fn start(&self) -> LatLng {
        self.path[0]
    }

    /// Number of straight-line segments, one less than the point count.
    pub fn segment_count(&self) -> usize {
        self.path.len() - 1
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::from_point(self.start());
        self.path.iter().for_each(|point| bounds.extend(point));
        bounds
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RouteSettings {
    pub name: String,
    pub color: RouteColor,
    pub path: Vec<LatLng>,
}

/// Read-only lookup of routes by name. Iteration follows the declaration order, which
/// is also the order of the entries in the route selector.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: IndexMap<RouteName, Arc<Route>>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<Route>) -> Result<Self, CatalogError> {
        if routes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut catalog = IndexMap::with_capacity(routes.len());
        for route in routes.into_iter() {
            if catalog.contains_key(route.name()) {
                return Err(CatalogError::DuplicateRoute(route.name().to_string()));
            }
            debug!(
                "Adding route {} with {} points to the catalog",
                route.name(),
                route.path().len()
            );
            catalog.insert(route.name().clone(), Arc::new(route));
        }
        Ok(Self { routes: catalog })
    }

    pub fn from_settings(settings: &[RouteSettings]) -> Result<Self, CatalogError> {
        let routes = settings
            .iter()
            .map(|s| Route::new(s.name.as_str(), s.path.clone(), s.color))
            .collect::<Result<Vec<Route>, CatalogError>>()?;
        Self::new(routes)
    }

    /// The three Bangalore routes the tracker ships with.
    pub fn bangalore() -> Self {
        let route = |name: &str, path: [[f64; 2]; 5], color: RouteColor| {
            let path = path.into_iter().map(LatLng::from).collect();
            Arc::new(Route {
                name: RouteName::from(name),
                path,
                color,
            })
        };
        let routes = [
            route(
                "Route-1",
                [
                    [12.9716, 77.5946], // Majestic
                    [12.9795, 77.5913], // Anand Rao Circle
                    [12.9863, 77.5821], // Malleswaram
                    [12.9984, 77.5712], // Sadashivanagar
                    [13.0094, 77.5517], // Hebbal
                ],
                RouteColor::Blue,
            ),
            route(
                "Route-2",
                [
                    [12.9293, 77.6245], // Koramangala
                    [12.9352, 77.6143], // BTM Layout
                    [12.9121, 77.5922], // Jayanagar
                    [12.9345, 77.5828], // Basavanagudi
                    [12.9515, 77.5752], // Chamarajpet
                ],
                RouteColor::Red,
            ),
            route(
                "Route-3",
                [
                    [12.9767, 77.6397], // Indiranagar
                    [12.9719, 77.6145], // Domlur
                    [12.9629, 77.6416], // HAL
                    [12.9590, 77.6600], // Marathahalli
                    [12.9785, 77.7285], // Whitefield
                ],
                RouteColor::Green,
            ),
        ];
        Self {
            routes: routes
                .into_iter()
                .map(|route| (route.name().clone(), route))
                .collect(),
        }
    }

    pub fn get(&self, name: &RouteName) -> Result<&Arc<Route>, CatalogError> {
        self.routes
            .get(name)
            .ok_or_else(|| CatalogError::UnknownRoute(name.to_string()))
    }

    pub fn contains(&self, name: &RouteName) -> bool {
        self.routes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &RouteName> {
        self.routes.keys()
    }

    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_needs_two_points() {
        let result = Route::new("short", vec![LatLng::new(0.0, 0.0)], RouteColor::Red);
        assert_eq!(
            result,
            Err(CatalogError::TooFewPoints {
                route: "short".to_owned(),
                count: 1
            })
        );
    }

    #[test]
    fn test_bangalore_order() {
        let catalog = RouteCatalog::bangalore();
        let names: Vec<&str> = catalog.names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Route-1", "Route-2", "Route-3"]);
        let route = catalog.get(&RouteName::from("Route-2")).expect("route");
        assert_eq!(route.color(), RouteColor::Red);
        assert_eq!(route.segment_count(), 4);
    }

    #[test]
    fn test_unknown_route() {
        let catalog = RouteCatalog::bangalore();
        let err = catalog.get(&RouteName::from("Route-9")).unwrap_err();
        assert_eq!(err, CatalogError::UnknownRoute("Route-9".to_owned()));
    }

    #[test]
    fn test_duplicate_route() {
        let path = vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        let routes = vec![
            Route::new("a", path.clone(), RouteColor::Blue).expect("route"),
            Route::new("a", path, RouteColor::Red).expect("route"),
        ];
        assert_eq!(
            RouteCatalog::new(routes).unwrap_err(),
            CatalogError::DuplicateRoute("a".to_owned())
        );
        assert_eq!(RouteCatalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }
}
