use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("route {route} has {count} points, at least 2 are needed")]
    TooFewPoints { route: String, count: usize },
    #[error("route {0} is not in the catalog")]
    UnknownRoute(String),
    #[error("route {0} is defined more than once")]
    DuplicateRoute(String),
    #[error("catalog has no routes")]
    Empty,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("base speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),
    #[error("tick interval must be longer than zero")]
    ZeroTickInterval,
}

/// Failure of an operation that touches both the routes and the buses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
