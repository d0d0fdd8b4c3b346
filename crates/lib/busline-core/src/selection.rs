use std::fmt;

use log::info;

use crate::error::CatalogError;
use crate::route::{RouteCatalog, RouteName};

pub const ALL_ROUTES_VALUE: &str = "all";
pub const ALL_ROUTES_LABEL: &str = "Show All Routes";

/// Routes chosen in the route selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Route(RouteName),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL_ROUTES_VALUE),
            Selection::Route(name) => write!(f, "{}", name),
        }
    }
}

impl Selection {
    /// Parses a selector value, checking that a route value names a catalog route.
    pub fn parse(value: &str, catalog: &RouteCatalog) -> Result<Self, CatalogError> {
        if value == ALL_ROUTES_VALUE {
            return Ok(Selection::All);
        }
        let name = RouteName::from(value);
        if !catalog.contains(&name) {
            return Err(CatalogError::UnknownRoute(value.to_owned()));
        }
        Ok(Selection::Route(name))
    }

    pub fn includes(&self, route: &RouteName) -> bool {
        match self {
            Selection::All => true,
            Selection::Route(name) => name == route,
        }
    }
}

/// One entry of the route selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: Selection,
    pub label: String,
}

/// Entries of the route selector: all routes first, then every route in catalog order.
pub fn selector_options(catalog: &RouteCatalog) -> Vec<SelectorOption> {
    let mut options = Vec::with_capacity(catalog.len() + 1);
    options.push(SelectorOption {
        value: Selection::All,
        label: ALL_ROUTES_LABEL.to_owned(),
    });
    options.extend(catalog.names().map(|name| SelectorOption {
        value: Selection::Route(name.clone()),
        label: name.to_string(),
    }));
    info!("Route selector has {} options", options.len());
    options
}
