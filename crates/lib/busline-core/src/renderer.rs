use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info};
use typed_builder::TypedBuilder;

use crate::error::CatalogError;
use crate::route::{Route, RouteCatalog, RouteName};
use crate::selection::Selection;
use crate::surface::{LayerId, LineStyle, MapSurface};

pub const DEFAULT_LINE_WEIGHT: f64 = 5.0;
pub const DEFAULT_LINE_OPACITY: f64 = 0.7;
pub const DEFAULT_FIT_PADDING: f64 = 0.1;

/// Draws route lines on the surface and keeps track of the layers it added.
#[derive(TypedBuilder, Debug)]
pub struct RouteRenderer {
    #[builder(default = DEFAULT_LINE_WEIGHT)]
    weight: f64,
    #[builder(default = DEFAULT_LINE_OPACITY)]
    opacity: f64,
    #[builder(default = DEFAULT_FIT_PADDING)]
    fit_padding: f64,
    #[builder(default)]
    lines: IndexMap<RouteName, LayerId>,
}

impl RouteRenderer {
    /// Replaces the drawn lines with the lines of the selected routes.
    ///
    /// When a single route is drawn the viewport is fitted to it. An unknown route is
    /// reported before any line is removed.
    pub fn draw<S: MapSurface>(
        &mut self,
        surface: &mut S,
        catalog: &RouteCatalog,
        selection: &Selection,
    ) -> Result<(), CatalogError> {
        let routes: Vec<&Arc<Route>> = match selection {
            Selection::All => catalog.routes().collect(),
            Selection::Route(name) => vec![catalog.get(name)?],
        };

        self.clear(surface);
        for route in routes.iter() {
            let layer = surface.add_polyline(route.path(), self.line_style(route));
            self.lines.insert(route.name().clone(), layer);
        }

        if let [route] = routes.as_slice() {
            debug!("Fitting the view to {}", route.name());
            surface.fit_bounds(route.bounds().pad(self.fit_padding));
        }
        info!("Drew {} route lines for {}", self.lines.len(), selection);
        Ok(())
    }

    pub fn clear<S: MapSurface>(&mut self, surface: &mut S) {
        self.lines
            .drain(..)
            .for_each(|(_, layer)| surface.remove_layer(layer));
    }

    pub fn lines(&self) -> &IndexMap<RouteName, LayerId> {
        &self.lines
    }

    pub fn line_style(&self, route: &Route) -> LineStyle {
        LineStyle {
            color: route.color(),
            weight: self.weight,
            opacity: self.opacity,
        }
    }
}
