use log::info;
use typed_builder::TypedBuilder;

use crate::animator::{Bus, BusAnimator};
use crate::controller::SelectionController;
use crate::error::{CatalogError, MapError, SettingsError};
use crate::renderer::RouteRenderer;
use crate::route::RouteCatalog;
use crate::selection::{selector_options, Selection, SelectorOption};
use crate::surface::MapSurface;

/// Everything one map instance needs: the surface, the route data, the drawn route
/// lines and the buses. Several contexts can live side by side.
#[derive(TypedBuilder)]
pub struct AppContext<S: MapSurface> {
    surface: S,
    catalog: RouteCatalog,
    #[builder(default = RouteRenderer::builder().build())]
    renderer: RouteRenderer,
    #[builder(default = BusAnimator::builder().build())]
    animator: BusAnimator,
    controller: SelectionController,
    #[builder(default)]
    ticks: u64,
}

impl<S: MapSurface> AppContext<S> {
    /// Shows the initial view with every route drawn and a bus at the start of each route.
    pub fn start(&mut self) -> Result<(), MapError> {
        info!("Starting map with {} routes", self.catalog.len());
        self.surface.set_view(self.controller.initial_view());
        self.renderer
            .draw(&mut self.surface, &self.catalog, &Selection::All)?;
        self.animator.initialize(&mut self.surface, &self.catalog)?;
        Ok(())
    }

    /// Replaces the buses with a fresh set. The current selection stays in effect.
    pub fn reinitialize(&mut self) -> Result<(), SettingsError> {
        self.animator.initialize(&mut self.surface, &self.catalog)?;
        self.controller
            .refresh_visibility(&mut self.surface, &mut self.animator);
        Ok(())
    }

    pub fn tick(&mut self) {
        self.animator.tick(&mut self.surface);
        self.ticks += 1;
    }

    pub fn select(&mut self, selection: Selection) -> Result<(), CatalogError> {
        self.controller.on_change(
            &mut self.surface,
            &self.catalog,
            &mut self.renderer,
            &mut self.animator,
            selection,
        )
    }

    /// Applies a raw selector value such as `all` or `Route-2`.
    pub fn select_value(&mut self, value: &str) -> Result<(), CatalogError> {
        let selection = Selection::parse(value, &self.catalog)?;
        self.select(selection)
    }

    pub fn options(&self) -> Vec<SelectorOption> {
        selector_options(&self.catalog)
    }

    pub fn selection(&self) -> &Selection {
        self.controller.current()
    }

    pub fn buses(&self) -> &[Bus] {
        self.animator.buses()
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub fn renderer(&self) -> &RouteRenderer {
        &self.renderer
    }

    pub fn animator(&self) -> &BusAnimator {
        &self.animator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
