use log::info;

use crate::animator::BusAnimator;
use crate::error::CatalogError;
use crate::renderer::RouteRenderer;
use crate::route::RouteCatalog;
use crate::selection::Selection;
use crate::surface::{MapSurface, Viewport};

/// Reacts to changes of the route selector.
#[derive(Debug, Clone)]
pub struct SelectionController {
    initial_view: Viewport,
    current: Selection,
}

impl SelectionController {
    pub fn new(initial_view: Viewport) -> Self {
        Self {
            initial_view,
            current: Selection::All,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn initial_view(&self) -> Viewport {
        self.initial_view
    }

    /// Redraws the route lines for the selection, shows only the buses on the selected
    /// routes and, when all routes are selected, returns to the initial view.
    pub fn on_change<S: MapSurface>(
        &mut self,
        surface: &mut S,
        catalog: &RouteCatalog,
        renderer: &mut RouteRenderer,
        animator: &mut BusAnimator,
        selection: Selection,
    ) -> Result<(), CatalogError> {
        info!("Route selection changed to {}", selection);
        renderer.draw(surface, catalog, &selection)?;
        self.apply_visibility(surface, animator, &selection);
        if selection == Selection::All {
            surface.set_view(self.initial_view);
        }
        self.current = selection;
        Ok(())
    }

    /// Shows the buses of the current selection and hides the rest.
    pub fn refresh_visibility<S: MapSurface>(&self, surface: &mut S, animator: &mut BusAnimator) {
        self.apply_visibility(surface, animator, &self.current);
    }

    fn apply_visibility<S: MapSurface>(
        &self,
        surface: &mut S,
        animator: &mut BusAnimator,
        selection: &Selection,
    ) {
        animator.set_visibility(surface, |route| selection.includes(route));
    }
}
