use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use busline_core::animator::BusAnimator;
use busline_core::context::AppContext;
use busline_core::controller::SelectionController;
use busline_core::renderer::RouteRenderer;
use busline_core::route::RouteCatalog;
use busline_core::surface::Viewport;
use busline_output::logger::initiate_logger;
use busline_output::surface::CanvasSurface;
use busline_output::ui::MapUIMetadata;

use crate::simulation::config::{BaseConfig, BaseConfigReader};
use crate::simulation::ui::MapRenderer;

pub struct SimulationBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
    metadata: MapUIMetadata,
}

impl SimulationBuilder {
    pub(crate) fn new(base_config_file: &str) -> Self {
        if !Path::new(base_config_file).exists() {
            panic!("Configuration file is not found.");
        }
        let config_path = Path::new(base_config_file)
            .parent()
            .unwrap_or_else(|| {
                panic!("Invalid directory for the configuration file");
            })
            .to_path_buf();

        let config_reader = BaseConfigReader::new(base_config_file);
        match config_reader.parse() {
            Ok(base_config) => {
                let metadata = Self::build_metadata(&base_config, base_config_file);
                Self {
                    base_config,
                    config_path,
                    metadata,
                }
            }
            Err(e) => {
                panic!("Error while parsing the base configuration file: {}", e);
            }
        }
    }

    fn build_metadata(base_config: &BaseConfig, base_config_file: &str) -> MapUIMetadata {
        MapUIMetadata {
            scenario: base_config.simulation_settings.scenario.clone(),
            input_file: base_config_file.to_owned(),
            log_path: base_config.log_settings.log_path.clone(),
            icon: base_config.icon_settings.to_string(),
        }
    }

    pub(crate) fn build(&mut self) -> AppContext<CanvasSurface> {
        match initiate_logger(&self.config_path, &self.base_config.log_settings) {
            Ok(log_file) => self.metadata.log_path = log_file.display().to_string(),
            Err(e) => panic!("Error while initializing the logger: {}", e),
        }

        info!("Building the route catalog...");
        let catalog = self.build_catalog();
        info!("Building the map for {} routes...", catalog.len());
        self.build_context(catalog)
    }

    fn build_catalog(&self) -> RouteCatalog {
        match &self.base_config.routes {
            Some(routes) => RouteCatalog::from_settings(routes)
                .unwrap_or_else(|e| panic!("Invalid routes in the configuration file: {}", e)),
            None => RouteCatalog::bangalore(),
        }
    }

    fn build_context(&self, catalog: RouteCatalog) -> AppContext<CanvasSurface> {
        let map_settings = &self.base_config.map_settings;
        let sim_settings = &self.base_config.simulation_settings;
        let initial_view = Viewport {
            center: map_settings.center,
            zoom: map_settings.zoom,
        };

        let surface = CanvasSurface::builder()
            .view(initial_view)
            .tiles(self.base_config.tile_settings.clone())
            .build();
        let renderer = RouteRenderer::builder()
            .weight(map_settings.line_weight)
            .opacity(map_settings.line_opacity)
            .fit_padding(map_settings.fit_padding)
            .build();
        let mut animator = BusAnimator::builder()
            .base_speed(sim_settings.base_speed)
            .icon(self.base_config.icon_settings.clone())
            .build();
        if let Some(seed) = sim_settings.seed {
            info!("Seeding bus speeds with {}", seed);
            animator = animator.with_seed(seed);
        }

        AppContext::builder()
            .surface(surface)
            .catalog(catalog)
            .renderer(renderer)
            .animator(animator)
            .controller(SelectionController::new(initial_view))
            .build()
    }

    pub(crate) fn metadata(&self) -> MapUIMetadata {
        self.metadata.clone()
    }

    pub(crate) fn renderer(&self) -> MapRenderer {
        MapRenderer::new()
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_config.simulation_settings.tick_interval)
    }
}
