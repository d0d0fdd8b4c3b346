use std::path::PathBuf;

use serde::Deserialize;

use busline_core::animator::{validate_base_speed, DEFAULT_BASE_SPEED};
use busline_core::error::SettingsError;
use busline_core::geo::LatLng;
use busline_core::renderer::{DEFAULT_FIT_PADDING, DEFAULT_LINE_OPACITY, DEFAULT_LINE_WEIGHT};
use busline_core::route::RouteSettings;
use busline_core::surface::MarkerIcon;
use busline_output::logger::LogSettings;
use busline_output::surface::TileSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct BaseConfig {
    pub simulation_settings: SimSettings,
    pub map_settings: MapSettings,
    #[serde(default)]
    pub tile_settings: TileSettings,
    #[serde(default)]
    pub icon_settings: MarkerIcon,
    pub log_settings: LogSettings,
    /// Replaces the built-in routes when present.
    pub routes: Option<Vec<RouteSettings>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimSettings {
    pub scenario: String,
    #[serde(default = "default_tick_interval")]
    pub tick_interval: u64,
    #[serde(default = "default_base_speed")]
    pub base_speed: f64,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MapSettings {
    pub center: LatLng,
    pub zoom: f64,
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
    #[serde(default = "default_line_weight")]
    pub line_weight: f64,
    #[serde(default = "default_line_opacity")]
    pub line_opacity: f64,
}

impl SimSettings {
    /// Rejects settings that would stall the buses or the tick loop.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_base_speed(self.base_speed)?;
        if self.tick_interval == 0 {
            return Err(SettingsError::ZeroTickInterval);
        }
        Ok(())
    }
}

fn default_tick_interval() -> u64 {
    50
}

fn default_base_speed() -> f64 {
    DEFAULT_BASE_SPEED
}

fn default_fit_padding() -> f64 {
    DEFAULT_FIT_PADDING
}

fn default_line_weight() -> f64 {
    DEFAULT_LINE_WEIGHT
}

fn default_line_opacity() -> f64 {
    DEFAULT_LINE_OPACITY
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config: BaseConfig = toml::from_str(&parsing_result)?;
        config.simulation_settings.validate()?;
        Ok(config)
    }
}
