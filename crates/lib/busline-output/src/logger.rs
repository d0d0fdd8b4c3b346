use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct LogSettings {
    pub log_path: String,
    pub log_level: String,
    pub log_file_name: String,
    pub log_overwrite: bool,
}

pub fn setup_logging(log_level: &str, log_file_path: &Path) -> Result<Config, Box<dyn Error>> {
    let log_level = get_logging_level(log_level);
    let log_file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y.%m.%d %H:%M:%S)} | {({l}):5.5} | {({f}:{L}):>40.40} — {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("x", Box::new(log_file)))
        .build(Root::builder().appender("x").build(log_level))?;
    Ok(config)
}

fn get_logging_level(log_level: &str) -> LevelFilter {
    match log_level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Picks the log file inside `<config_path>/<log_path>/logs`. An existing file is either
/// removed or left alone, in which case a timestamped name is used instead.
pub fn log_file_path(config_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, Box<dyn Error>> {
    let log_path = config_path.join(&log_settings.log_path).join("logs");
    if !log_path.exists() {
        fs::create_dir_all(&log_path)?;
    }

    let log_file_path = log_path.join(&log_settings.log_file_name);
    if !log_file_path.exists() {
        return Ok(log_file_path);
    }
    if log_settings.log_overwrite {
        fs::remove_file(&log_file_path)?;
        return Ok(log_file_path);
    }

    let stamp = Utc::now().format("_%d%m%Y_%H%M%S").to_string();
    let stem = Path::new(&log_settings.log_file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("busline");
    Ok(log_path.join(format!("{}{}.log", stem, stamp)))
}

pub fn initiate_logger(config_path: &Path, log_settings: &LogSettings) -> Result<PathBuf, Box<dyn Error>> {
    let log_file_path = log_file_path(config_path, log_settings)?;
    let logger_config = setup_logging(&log_settings.log_level, &log_file_path)?;
    log4rs::init_config(logger_config)?;
    Ok(log_file_path)
}
