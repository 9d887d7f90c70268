use crate::layout::LayoutConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "planner.toml";
pub const ENV_PREFIX: &str = "PLANNER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Row errors listed in an import report before the rest are summarized.
    pub max_reported_errors: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_reported_errors: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub layout: LayoutConfig,
    pub import: ImportConfig,
}

impl PlannerConfig {
    /// Defaults, then `planner.toml` in the working directory if present, then
    /// `PLANNER_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Same layering with an explicit TOML path. A missing file is not an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: PlannerConfig = Figment::from(Serialized::defaults(PlannerConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        if layout.grid_end_hour > 23 {
            return Err(ConfigError::InvalidLayout(format!(
                "grid_end_hour {} is past 23",
                layout.grid_end_hour
            )));
        }
        if layout.grid_start_hour > layout.grid_end_hour {
            return Err(ConfigError::InvalidLayout(format!(
                "grid_start_hour {} is after grid_end_hour {}",
                layout.grid_start_hour, layout.grid_end_hour
            )));
        }
        if !(layout.hour_height_px.is_finite() && layout.hour_height_px > 0.0) {
            return Err(ConfigError::InvalidLayout(format!(
                "hour_height_px must be positive (got {})",
                layout.hour_height_px
            )));
        }
        Ok(())
    }
}
