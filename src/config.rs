use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub minimap: MinimapConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f64,
    /// Screen pixels per ray
    #[serde(default = "default_wall_strip_width")]
    pub wall_strip_width: f64,
}

#[derive(Debug, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
    #[serde(default = "default_turn_speed_degrees")]
    pub turn_speed_degrees: f64,
    #[serde(default = "default_viewer_radius")]
    pub radius: f64,
    #[serde(default = "default_start_heading_degrees")]
    pub start_heading_degrees: f64,
    /// World position; defaults to (screen_height / 2, screen_height / 2)
    #[serde(default)]
    pub start_x: Option<f64>,
    #[serde(default)]
    pub start_y: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MinimapConfig {
    #[serde(default = "default_minimap_scale")]
    pub scale: f64,
    #[serde(default = "default_show_rays")]
    pub show_rays: bool,
    #[serde(default = "default_heading_line_length")]
    pub heading_line_length: f64,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_ceiling_r")]
    pub ceiling_r: u8,
    #[serde(default = "default_ceiling_g")]
    pub ceiling_g: u8,
    #[serde(default = "default_ceiling_b")]
    pub ceiling_b: u8,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_input_log: bool,
    #[serde(default = "default_input_log_path")]
    pub input_log_path: String,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

// Default values
fn default_tile_size() -> f64 { 64.0 }
fn default_fov_degrees() -> f64 { 60.0 }
fn default_wall_strip_width() -> f64 { 1.0 }
fn default_move_speed() -> f64 { 2.0 }
fn default_turn_speed_degrees() -> f64 { 2.0 }
fn default_viewer_radius() -> f64 { 3.0 }
fn default_start_heading_degrees() -> f64 { 90.0 }
fn default_minimap_scale() -> f64 { 0.2 }
fn default_show_rays() -> bool { true }
fn default_heading_line_length() -> f64 { 30.0 }
fn default_window_title() -> String { "RustCaster".to_string() }
fn default_bg_r() -> u8 { 125 }
fn default_bg_g() -> u8 { 124 }
fn default_bg_b() -> u8 { 122 }
fn default_ceiling_r() -> u8 { 33 }
fn default_ceiling_g() -> u8 { 33 }
fn default_ceiling_b() -> u8 { 33 }
fn default_input_log_path() -> String { "input_log.json".to_string() }
fn default_snapshot_path() -> String { "frame_snapshot.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov_degrees(),
            wall_strip_width: default_wall_strip_width(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            turn_speed_degrees: default_turn_speed_degrees(),
            radius: default_viewer_radius(),
            start_heading_degrees: default_start_heading_degrees(),
            start_x: None,
            start_y: None,
        }
    }
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            scale: default_minimap_scale(),
            show_rays: default_show_rays(),
            heading_line_length: default_heading_line_length(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            ceiling_r: default_ceiling_r(),
            ceiling_g: default_ceiling_g(),
            ceiling_b: default_ceiling_b(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_input_log: false,
            input_log_path: default_input_log_path(),
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

/// Narrowest strip is one pixel: one ray per screen column
pub const MIN_WALL_STRIP_WIDTH: f64 = 1.0;

impl Config {
    /// Load configuration from `config.toml`, or use defaults if it is
    /// missing or unusable
    pub fn load() -> Self {
        let path = Path::new(CONFIG_PATH);
        if !path.exists() {
            info!("No {} found, using default configuration", CONFIG_PATH);
            return Config::default();
        }
        match Self::load_from(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("{}: {}", CONFIG_PATH, e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("grid.tile_size", self.grid.tile_size)?;
        let strip = self.camera.wall_strip_width;
        if !(strip.is_finite() && strip >= MIN_WALL_STRIP_WIDTH) {
            return Err(ConfigError::Invalid {
                field: "camera.wall_strip_width",
                reason: format!("must be at least {} pixel, got {}", MIN_WALL_STRIP_WIDTH, strip),
            });
        }
        require_positive("viewer.move_speed", self.viewer.move_speed)?;
        require_positive("viewer.turn_speed_degrees", self.viewer.turn_speed_degrees)?;
        require_positive("minimap.scale", self.minimap.scale)?;

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_degrees",
                reason: format!("must be between 0 and 180 exclusive, got {}", fov),
            });
        }
        Ok(())
    }

    pub fn fov_radians(&self) -> f64 {
        self.camera.fov_degrees.to_radians()
    }

    pub fn turn_speed_radians(&self) -> f64 {
        self.viewer.turn_speed_degrees.to_radians()
    }

    pub fn start_heading_radians(&self) -> f64 {
        self.viewer.start_heading_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.grid.tile_size, 64.0);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.viewer.start_x, None);
        assert!(config.minimap.show_rays);
        assert!(!config.logging.enable_input_log);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml_str("[viewer]\nmove_speed = 4.5\nstart_x = 100.0\n").unwrap();
        assert_eq!(config.viewer.move_speed, 4.5);
        assert_eq!(config.viewer.start_x, Some(100.0));
        assert_eq!(config.viewer.turn_speed_degrees, 2.0);
    }

    #[test]
    fn test_invalid_fov_rejected() {
        let err = Config::from_toml_str("[camera]\nfov_degrees = 180.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera.fov_degrees", .. }));
    }

    #[test]
    fn test_non_positive_tile_rejected() {
        let err = Config::from_toml_str("[grid]\ntile_size = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "grid.tile_size", .. }));
    }

    #[test]
    fn test_sub_pixel_strip_width_rejected() {
        for value in ["1e-12", "0.5", "0.0", "-2.0", "inf"] {
            let text = format!("[camera]\nwall_strip_width = {}\n", value);
            let err = Config::from_toml_str(&text).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "camera.wall_strip_width", .. }),
                "{} should be rejected",
                value
            );
        }
        assert!(Config::from_toml_str("[camera]\nwall_strip_width = 1.0\n").is_ok());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::from_toml_str("[camera\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
