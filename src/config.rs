//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::drive::{DriveTuning, RoverEndpoint, RoverRegistry};
use crate::error::Result;
use crate::input::gamepad::{DUALSENSE_PRODUCT_ID, DUALSENSE_VENDOR_ID};
use crate::input::touch::VirtualJoystick;
use crate::input::TouchSource;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub rovers: Vec<RoverConfig>,
    pub drive: DriveConfig,
    pub shaping: ShapingConfig,
    pub link: LinkConfig,
    pub touch: TouchConfig,
    pub gamepad: GamepadConfig,
    pub telemetry: TelemetryConfig,
}

/// One selectable rover endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct RoverConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
}

/// Drive pipeline configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DriveConfig {
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,

    #[serde(default = "default_initial_speed_multiplier")]
    pub initial_speed_multiplier: i32,

    #[serde(default = "default_max_speed_multiplier")]
    pub max_speed_multiplier: i32,

    #[serde(default = "default_boost_speed")]
    pub boost_speed: i32,

    #[serde(default = "default_kick_hold_angle")]
    pub kick_hold_angle: i32,

    #[serde(default = "default_kick_release_angle")]
    pub kick_release_angle: i32,

    #[serde(default = "default_orbit_default_radius")]
    pub orbit_default_radius: f32,

    #[serde(default = "default_orbit_distance_max_age_ms")]
    pub orbit_distance_max_age_ms: u64,

    #[serde(default = "default_orbit_ranging_interval")]
    pub orbit_ranging_interval: u32,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Stick response shaping configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ShapingConfig {
    #[serde(default = "default_left_expo")]
    pub left_expo: f32,

    #[serde(default = "default_right_expo")]
    pub right_expo: f32,
}

/// Pub/sub link configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LinkConfig {
    #[serde(default = "default_retry_cooldown_ticks")]
    pub retry_cooldown_ticks: i32,

    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

/// On-screen joystick geometry
#[derive(Debug, Deserialize, Clone)]
pub struct TouchConfig {
    #[serde(default = "default_space_size")]
    pub space_size: f32,

    #[serde(default = "default_inactive_size")]
    pub inactive_size: f32,

    #[serde(default = "default_pad_size")]
    pub pad_size: f32,

    #[serde(default = "default_left_centre")]
    pub left_centre: [f32; 2],

    #[serde(default = "default_right_centre")]
    pub right_centre: [f32; 2],
}

/// Physical gamepad configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GamepadConfig {
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,

    #[serde(default = "default_product_id")]
    pub product_id: u16,
}

/// Session log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,
}

// Default value functions
fn default_deadzone() -> f32 { 0.1 }
fn default_initial_speed_multiplier() -> i32 { 40 }
fn default_max_speed_multiplier() -> i32 { 300 }
fn default_boost_speed() -> i32 { 300 }
fn default_kick_hold_angle() -> i32 { 90 }
fn default_kick_release_angle() -> i32 { 165 }
fn default_orbit_default_radius() -> f32 { 150.0 }
fn default_orbit_distance_max_age_ms() -> u64 { 2000 }
fn default_orbit_ranging_interval() -> u32 { 10 }
fn default_tick_interval_ms() -> u64 { 50 }

fn default_left_expo() -> f32 { 0.75 }
fn default_right_expo() -> f32 { 0.90 }

fn default_retry_cooldown_ticks() -> i32 { 120 }
fn default_keep_alive_secs() -> u64 { 5 }

fn default_space_size() -> f32 { 400.0 }
fn default_inactive_size() -> f32 { 130.0 }
fn default_pad_size() -> f32 { 100.0 }
fn default_left_centre() -> [f32; 2] { [300.0, 800.0] }
fn default_right_centre() -> [f32; 2] { [1620.0, 800.0] }

fn default_vendor_id() -> u16 { DUALSENSE_VENDOR_ID }
fn default_product_id() -> u16 { DUALSENSE_PRODUCT_ID }

fn default_telemetry_enabled() -> bool { true }
fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rover_helm::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in defaults, as if every field were missing from the file.
    #[must_use]
    pub fn built_in() -> Self {
        Self {
            rovers: Vec::new(),
            drive: DriveConfig {
                deadzone: default_deadzone(),
                initial_speed_multiplier: default_initial_speed_multiplier(),
                max_speed_multiplier: default_max_speed_multiplier(),
                boost_speed: default_boost_speed(),
                kick_hold_angle: default_kick_hold_angle(),
                kick_release_angle: default_kick_release_angle(),
                orbit_default_radius: default_orbit_default_radius(),
                orbit_distance_max_age_ms: default_orbit_distance_max_age_ms(),
                orbit_ranging_interval: default_orbit_ranging_interval(),
                tick_interval_ms: default_tick_interval_ms(),
            },
            shaping: ShapingConfig {
                left_expo: default_left_expo(),
                right_expo: default_right_expo(),
            },
            link: LinkConfig {
                retry_cooldown_ticks: default_retry_cooldown_ticks(),
                keep_alive_secs: default_keep_alive_secs(),
            },
            touch: TouchConfig {
                space_size: default_space_size(),
                inactive_size: default_inactive_size(),
                pad_size: default_pad_size(),
                left_centre: default_left_centre(),
                right_centre: default_right_centre(),
            },
            gamepad: GamepadConfig {
                device_path: String::new(),
                vendor_id: default_vendor_id(),
                product_id: default_product_id(),
            },
            telemetry: TelemetryConfig {
                enabled: default_telemetry_enabled(),
                log_dir: default_log_dir(),
                max_records_per_file: default_max_records_per_file(),
                max_files_to_keep: default_max_files_to_keep(),
            },
        }
    }

    /// The rover endpoints to cycle through with `Select`.
    ///
    /// An empty `[[rovers]]` list falls back to the built-in club table.
    #[must_use]
    pub fn rover_registry(&self) -> RoverRegistry {
        let endpoints = self
            .rovers
            .iter()
            .map(|rover| RoverEndpoint::new(rover.name.clone(), rover.host.clone(), rover.port))
            .collect();
        RoverRegistry::new(endpoints)
    }

    /// The drive tuning assembled from the drive, shaping and link sections.
    #[must_use]
    pub fn drive_tuning(&self) -> DriveTuning {
        DriveTuning {
            deadzone: self.drive.deadzone,
            left_expo: self.shaping.left_expo,
            right_expo: self.shaping.right_expo,
            initial_speed_multiplier: self.drive.initial_speed_multiplier,
            max_speed_multiplier: self.drive.max_speed_multiplier,
            boost_speed: self.drive.boost_speed,
            kick_hold_angle: self.drive.kick_hold_angle,
            kick_release_angle: self.drive.kick_release_angle,
            orbit_default_radius: self.drive.orbit_default_radius,
            orbit_distance_max_age: Duration::from_millis(self.drive.orbit_distance_max_age_ms),
            orbit_ranging_interval: self.drive.orbit_ranging_interval,
            retry_cooldown_ticks: self.link.retry_cooldown_ticks,
        }
    }

    /// A touch source laid out per the touch section.
    #[must_use]
    pub fn touch_source(&self) -> TouchSource {
        let left = VirtualJoystick::with_sizes(
            self.touch.space_size,
            self.touch.inactive_size,
            self.touch.pad_size,
            self.touch.left_centre[0],
            self.touch.left_centre[1],
        );
        let right = VirtualJoystick::with_sizes(
            self.touch.space_size,
            self.touch.inactive_size,
            self.touch.pad_size,
            self.touch.right_centre[0],
            self.touch.right_centre[1],
        );
        TouchSource::new(left, right)
    }

    /// MQTT keep-alive interval.
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.link.keep_alive_secs)
    }

    /// Control tick cadence.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.drive.tick_interval_ms)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        // Validate rover entries
        for rover in &self.rovers {
            if rover.name.is_empty() {
                return Err(crate::error::RoverHelmError::Config(
                    toml::de::Error::custom("rover name cannot be empty")
                ));
            }
            if rover.host.is_empty() {
                return Err(crate::error::RoverHelmError::Config(
                    toml::de::Error::custom("rover host cannot be empty")
                ));
            }
            if rover.port == 0 {
                return Err(crate::error::RoverHelmError::Config(
                    toml::de::Error::custom("rover port cannot be 0")
                ));
            }
        }

        // Validate the deadzone
        if self.drive.deadzone < 0.0 || self.drive.deadzone > 0.25 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("deadzone must be between 0.0 and 0.25")
            ));
        }

        // Validate expo curves
        for (name, value) in [
            ("left_expo", self.shaping.left_expo),
            ("right_expo", self.shaping.right_expo),
        ] {
            if value < 0.0 || value > 1.0 {
                return Err(crate::error::RoverHelmError::Config(
                    toml::de::Error::custom(format!("{} must be between 0.0 and 1.0", name))
                ));
            }
        }

        // Validate speed settings
        if self.drive.max_speed_multiplier <= 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("max_speed_multiplier must be greater than 0")
            ));
        }

        if self.drive.initial_speed_multiplier < 0
            || self.drive.initial_speed_multiplier > self.drive.max_speed_multiplier
        {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("initial_speed_multiplier must be between 0 and max_speed_multiplier")
            ));
        }

        if self.drive.boost_speed <= 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("boost_speed must be greater than 0")
            ));
        }

        // Validate kick servo angles
        for (name, value) in [
            ("kick_hold_angle", self.drive.kick_hold_angle),
            ("kick_release_angle", self.drive.kick_release_angle),
        ] {
            if value < 0 || value > 180 {
                return Err(crate::error::RoverHelmError::Config(
                    toml::de::Error::custom(format!("{} must be between 0 and 180", name))
                ));
            }
        }

        // Validate orbit settings
        if self.drive.orbit_default_radius <= 0.0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("orbit_default_radius must be greater than 0")
            ));
        }

        if self.drive.orbit_distance_max_age_ms == 0 || self.drive.orbit_distance_max_age_ms > 60000 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("orbit_distance_max_age_ms must be between 1 and 60000")
            ));
        }

        if self.drive.orbit_ranging_interval == 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("orbit_ranging_interval must be greater than 0")
            ));
        }

        // Validate timing fields
        if self.drive.tick_interval_ms == 0 || self.drive.tick_interval_ms > 1000 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("tick_interval_ms must be between 1 and 1000")
            ));
        }

        if self.link.retry_cooldown_ticks < 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("retry_cooldown_ticks cannot be negative")
            ));
        }

        if self.link.keep_alive_secs == 0 || self.link.keep_alive_secs > 600 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("keep_alive_secs must be between 1 and 600")
            ));
        }

        // Validate touch geometry
        if self.touch.space_size <= 0.0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("space_size must be greater than 0")
            ));
        }

        if self.touch.inactive_size < 0.0 || self.touch.pad_size < 0.0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("inactive_size and pad_size cannot be negative")
            ));
        }

        if self.touch.inactive_size + self.touch.pad_size >= self.touch.space_size {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("inactive_size plus pad_size must leave room inside space_size")
            ));
        }

        // Validate telemetry configuration
        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("telemetry log_dir cannot be empty when enabled")
            ));
        }

        if self.telemetry.max_records_per_file == 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("max_records_per_file must be greater than 0")
            ));
        }

        if self.telemetry.max_files_to_keep == 0 {
            return Err(crate::error::RoverHelmError::Config(
                toml::de::Error::custom("max_files_to_keep must be greater than 0")
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config::built_in()
    }

    #[test]
    fn test_built_in_config_is_valid() {
        let config = create_valid_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[drive]
deadzone = 0.15

[shaping]

[link]

[touch]

[gamepad]

[telemetry]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert!((config.drive.deadzone - 0.15).abs() < 0.001);
        assert_eq!(config.drive.initial_speed_multiplier, 40);
        assert!(config.rovers.is_empty());
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[drive]
deadzone = 0.5

[shaping]

[link]

[touch]

[gamepad]

[telemetry]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_gamepad_ids_accept_hex() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[drive]

[shaping]

[link]

[touch]

[gamepad]
vendor_id = 0x054c
product_id = 0x0ce6

[telemetry]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.gamepad.vendor_id, 0x054c);
        assert_eq!(config.gamepad.product_id, 0x0ce6);
    }

    #[test]
    fn test_rover_entries_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[[rovers]]
name = "Bench rover"
host = "localhost"
port = 1883

[drive]

[shaping]

[link]

[touch]

[gamepad]

[telemetry]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        let registry = config.rover_registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).address(), "tcp://localhost:1883");
    }

    #[test]
    fn test_empty_rover_list_falls_back_to_club_table() {
        let config = create_valid_config();
        assert_eq!(config.rover_registry().len(), 6);
    }

    #[test]
    fn test_rover_with_empty_name() {
        let mut config = create_valid_config();
        config.rovers = vec![RoverConfig {
            name: String::new(),
            host: "localhost".to_string(),
            port: 1883,
        }];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rover_with_empty_host() {
        let mut config = create_valid_config();
        config.rovers = vec![RoverConfig {
            name: "Bench".to_string(),
            host: String::new(),
            port: 1883,
        }];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rover_with_zero_port() {
        let mut config = create_valid_config();
        config.rovers = vec![RoverConfig {
            name: "Bench".to_string(),
            host: "localhost".to_string(),
            port: 0,
        }];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deadzone_negative() {
        let mut config = create_valid_config();
        config.drive.deadzone = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deadzone_too_high() {
        let mut config = create_valid_config();
        config.drive.deadzone = 0.3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_left_expo_negative() {
        let mut config = create_valid_config();
        config.shaping.left_expo = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_right_expo_too_high() {
        let mut config = create_valid_config();
        config.shaping.right_expo = 1.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_speed_multiplier_zero() {
        let mut config = create_valid_config();
        config.drive.max_speed_multiplier = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_speed_above_max() {
        let mut config = create_valid_config();
        config.drive.initial_speed_multiplier = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_speed_negative() {
        let mut config = create_valid_config();
        config.drive.initial_speed_multiplier = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boost_speed_zero() {
        let mut config = create_valid_config();
        config.drive.boost_speed = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_kick_hold_angle_out_of_range() {
        let mut config = create_valid_config();
        config.drive.kick_hold_angle = 181;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_kick_release_angle_negative() {
        let mut config = create_valid_config();
        config.drive.kick_release_angle = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_orbit_radius_zero() {
        let mut config = create_valid_config();
        config.drive.orbit_default_radius = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_orbit_max_age_zero() {
        let mut config = create_valid_config();
        config.drive.orbit_distance_max_age_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_orbit_max_age_too_high() {
        let mut config = create_valid_config();
        config.drive.orbit_distance_max_age_ms = 60001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_orbit_ranging_interval_zero() {
        let mut config = create_valid_config();
        config.drive.orbit_ranging_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_zero() {
        let mut config = create_valid_config();
        config.drive.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_too_high() {
        let mut config = create_valid_config();
        config.drive.tick_interval_ms = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_retry_cooldown_negative() {
        let mut config = create_valid_config();
        config.link.retry_cooldown_ticks = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keep_alive_zero() {
        let mut config = create_valid_config();
        config.link.keep_alive_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_keep_alive_too_high() {
        let mut config = create_valid_config();
        config.link.keep_alive_secs = 601;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_space_size_zero() {
        let mut config = create_valid_config();
        config.touch.space_size = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_touch_bands() {
        let mut config = create_valid_config();
        config.touch.inactive_size = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_touch_bands_filling_the_space() {
        let mut config = create_valid_config();
        config.touch.inactive_size = 200.0;
        config.touch.pad_size = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_enabled() {
        let mut config = create_valid_config();
        config.telemetry.enabled = true;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_disabled() {
        let mut config = create_valid_config();
        config.telemetry.enabled = false;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_records_per_file_zero() {
        let mut config = create_valid_config();
        config.telemetry.max_records_per_file = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_files_to_keep_zero() {
        let mut config = create_valid_config();
        config.telemetry.max_files_to_keep = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_drive_tuning_mapping() {
        let config = create_valid_config();
        let tuning = config.drive_tuning();
        assert!((tuning.deadzone - 0.1).abs() < 0.001);
        assert!((tuning.left_expo - 0.75).abs() < 0.001);
        assert!((tuning.right_expo - 0.90).abs() < 0.001);
        assert_eq!(tuning.initial_speed_multiplier, 40);
        assert_eq!(tuning.orbit_distance_max_age, Duration::from_millis(2000));
        assert_eq!(tuning.retry_cooldown_ticks, 120);
    }

    #[test]
    fn test_touch_source_uses_configured_centres() {
        let config = create_valid_config();
        let source = config.touch_source();
        assert_eq!(source.left_pad().knob(), (300.0, 800.0));
        assert_eq!(source.right_pad().knob(), (1620.0, 800.0));
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_deadzone(), 0.1);
        assert_eq!(default_initial_speed_multiplier(), 40);
        assert_eq!(default_max_speed_multiplier(), 300);
        assert_eq!(default_boost_speed(), 300);
        assert_eq!(default_kick_hold_angle(), 90);
        assert_eq!(default_kick_release_angle(), 165);
        assert_eq!(default_orbit_default_radius(), 150.0);
        assert_eq!(default_orbit_distance_max_age_ms(), 2000);
        assert_eq!(default_orbit_ranging_interval(), 10);
        assert_eq!(default_tick_interval_ms(), 50);
        assert_eq!(default_left_expo(), 0.75);
        assert_eq!(default_right_expo(), 0.90);
        assert_eq!(default_retry_cooldown_ticks(), 120);
        assert_eq!(default_keep_alive_secs(), 5);
        assert_eq!(default_space_size(), 400.0);
        assert_eq!(default_inactive_size(), 130.0);
        assert_eq!(default_pad_size(), 100.0);
        assert_eq!(default_vendor_id(), 0x054c);
        assert_eq!(default_product_id(), 0x0ce6);
        assert_eq!(default_telemetry_enabled(), true);
        assert_eq!(default_log_dir(), "./logs");
        assert_eq!(default_max_records_per_file(), 10000);
        assert_eq!(default_max_files_to_keep(), 10);
    }
}
