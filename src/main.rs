//! # Rover Helm
//!
//! Drive a club rover over MQTT from a touchscreen or a PS5 DualSense controller.
//!
//! This application fuses touch and gamepad input into shaped drive commands
//! published to the selected rover's pub/sub topics.

use std::time::Instant;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use rover_helm::config::Config;
use rover_helm::drive::RoverDriver;
use rover_helm::error::RoverHelmError;
use rover_helm::input::{DummySource, FusedSource, GamepadSource, InputSource};
use rover_helm::link::{ConnectionManager, MqttTransport};
use rover_helm::telemetry::SessionLog;

/// Configuration file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of ticks between status log messages
const LOG_INTERVAL_TICKS: u64 = 200;

/// Main entry point for Rover Helm application
///
/// Initializes the application and runs the control loop that polls the
/// input sources and publishes drive commands once per tick.
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load and validate the TOML configuration
///    - Set up logging with tracing subscriber
///    - Open the game controller, falling back to touch-only input
///    - Wire the MQTT transport into the connection manager and driver
///
/// 2. **Main Loop**
///    - Tick the driver at the configured cadence (20Hz by default)
///    - Log status every 200 ticks (~10 seconds)
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Publish a final stop command
///    - Close the link and the session log
///    - Clean exit
///
/// # Errors
///
/// Returns error if:
/// - The configuration file exists but cannot be parsed or fails validation
///
/// A missing configuration file falls back to the built-in defaults. A
/// missing game controller is not fatal either; the driver runs on touch
/// input alone and keeps retrying the rover link.
///
/// # Examples
///
/// Run the application:
/// ```bash
/// cargo run --release -- config/default.toml
/// ```
///
/// Expected output:
/// ```text
/// INFO rover_helm: Rover Helm v0.1.0 starting...
/// INFO rover_helm::input::gamepad: Using game controller DualSense Wireless Controller at /dev/input/event5
/// INFO rover_helm: Driving Rover 2 at tcp://172.24.1.184:1883
/// INFO rover_helm: 200 ticks, link up to Rover 2, speed multiplier 40
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    // A missing file falls back to the defaults; an invalid one is fatal
    let (config, loaded_from_file) = match Config::load(&config_path) {
        Ok(config) => (config, true),
        Err(RoverHelmError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            (Config::built_in(), false)
        }
        Err(e) => return Err(e.into()),
    };

    // Initialize logging, mirrored into the telemetry directory when enabled
    let _log_guard = if config.telemetry.enabled {
        let file_appender =
            tracing_appender::rolling::daily(&config.telemetry.log_dir, "rover-helm.log");
        let (log_file, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stdout.and(log_file))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter()).init();
        None
    };

    info!("Rover Helm v{} starting...", env!("CARGO_PKG_VERSION"));
    if loaded_from_file {
        info!("Configuration loaded from {}", config_path);
    } else {
        warn!("No configuration at {}, using built-in defaults", config_path);
    }

    // Input: touchscreen fused with a physical controller when one is present
    let mut source = build_input_source(&config);

    // Link and driver
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let transport = MqttTransport::new(events_tx, config.keep_alive());
    let link = ConnectionManager::new(Box::new(transport), events_rx);
    let mut driver = RoverDriver::new(link, config.rover_registry(), config.drive_tuning());

    if config.telemetry.enabled {
        match SessionLog::open(
            &config.telemetry.log_dir,
            config.telemetry.max_records_per_file,
            config.telemetry.max_files_to_keep,
        ) {
            Ok(log) => driver = driver.with_session_log(log),
            Err(e) => warn!("Session log disabled: {}", e),
        }
    }

    let rover = driver.selected_rover();
    info!("Driving {} at {}", rover.name(), rover.address());
    info!("Press Ctrl+C to exit");

    let mut tick_interval = interval(config.tick_interval());
    let mut tick_count: u64 = 0;

    // Main control loop
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                driver.tick(source.as_mut(), Instant::now());
                tick_count += 1;

                // Log status every LOG_INTERVAL_TICKS (~10 seconds at 20Hz)
                if tick_count % LOG_INTERVAL_TICKS == 0 {
                    let link_state = if driver.is_connected() { "up" } else { "down" };
                    info!(
                        "{} ticks, link {} to {}, speed multiplier {}",
                        tick_count,
                        link_state,
                        driver.selected_rover().name(),
                        driver.speed_multiplier()
                    );
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    driver.shutdown();
    info!("Total ticks driven: {}", tick_count);

    Ok(())
}

/// The log filter: `RUST_LOG` when set, INFO otherwise.
fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into())
}

/// Builds the fused input source from the configuration.
///
/// A configured device path is opened directly; otherwise the controller is
/// detected by vendor/product id. Either way a missing controller demotes
/// the physical side to a dummy so touch input still works.
fn build_input_source(config: &Config) -> Box<dyn InputSource> {
    let touch = config.touch_source();
    let physical = if config.gamepad.device_path.is_empty() {
        GamepadSource::open(config.gamepad.vendor_id, config.gamepad.product_id)
    } else {
        GamepadSource::open_path(&config.gamepad.device_path)
    };

    match physical {
        Ok(pad) => Box::new(FusedSource::new(touch, pad)),
        Err(e) => {
            warn!("No game controller ({}), touch input only", e);
            Box::new(FusedSource::new(touch, DummySource::new()))
        }
    }
}
