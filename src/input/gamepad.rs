//! # Gamepad Input Module
//!
//! Physical game controller support via the Linux evdev interface.
//!
//! ## Controller Detection
//!
//! Devices under `/dev/input/event*` are matched by vendor/product id. The
//! defaults target the PS5 DualSense (0x054c/0x0ce6, wired and Bluetooth); an
//! explicit device path can be given instead.
//!
//! ## Axis Codes (EV_ABS)
//!
//! | Axis | evdev Code | Range | Maps to |
//! |------|------------|-------|---------|
//! | Left Stick X | ABS_X | 0-255 | left stick x |
//! | Left Stick Y | ABS_Y | 0-255 | left stick y |
//! | Right Stick X | ABS_Z | 0-255 | right stick x |
//! | Right Stick Y | ABS_RZ | 0-255 | right stick y |
//! | D-Pad X | ABS_HAT0X | -1/0/1 | hat x |
//! | D-Pad Y | ABS_HAT0Y | -1/0/1 | hat y (inverted, north = +1) |
//!
//! Stick axes are normalized from 0-255 (128 centre) to [-1, 1], with values
//! inside the near-zero band snapped to exactly 0.
//!
//! ## Button Codes (EV_KEY)
//!
//! | Button | evdev Code | Action |
//! |--------|------------|--------|
//! | Cross (×) | BTN_SOUTH | sling shot |
//! | Circle (○) | BTN_EAST | read distance |
//! | Square (□) | BTN_WEST | speed down |
//! | Triangle (△) | BTN_NORTH | speed up |
//! | L1 | BTN_TL | orbit |
//! | R1 | BTN_TR | lock axis |
//! | L2 (click) | BTN_TL2 | boost |
//! | R2 (click) | BTN_TR2 | kick |
//! | Options | BTN_START | select rover |
//!
//! Device reads happen on a dedicated thread; [`GamepadSource::poll`] drains
//! them onto the caller's thread. When the controller goes away the reader
//! ends and the source reverts to centred sticks with nothing held.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use evdev::{AbsoluteAxisType, Device, InputEvent, Key};
use tracing::{debug, info, warn};

use crate::error::{Result, RoverHelmError};

use super::{Button, ButtonSet, InputSource, StickState};

/// PS5 DualSense vendor ID (Sony)
pub const DUALSENSE_VENDOR_ID: u16 = 0x054c;

/// PS5 DualSense product ID (wired and Bluetooth)
pub const DUALSENSE_PRODUCT_ID: u16 = 0x0ce6;

/// Raw axis centre value.
const AXIS_CENTER: i32 = 128;

/// Decodes raw evdev events into stick, hat and button state.
///
/// Pure state accumulator: no device handle, no threads. The source feeds it
/// from the reader channel; tests feed it synthetic events.
#[derive(Debug, Default)]
pub struct GamepadMapper {
    left: StickState,
    right: StickState,
    hat: StickState,
    buttons: ButtonSet,
}

impl GamepadMapper {
    /// Creates a mapper with centred sticks and released buttons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current left stick state.
    #[must_use]
    pub fn left_stick(&self) -> StickState {
        self.left
    }

    /// Current right stick state.
    #[must_use]
    pub fn right_stick(&self) -> StickState {
        self.right
    }

    /// Current hat state (unit components, north = (0, 1)).
    #[must_use]
    pub fn hat(&self) -> StickState {
        self.hat
    }

    /// Current button states.
    #[must_use]
    pub fn buttons(&self) -> ButtonSet {
        self.buttons
    }

    /// Returns everything to the centred/released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies a single evdev event.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event.kind() {
            evdev::InputEventKind::AbsAxis(axis) => {
                self.process_axis_event(axis, event.value());
            }
            evdev::InputEventKind::Key(key) => {
                self.process_key_event(key, event.value() != 0);
            }
            _ => {
                // Sync and misc events carry nothing we read
            }
        }
    }

    fn process_axis_event(&mut self, axis: AbsoluteAxisType, value: i32) {
        match axis {
            AbsoluteAxisType::ABS_X => {
                let y = self.left.y();
                self.left.set_filtered(Self::normalize_axis(value), y);
            }
            AbsoluteAxisType::ABS_Y => {
                let x = self.left.x();
                self.left.set_filtered(x, Self::normalize_axis(value));
            }
            AbsoluteAxisType::ABS_Z => {
                let y = self.right.y();
                self.right.set_filtered(Self::normalize_axis(value), y);
            }
            AbsoluteAxisType::ABS_RZ => {
                let x = self.right.x();
                self.right.set_filtered(x, Self::normalize_axis(value));
            }
            // evdev reports up as -1; the hat convention here is north = +1
            AbsoluteAxisType::ABS_HAT0X => {
                let y = self.hat.y();
                self.hat.set(value as f32, y);
            }
            AbsoluteAxisType::ABS_HAT0Y => {
                let x = self.hat.x();
                self.hat.set(x, -(value as f32));
            }
            _ => {
                // Gyro, accelerometer and trigger axes are unused
            }
        }
    }

    fn process_key_event(&mut self, key: Key, pressed: bool) {
        let button = match key {
            Key::BTN_SOUTH => Button::SlingShot,
            Key::BTN_EAST => Button::ReadDistance,
            Key::BTN_WEST => Button::SpeedDown,
            Key::BTN_NORTH => Button::SpeedUp,
            Key::BTN_TL => Button::Orbit,
            Key::BTN_TR => Button::LockAxis,
            Key::BTN_TL2 => Button::Boost,
            Key::BTN_TR2 => Button::Kick,
            Key::BTN_START => Button::Select,
            _ => return,
        };
        self.buttons.set(button, pressed);
    }

    #[inline]
    fn normalize_axis(value: i32) -> f32 {
        (((value - AXIS_CENTER) as f32) / 127.0).clamp(-1.0, 1.0)
    }
}

/// Input source backed by a physical game controller.
///
/// # Examples
///
/// ```no_run
/// use rover_helm::input::gamepad::{GamepadSource, DUALSENSE_VENDOR_ID, DUALSENSE_PRODUCT_ID};
/// use rover_helm::input::InputSource;
///
/// let mut source = GamepadSource::open(DUALSENSE_VENDOR_ID, DUALSENSE_PRODUCT_ID)?;
/// source.poll();
/// println!("left stick: {:?}", source.left_stick());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct GamepadSource {
    events: Receiver<InputEvent>,
    mapper: GamepadMapper,
    device_path: String,
    attached: bool,
}

impl GamepadSource {
    /// Detects and opens the first controller matching the given ids.
    ///
    /// Scans `/dev/input/event*` in path order.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no matching device on the system
    /// - `Controller`: `/dev/input` unreadable
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self> {
        let input_dir = Path::new("/dev/input");
        if !input_dir.exists() {
            return Err(RoverHelmError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(input_dir)
            .map_err(|e| RoverHelmError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().starts_with("event"))
                    .unwrap_or(false)
            })
            .collect();
        // Path order keeps device selection deterministic
        paths.sort();

        for path in paths {
            match Device::open(&path) {
                Ok(device) => {
                    let id = device.input_id();
                    debug!(
                        "Found input device: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                        path.display(),
                        id.vendor(),
                        id.product()
                    );
                    if id.vendor() == vendor_id && id.product() == product_id {
                        info!(
                            "Using game controller {} at {}",
                            device.name().unwrap_or("(unnamed)"),
                            path.display()
                        );
                        return Ok(Self::from_device(device, path));
                    }
                }
                Err(e) => {
                    // Usually permission denied; not ours to report
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(RoverHelmError::ControllerNotFound)
    }

    /// Opens an explicit evdev device path without id matching.
    ///
    /// # Errors
    ///
    /// Returns `Controller` if the device cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path).map_err(|e| {
            RoverHelmError::Controller(format!("Failed to open {}: {}", path.display(), e))
        })?;
        info!(
            "Using game controller {} at {}",
            device.name().unwrap_or("(unnamed)"),
            path.display()
        );
        Ok(Self::from_device(device, path.to_path_buf()))
    }

    fn from_device(device: Device, path: PathBuf) -> Self {
        let device_path = path.to_string_lossy().to_string();
        Self {
            events: Self::spawn_reader(device),
            mapper: GamepadMapper::new(),
            device_path,
            attached: true,
        }
    }

    /// Reads the device on its own thread; `fetch_events` blocks, so the
    /// tick loop never does. The thread ends on read failure or when the
    /// source is dropped.
    fn spawn_reader(mut device: Device) -> Receiver<InputEvent> {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || loop {
            match device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    debug!("Controller read ended: {}", e);
                    return;
                }
            }
        });
        rx
    }

    #[cfg(test)]
    fn with_receiver(events: Receiver<InputEvent>, device_path: String) -> Self {
        Self {
            events,
            mapper: GamepadMapper::new(),
            device_path,
            attached: true,
        }
    }

    /// The `/dev/input/eventX` path this source reads from.
    #[must_use]
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// True while the reader thread still has the device.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl InputSource for GamepadSource {
    fn poll(&mut self) {
        if !self.attached {
            return;
        }
        loop {
            match self.events.try_recv() {
                Ok(event) => self.mapper.process_event(&event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Game controller at {} went away", self.device_path);
                    self.mapper.reset();
                    self.attached = false;
                    break;
                }
            }
        }
    }

    fn left_stick(&self) -> StickState {
        self.mapper.left_stick()
    }

    fn right_stick(&self) -> StickState {
        self.mapper.right_stick()
    }

    fn buttons(&self) -> ButtonSet {
        self.mapper.buttons()
    }

    fn hat(&self) -> StickState {
        self.mapper.hat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::EventType;

    fn make_axis_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
        InputEvent::new(EventType::ABSOLUTE, axis.0, value)
    }

    fn make_key_event(key: Key, pressed: bool) -> InputEvent {
        InputEvent::new(EventType::KEY, key.code(), if pressed { 1 } else { 0 })
    }

    // ==================== Axis Mapping Tests ====================

    #[test]
    fn test_mapper_starts_centred() {
        let mapper = GamepadMapper::new();
        assert_eq!(mapper.left_stick(), StickState::zero());
        assert_eq!(mapper.right_stick(), StickState::zero());
        assert_eq!(mapper.hat(), StickState::zero());
        for button in Button::ALL {
            assert!(!mapper.buttons().is_held(button));
        }
    }

    #[test]
    fn test_axis_normalization_extremes() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 255));
        assert!((mapper.left_stick().x() - 1.0).abs() < 0.001);

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 0));
        assert!((mapper.left_stick().x() + 1.0).abs() < 0.001);

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 128));
        assert_eq!(mapper.left_stick().x(), 0.0);
    }

    #[test]
    fn test_near_centre_values_snap_to_zero() {
        let mut mapper = GamepadMapper::new();

        // 129 normalizes to 1/127, inside the near-zero band
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_Y, 129));
        assert_eq!(mapper.left_stick().y(), 0.0);

        // 130 normalizes to 2/127, just outside it
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_Y, 130));
        assert!(mapper.left_stick().y() > 0.0);
    }

    #[test]
    fn test_right_stick_uses_z_axes() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_Z, 255));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_RZ, 0));

        assert!((mapper.right_stick().x() - 1.0).abs() < 0.001);
        assert!((mapper.right_stick().y() + 1.0).abs() < 0.001);
        assert_eq!(mapper.left_stick(), StickState::zero());
    }

    #[test]
    fn test_axes_update_independently() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 255));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_Y, 0));
        assert!((mapper.left_stick().x() - 1.0).abs() < 0.001);
        assert!((mapper.left_stick().y() + 1.0).abs() < 0.001);

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 128));
        assert_eq!(mapper.left_stick().x(), 0.0);
        assert!((mapper.left_stick().y() + 1.0).abs() < 0.001);
    }

    // ==================== Hat Tests ====================

    #[test]
    fn test_hat_north_reads_positive_y() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, -1));
        assert_eq!(mapper.hat(), StickState::new(0.0, 1.0));

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 0));
        assert_eq!(mapper.hat(), StickState::zero());
    }

    #[test]
    fn test_hat_diagonals_combine_axes() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, 1));
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0Y, 1));
        assert_eq!(mapper.hat(), StickState::new(1.0, -1.0));

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_HAT0X, -1));
        assert_eq!(mapper.hat(), StickState::new(-1.0, -1.0));
    }

    // ==================== Button Mapping Tests ====================

    #[test]
    fn test_button_bindings() {
        let bindings = [
            (Key::BTN_SOUTH, Button::SlingShot),
            (Key::BTN_EAST, Button::ReadDistance),
            (Key::BTN_WEST, Button::SpeedDown),
            (Key::BTN_NORTH, Button::SpeedUp),
            (Key::BTN_TL, Button::Orbit),
            (Key::BTN_TR, Button::LockAxis),
            (Key::BTN_TL2, Button::Boost),
            (Key::BTN_TR2, Button::Kick),
            (Key::BTN_START, Button::Select),
        ];

        for (key, button) in bindings {
            let mut mapper = GamepadMapper::new();
            mapper.process_event(&make_key_event(key, true));
            assert!(mapper.buttons().is_held(button), "{:?} should press {:?}", key, button);

            mapper.process_event(&make_key_event(key, false));
            assert!(!mapper.buttons().is_held(button), "{:?} should release {:?}", key, button);
        }
    }

    #[test]
    fn test_buttons_hold_independently() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_key_event(Key::BTN_TL2, true));
        mapper.process_event(&make_key_event(Key::BTN_TR2, true));
        assert!(mapper.buttons().is_held(Button::Boost));
        assert!(mapper.buttons().is_held(Button::Kick));

        mapper.process_event(&make_key_event(Key::BTN_TL2, false));
        assert!(!mapper.buttons().is_held(Button::Boost));
        assert!(mapper.buttons().is_held(Button::Kick));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut mapper = GamepadMapper::new();
        mapper.process_event(&make_key_event(Key::BTN_MODE, true));
        mapper.process_event(&make_key_event(Key::BTN_THUMBL, true));
        for button in Button::ALL {
            assert!(!mapper.buttons().is_held(button));
        }
    }

    #[test]
    fn test_unknown_axis_and_sync_ignored() {
        let mut mapper = GamepadMapper::new();

        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_MISC, 100));
        mapper.process_event(&InputEvent::new(EventType::SYNCHRONIZATION, 0, 0));

        assert_eq!(mapper.left_stick(), StickState::zero());
        assert_eq!(mapper.right_stick(), StickState::zero());
    }

    #[test]
    fn test_reset_recentres_everything() {
        let mut mapper = GamepadMapper::new();
        mapper.process_event(&make_axis_event(AbsoluteAxisType::ABS_X, 255));
        mapper.process_event(&make_key_event(Key::BTN_TL, true));

        mapper.reset();
        assert_eq!(mapper.left_stick(), StickState::zero());
        assert!(!mapper.buttons().is_held(Button::Orbit));
    }

    // ==================== Source Lifecycle Tests ====================

    #[test]
    fn test_poll_drains_pending_events() {
        let (tx, rx) = mpsc::channel();
        let mut source = GamepadSource::with_receiver(rx, "/dev/input/event9".to_string());

        tx.send(make_axis_event(AbsoluteAxisType::ABS_Z, 255)).unwrap();
        tx.send(make_key_event(Key::BTN_TR2, true)).unwrap();
        source.poll();

        assert!((source.right_stick().x() - 1.0).abs() < 0.001);
        assert!(source.buttons().is_held(Button::Kick));
        assert!(source.is_attached());
        assert_eq!(source.device_path(), "/dev/input/event9");
    }

    #[test]
    fn test_losing_the_device_recentres_state() {
        let (tx, rx) = mpsc::channel();
        let mut source = GamepadSource::with_receiver(rx, "/dev/input/event9".to_string());

        tx.send(make_axis_event(AbsoluteAxisType::ABS_X, 255)).unwrap();
        tx.send(make_key_event(Key::BTN_TL, true)).unwrap();
        source.poll();
        assert!(source.buttons().is_held(Button::Orbit));

        // reader thread gone
        drop(tx);
        source.poll();

        assert!(!source.is_attached());
        assert_eq!(source.left_stick(), StickState::zero());
        assert!(!source.buttons().is_held(Button::Orbit));

        // further polls stay quiet
        source.poll();
        assert_eq!(source.left_stick(), StickState::zero());
    }

    // Integration test - only runs with real hardware
    #[test]
    #[ignore]
    fn test_open_with_real_hardware() {
        let result = GamepadSource::open(DUALSENSE_VENDOR_ID, DUALSENSE_PRODUCT_ID);
        assert!(result.is_ok(), "Should detect a connected controller");

        let source = result.unwrap();
        assert!(source.device_path().starts_with("/dev/input/event"));
        assert!(source.is_attached());
    }

    // Integration test - only runs with real hardware
    #[test]
    #[ignore]
    fn test_read_events_with_real_hardware() {
        let mut source =
            GamepadSource::open(DUALSENSE_VENDOR_ID, DUALSENSE_PRODUCT_ID).expect("no controller");

        println!("Move controller sticks or press buttons within 5 seconds...");

        for _ in 0..100 {
            source.poll();
            if source.left_stick() != StickState::zero()
                || source.right_stick() != StickState::zero()
                || Button::ALL.iter().any(|b| source.buttons().is_held(*b))
            {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
        }

        panic!("No input observed from controller");
    }
}
