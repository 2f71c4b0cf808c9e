//! # Input Module
//!
//! Joystick, button and hat state from interchangeable input sources.
//!
//! This module handles:
//! - Normalized stick state with polar readings and change detection
//! - Deadzone-free response shaping (expo curves)
//! - The logical button set and rising-edge detection
//! - On-screen virtual joysticks (touch), physical gamepads (evdev), and a
//!   fused source that switches between them on touch activity
//!
//! Sources are polled: the driver reads the current state once per control
//! tick, and `StickState::set` reports changes for presentation layers that
//! want to diff. There is no callback fan-out.

pub mod buttons;
pub mod fused;
pub mod gamepad;
pub mod shaping;
pub mod stick;
pub mod touch;

pub use buttons::{Button, ButtonSet};
pub use fused::FusedSource;
pub use gamepad::GamepadSource;
pub use shaping::ResponseCurve;
pub use stick::StickState;
pub use touch::{TouchSource, VirtualJoystick};

/// Polled capability over anything that can act as the pilot's controls.
///
/// Implementations produce the current left/right stick deflections, the
/// logical button set, and the 8-way hat state. `poll` gives event-driven
/// backends a place to drain pending device events before the read; purely
/// host-fed sources ignore it.
pub trait InputSource: Send {
    /// Drains pending device or host events into the readable state.
    fn poll(&mut self) {}

    /// Current left stick deflection.
    fn left_stick(&self) -> StickState;

    /// Current right stick deflection.
    fn right_stick(&self) -> StickState;

    /// Current logical button states.
    fn buttons(&self) -> ButtonSet;

    /// Current hat/POV deflection (8-way, unit components, y positive up).
    fn hat(&self) -> StickState;
}

/// Null-object source: centered sticks, nothing held.
///
/// Stands in when no physical controller is present so the driver loop can
/// keep running and reconnecting the link.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummySource;

impl DummySource {
    /// Creates a dummy source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for DummySource {
    fn left_stick(&self) -> StickState {
        StickState::zero()
    }

    fn right_stick(&self) -> StickState {
        StickState::zero()
    }

    fn buttons(&self) -> ButtonSet {
        ButtonSet::new()
    }

    fn hat(&self) -> StickState {
        StickState::zero()
    }
}
