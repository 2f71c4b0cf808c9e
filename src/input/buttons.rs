//! # Logical Buttons Module
//!
//! The closed set of named buttons the driver understands, independent of
//! which physical control (screen widget, gamepad button) produced them.
//!
//! Orbit, Kick, Boost and LockAxis are level-triggered (acted on while
//! held); Select, SpeedUp and SpeedDown are one-shot actions triggered on
//! the rising edge only, which the driver detects by comparing against the
//! previous tick's snapshot.

/// Logical buttons recognized by the drive pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Circle a fixed point instead of driving straight
    Orbit,
    /// Actuate the kick servo while held
    Kick,
    /// Override the speed multiplier with full speed
    Boost,
    /// Quantize heading to forward/back only
    LockAxis,
    /// Request a ranging sample
    ReadDistance,
    /// Sling shot maneuver
    SlingShot,
    /// Cycle to the next rover endpoint
    Select,
    /// Step the speed multiplier up
    SpeedUp,
    /// Step the speed multiplier down
    SpeedDown,
}

impl Button {
    /// Number of logical buttons.
    pub const COUNT: usize = 9;

    /// All buttons, in declaration order.
    pub const ALL: [Button; Button::COUNT] = [
        Button::Orbit,
        Button::Kick,
        Button::Boost,
        Button::LockAxis,
        Button::ReadDistance,
        Button::SlingShot,
        Button::Select,
        Button::SpeedUp,
        Button::SpeedDown,
    ];
}

/// Held/released state for every logical button.
///
/// A plain value type: sources keep one and mutate it from device events,
/// the driver copies it each tick and keeps the previous copy around for
/// edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSet {
    held: [bool; Button::COUNT],
}

impl ButtonSet {
    /// Creates a set with every button released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the button is currently held.
    ///
    /// # Examples
    ///
    /// ```
    /// use rover_helm::input::{Button, ButtonSet};
    ///
    /// let mut buttons = ButtonSet::new();
    /// buttons.set(Button::Boost, true);
    /// assert!(buttons.is_held(Button::Boost));
    /// assert!(!buttons.is_held(Button::Kick));
    /// ```
    #[must_use]
    pub fn is_held(&self, button: Button) -> bool {
        self.held[button as usize]
    }

    /// Sets the held state of a button.
    pub fn set(&mut self, button: Button, held: bool) {
        self.held[button as usize] = held;
    }

    /// Returns whether the button transitioned from released to held.
    ///
    /// # Arguments
    ///
    /// * `previous` - The snapshot taken at the end of the previous tick
    /// * `button` - The button to test
    #[must_use]
    pub fn rising_edge(&self, previous: &ButtonSet, button: Button) -> bool {
        self.is_held(button) && !previous.is_held(button)
    }
}
