//! # Touch Input Module
//!
//! On-screen joystick pads driven by host touch events.
//!
//! `VirtualJoystick` models one circular pad in screen coordinates (y grows
//! toward the bottom of the screen): an outer touch area, an inactive centre
//! band that reads as zero, and a knob that follows the claiming pointer,
//! clamped to a ring at full deflection. `TouchSource` combines two pads with
//! host-fed button and hat state into an [`InputSource`](super::InputSource).

use super::{Button, ButtonSet, InputSource, StickState};

/// Values at or below this magnitude recentre the knob in
/// [`VirtualJoystick::set_values`].
pub const RECENTRE_EPSILON: f32 = 0.02;

/// One on-screen joystick pad.
///
/// Geometry is derived from three diameters: `space_size` (the full touch
/// area), `inactive_size` (the dead centre band) and `pad_size` (the knob).
/// Axis values are 0 inside the inactive band and scale linearly to ±1.0 at
/// the clamp ring.
///
/// # Examples
///
/// ```
/// use rover_helm::input::VirtualJoystick;
///
/// let mut pad = VirtualJoystick::new(400.0, 500.0, 500.0);
/// pad.touch_down(0, 500.0, 500.0);
/// pad.touch_dragged(0, 900.0, 500.0);
/// assert!((pad.x_value() - 1.0).abs() < 0.001);
/// pad.touch_up(0);
/// assert_eq!(pad.x_value(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    space_size: f32,
    inactive_size: f32,
    pad_size: f32,
    centre_x: f32,
    centre_y: f32,
    knob_x: f32,
    knob_y: f32,
    pointer: Option<u64>,
}

impl VirtualJoystick {
    /// Creates a pad with the conventional proportions: the inactive band is
    /// 65% and the knob 50% of the pad radius.
    #[must_use]
    pub fn new(space_size: f32, centre_x: f32, centre_y: f32) -> Self {
        Self::with_sizes(
            space_size,
            (space_size / 2.0) * 0.65,
            (space_size / 2.0) * 0.50,
            centre_x,
            centre_y,
        )
    }

    /// Creates a pad with explicit band and knob diameters.
    #[must_use]
    pub fn with_sizes(
        space_size: f32,
        inactive_size: f32,
        pad_size: f32,
        centre_x: f32,
        centre_y: f32,
    ) -> Self {
        Self {
            space_size,
            inactive_size,
            pad_size,
            centre_x,
            centre_y,
            knob_x: centre_x,
            knob_y: centre_y,
            pointer: None,
        }
    }

    /// Normalized horizontal deflection in [-1, 1].
    #[must_use]
    pub fn x_value(&self) -> f32 {
        self.axis_value(self.knob_x - self.centre_x)
    }

    /// Normalized vertical deflection in [-1, 1], positive toward the bottom
    /// of the screen.
    #[must_use]
    pub fn y_value(&self) -> f32 {
        self.axis_value(self.knob_y - self.centre_y)
    }

    /// Normalized radial deflection in [0, 1].
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        let distance = Self::distance(self.centre_x, self.centre_y, self.knob_x, self.knob_y);
        if distance <= self.min_band() {
            0.0
        } else {
            (distance - self.min_band()) / self.max_band()
        }
    }

    /// Both axis values as a stick reading.
    #[must_use]
    pub fn state(&self) -> StickState {
        StickState::new(self.x_value(), self.y_value())
    }

    /// True while a pointer holds the knob.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.pointer.is_some()
    }

    /// Current knob position in screen coordinates.
    #[must_use]
    pub fn knob(&self) -> (f32, f32) {
        (self.knob_x, self.knob_y)
    }

    /// Claims the pointer if it lands within half the touch area of the
    /// current knob position. The knob itself only moves on drag.
    ///
    /// Returns true if the pointer was claimed.
    pub fn touch_down(&mut self, pointer: u64, x: f32, y: f32) -> bool {
        if Self::distance(x, y, self.knob_x, self.knob_y) <= self.space_size / 2.0 {
            self.pointer = Some(pointer);
            true
        } else {
            false
        }
    }

    /// Moves the knob to follow the claiming pointer, clamped to the ring.
    ///
    /// Returns true if the drag was applied.
    pub fn touch_dragged(&mut self, pointer: u64, x: f32, y: f32) -> bool {
        if self.pointer == Some(pointer) {
            self.update_knob(x, y);
            true
        } else {
            false
        }
    }

    /// Recentres the knob when the claiming pointer lifts.
    ///
    /// Returns true if the pad was released.
    pub fn touch_up(&mut self, pointer: u64) -> bool {
        if self.pointer == Some(pointer) {
            self.knob_x = self.centre_x;
            self.knob_y = self.centre_y;
            self.pointer = None;
            true
        } else {
            false
        }
    }

    /// Positions the knob to display the given normalized values, recentring
    /// when both are within [`RECENTRE_EPSILON`] of zero.
    ///
    /// Used to mirror another input source onto the pad.
    pub fn set_values(&mut self, x: f32, y: f32) {
        if x.abs() > RECENTRE_EPSILON || y.abs() > RECENTRE_EPSILON {
            let half_travel = (self.space_size - self.inactive_size) / 2.0;
            let pad_offset = self.pad_size / 2.0;
            self.update_knob(
                self.centre_x + x * half_travel + Self::sign(x) * pad_offset,
                self.centre_y + y * half_travel + Self::sign(y) * pad_offset,
            );
        } else {
            self.knob_x = self.centre_x;
            self.knob_y = self.centre_y;
        }
    }

    fn update_knob(&mut self, x: f32, y: f32) {
        let ring = self.ring_radius();
        if Self::distance(self.centre_x, self.centre_y, x, y) < ring {
            self.knob_x = x;
            self.knob_y = y;
        } else {
            let angle = (x - self.centre_x).atan2(-(y - self.centre_y));
            self.knob_x = self.centre_x + ring * angle.sin();
            self.knob_y = self.centre_y - ring * angle.cos();
        }
    }

    #[inline]
    fn axis_value(&self, offset: f32) -> f32 {
        let min = self.min_band();
        if offset.abs() <= min {
            0.0
        } else if offset >= 0.0 {
            (offset - min) / self.max_band()
        } else {
            (offset + min) / self.max_band()
        }
    }

    #[inline]
    fn min_band(&self) -> f32 {
        self.inactive_size / 2.0
    }

    #[inline]
    fn max_band(&self) -> f32 {
        (self.space_size - self.pad_size) / 2.0 - self.min_band()
    }

    #[inline]
    fn ring_radius(&self) -> f32 {
        (self.space_size - self.pad_size) / 2.0
    }

    #[inline]
    fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
        let dx = bx - ax;
        let dy = by - ay;
        (dx * dx + dy * dy).sqrt()
    }

    // f32::signum maps 0.0 to 1.0; the knob offset needs 0.0 to stay 0.0.
    #[inline]
    fn sign(value: f32) -> f32 {
        if value == 0.0 {
            0.0
        } else {
            value.signum()
        }
    }
}

/// Input source backed by two on-screen pads plus host-fed buttons and hat.
///
/// Touch events are routed to both pads; each one claims only pointers that
/// land on it. `touch_active` reflects every pointer currently down, on a pad
/// or not, so a fused source can hand control to the screen the moment the
/// pilot touches it.
#[derive(Debug, Clone)]
pub struct TouchSource {
    left: VirtualJoystick,
    right: VirtualJoystick,
    buttons: ButtonSet,
    hat: StickState,
    pointers_down: u32,
}

impl TouchSource {
    /// Creates a source over the given left and right pads.
    #[must_use]
    pub fn new(left: VirtualJoystick, right: VirtualJoystick) -> Self {
        Self {
            left,
            right,
            buttons: ButtonSet::new(),
            hat: StickState::zero(),
            pointers_down: 0,
        }
    }

    /// Routes a pointer press to both pads.
    pub fn touch_down(&mut self, pointer: u64, x: f32, y: f32) {
        self.pointers_down = self.pointers_down.saturating_add(1);
        self.left.touch_down(pointer, x, y);
        self.right.touch_down(pointer, x, y);
    }

    /// Routes a pointer move to whichever pad claims it.
    pub fn touch_dragged(&mut self, pointer: u64, x: f32, y: f32) {
        self.left.touch_dragged(pointer, x, y);
        self.right.touch_dragged(pointer, x, y);
    }

    /// Routes a pointer release to both pads.
    pub fn touch_up(&mut self, pointer: u64) {
        self.pointers_down = self.pointers_down.saturating_sub(1);
        self.left.touch_up(pointer);
        self.right.touch_up(pointer);
    }

    /// Sets the state of an on-screen button.
    pub fn set_button(&mut self, button: Button, held: bool) {
        self.buttons.set(button, held);
    }

    /// Sets the hat state (unit components, y positive up).
    pub fn set_hat(&mut self, x: f32, y: f32) {
        self.hat.set(x, y);
    }

    /// True while any pointer is down anywhere on the screen.
    #[must_use]
    pub fn touch_active(&self) -> bool {
        self.pointers_down > 0
    }

    /// The left pad, for drawing.
    #[must_use]
    pub fn left_pad(&self) -> &VirtualJoystick {
        &self.left
    }

    /// The right pad, for drawing.
    #[must_use]
    pub fn right_pad(&self) -> &VirtualJoystick {
        &self.right
    }

    /// Mutable left pad, for mirroring another source onto the screen.
    pub fn left_pad_mut(&mut self) -> &mut VirtualJoystick {
        &mut self.left
    }

    /// Mutable right pad, for mirroring another source onto the screen.
    pub fn right_pad_mut(&mut self) -> &mut VirtualJoystick {
        &mut self.right
    }
}

impl InputSource for TouchSource {
    fn left_stick(&self) -> StickState {
        self.left.state()
    }

    fn right_stick(&self) -> StickState {
        self.right.state()
    }

    fn buttons(&self) -> ButtonSet {
        self.buttons
    }

    fn hat(&self) -> StickState {
        self.hat
    }
}
