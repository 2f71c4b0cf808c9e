//! # Stick State Module
//!
//! Normalized 2D joystick state with polar readings.
//!
//! ## Coordinate Convention
//!
//! Both axes are normalized to -1.0..1.0. The y axis is positive toward the
//! bottom of the screen, so pushing a stick up yields a negative y. Angles
//! are measured from straight up, increasing clockwise:
//!
//! | Deflection | (x, y) | Angle |
//! |------------|--------|-------|
//! | Up | (0, -1) | 0° |
//! | Right | (1, 0) | 90° |
//! | Down | (0, 1) | 180° |
//! | Left | (-1, 0) | -90° |

/// Components with an absolute value below this are treated as sensor noise
/// by [`StickState::set_filtered`] and snapped to zero.
pub const NEAR_ZERO_EPSILON: f32 = 0.01;

/// Normalized joystick deflection.
///
/// Created once per stick and updated in place every tick from the active
/// input source. Equality-based change detection (see [`StickState::set`])
/// lets presentation layers diff polled values cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickState {
    x: f32,
    y: f32,
}

impl StickState {
    /// Creates a stick state from raw axis values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rover_helm::input::StickState;
    ///
    /// let stick = StickState::new(0.0, -1.0);
    /// assert!((stick.magnitude() - 1.0).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a centered stick state.
    #[must_use]
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns the horizontal deflection (-1.0..1.0).
    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Returns the vertical deflection (-1.0..1.0, positive down).
    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Commits new axis values and reports whether anything changed.
    ///
    /// Returns `true` iff x or y differs from the stored value. Callers that
    /// need edge-triggered updates test the return value; the driver ignores
    /// it and polls the committed state once per tick.
    pub fn set(&mut self, x: f32, y: f32) -> bool {
        let changed = x != self.x || y != self.y;
        self.x = x;
        self.y = y;
        changed
    }

    /// Commits new axis values, snapping near-zero noise to exactly zero.
    ///
    /// Components within [`NEAR_ZERO_EPSILON`] of zero are flattened before
    /// committing, suppressing the jitter cheap analog sticks produce at
    /// rest. Returns `true` iff the committed state differs.
    pub fn set_filtered(&mut self, x: f32, y: f32) -> bool {
        self.set(fix_zero(x), fix_zero(y))
    }

    /// Returns the distance from centre (`sqrt(x² + y²)`).
    ///
    /// Never negative; exactly 0.0 for a centered stick.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the deflection angle in degrees.
    ///
    /// 0° is straight up, increasing clockwise; the range is (-180°, 180°].
    ///
    /// # Examples
    ///
    /// ```
    /// use rover_helm::input::StickState;
    ///
    /// assert!((StickState::new(0.0, -1.0).angle_degrees() - 0.0).abs() < 0.001);
    /// assert!((StickState::new(1.0, 0.0).angle_degrees() - 90.0).abs() < 0.001);
    /// ```
    #[must_use]
    pub fn angle_degrees(&self) -> f64 {
        f64::from(self.x).atan2(f64::from(-self.y)).to_degrees()
    }
}

/// Snaps values within [`NEAR_ZERO_EPSILON`] of zero to exactly zero.
#[inline]
fn fix_zero(value: f32) -> f32 {
    if value.abs() < NEAR_ZERO_EPSILON {
        0.0
    } else {
        value
    }
}
