//! # Response Shaping Module
//!
//! Blends linear and quadratic stick response for finer low-speed control.
//!
//! The curve is a percentage blend between the raw input and its signed
//! square:
//!
//! `output = input² · percentage + input · (1 - percentage)`
//!
//! mirrored for negative inputs so the transform is odd. At `percentage = 0`
//! the response is purely linear; at `percentage = 1` it is a pure signed
//! square. Full deflection always maps to full output, so shaping trades
//! away mid-range sensitivity without capping top speed.

/// Sign-preserving blend between linear and quadratic stick response.
///
/// The drive feel of the rover depends on this exact arithmetic; both drive
/// sticks run every reading through their own curve before any speed or
/// angle is derived from it.
#[derive(Debug, Clone, Copy)]
pub struct ResponseCurve {
    /// Blend factor (0.0 = linear, 1.0 = signed square).
    percentage: f32,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self { percentage: 0.0 }
    }
}

impl ResponseCurve {
    /// Creates a response curve with the given blend factor.
    ///
    /// # Arguments
    ///
    /// * `percentage` - Blend factor (0.0 to 1.0). Values outside this range
    ///   are clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rover_helm::input::ResponseCurve;
    ///
    /// let curve = ResponseCurve::new(0.90);
    /// assert!((curve.shape(1.0) - 1.0).abs() < 0.001);
    /// assert!(curve.shape(0.5) < 0.5);
    /// ```
    #[must_use]
    pub fn new(percentage: f32) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 1.0),
        }
    }

    /// Creates a pass-through curve (pure linear response).
    #[must_use]
    pub fn linear() -> Self {
        Self { percentage: 0.0 }
    }

    /// Returns the configured blend factor.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Shapes a normalized input through the curve.
    ///
    /// # Arguments
    ///
    /// * `input` - Normalized value (-1.0 to 1.0)
    ///
    /// # Returns
    ///
    /// Shaped value with the same sign as the input; -1, 0 and 1 are fixed
    /// points for every blend factor.
    #[must_use]
    pub fn shape(&self, input: f32) -> f32 {
        if input >= 0.0 {
            input * input * self.percentage + input * (1.0 - self.percentage)
        } else {
            -(input * input) * self.percentage + input * (1.0 - self.percentage)
        }
    }
}
