//! # Fused Input Module
//!
//! Combines an on-screen [`TouchSource`] with a physical source. The screen
//! wins while any pointer is down; the moment the last finger lifts, reads
//! fall through to the physical controller again. Both sides keep being
//! polled so neither accumulates stale events while the other is in control.

use super::{ButtonSet, InputSource, StickState, TouchSource};

/// Input source that prefers the touchscreen while it is being used.
pub struct FusedSource<S: InputSource> {
    touch: TouchSource,
    physical: S,
}

impl<S: InputSource> FusedSource<S> {
    /// Creates a fused source over a touch side and a physical side.
    #[must_use]
    pub fn new(touch: TouchSource, physical: S) -> Self {
        Self { touch, physical }
    }

    /// True while the touch side is in control.
    #[must_use]
    pub fn touch_active(&self) -> bool {
        self.touch.touch_active()
    }

    /// The touch side, for feeding pointer and widget events.
    pub fn touch_mut(&mut self) -> &mut TouchSource {
        &mut self.touch
    }

    /// The touch side, for drawing.
    #[must_use]
    pub fn touch(&self) -> &TouchSource {
        &self.touch
    }

    /// The physical side.
    #[must_use]
    pub fn physical(&self) -> &S {
        &self.physical
    }
}

impl<S: InputSource> InputSource for FusedSource<S> {
    fn poll(&mut self) {
        self.physical.poll();
        self.touch.poll();
    }

    fn left_stick(&self) -> StickState {
        if self.touch.touch_active() {
            self.touch.left_stick()
        } else {
            self.physical.left_stick()
        }
    }

    fn right_stick(&self) -> StickState {
        if self.touch.touch_active() {
            self.touch.right_stick()
        } else {
            self.physical.right_stick()
        }
    }

    fn buttons(&self) -> ButtonSet {
        if self.touch.touch_active() {
            self.touch.buttons()
        } else {
            self.physical.buttons()
        }
    }

    fn hat(&self) -> StickState {
        if self.touch.touch_active() {
            self.touch.hat()
        } else {
            self.physical.hat()
        }
    }
}
