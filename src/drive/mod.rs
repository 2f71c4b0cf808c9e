//! # Drive Module
//!
//! Turns pilot input into rover commands.
//!
//! This module handles:
//! - The rover endpoint registry and selection ([`rovers`])
//! - The per-tick intent state machine, speed stepping and connection
//!   supervision ([`driver`])

pub mod driver;
pub mod rovers;

pub use driver::{DriveTuning, RoverDriver};
pub use rovers::{RoverEndpoint, RoverRegistry};
