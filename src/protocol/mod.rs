//! # Protocol Module
//!
//! The rover's plain-ASCII topic/payload protocol.
//!
//! ## Outbound topics
//!
//! | Topic | Payload | Meaning |
//! |-------|---------|---------|
//! | `move/drive` | `"<angle> <speed>"` | drive on a heading (angle 2 decimals, speed whole) |
//! | `move/orbit` | `"<radius> <speed>"` | orbit at a radius in mm |
//! | `move/steer` | `"<turn> <speed>"` | steer with a turn distance |
//! | `move/rotate` | `"<speed>"` | rotate in place |
//! | `move/stop` | `"0"` | stop |
//! | `servo/9` | `"<angle>"` | kick servo position |
//! | `sensor/distance/read` | `"0"` | request a ranging sample |
//!
//! ## Inbound topics
//!
//! | Topic | Payload | Meaning |
//! |-------|---------|---------|
//! | `sensor/distance` | `"<label>:<value>,..."` | distance reading in mm |
//!
//! [`commands`] builds the outbound pairs, [`sensor`] parses the inbound
//! readings.

pub mod commands;
pub mod sensor;

pub use commands::RoverCommand;
