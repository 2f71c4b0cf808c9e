//! # Rover Helm Library
//!
//! Drive a club rover over MQTT from a touchscreen or a PS5 DualSense controller.
//!
//! This library provides the core functionality for fusing touch and gamepad
//! input into shaped drive commands published to the rover's pub/sub topics.

pub mod config;
pub mod error;
pub mod protocol;
pub mod input;
pub mod link;
pub mod drive;
pub mod telemetry;
