//! Outbound command encoding.
//!
//! Every drive intent becomes one topic/payload pair. Payload formats are
//! fixed by the rover firmware: headings carry two decimals, every other
//! number is a whole number in decimal ASCII.

/// Drive on a heading.
pub const TOPIC_DRIVE: &str = "move/drive";
/// Orbit around a point ahead.
pub const TOPIC_ORBIT: &str = "move/orbit";
/// Differential steering.
pub const TOPIC_STEER: &str = "move/steer";
/// Rotate in place.
pub const TOPIC_ROTATE: &str = "move/rotate";
/// Full stop.
pub const TOPIC_STOP: &str = "move/stop";
/// The kick servo (servo slot 9).
pub const TOPIC_KICK_SERVO: &str = "servo/9";
/// Request one ranging sample.
pub const TOPIC_DISTANCE_READ: &str = "sensor/distance/read";

/// A complete outbound command: which topic to publish and what to say.
///
/// # Examples
///
/// ```
/// use rover_helm::protocol::RoverCommand;
///
/// let command = RoverCommand::Drive { angle: 90.0, speed: 40 };
/// assert_eq!(command.topic(), "move/drive");
/// assert_eq!(command.payload(), "90.00 40");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RoverCommand {
    /// Drive along `angle` degrees (0 = forward, clockwise positive) at
    /// `speed`.
    Drive { angle: f64, speed: i32 },
    /// Orbit at `radius` mm with lateral `speed`.
    Orbit { radius: i32, speed: i32 },
    /// Steer with a turn distance; negative `turn` bends left.
    Steer { turn: i32, speed: i32 },
    /// Rotate in place; positive `speed` is clockwise.
    Rotate { speed: i32 },
    /// Stop all motion.
    Stop,
    /// Move the kick servo to `angle` degrees.
    KickServo { angle: i32 },
    /// Ask the rover to take a distance reading.
    RequestDistance,
}

impl RoverCommand {
    /// The topic this command publishes on.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            RoverCommand::Drive { .. } => TOPIC_DRIVE,
            RoverCommand::Orbit { .. } => TOPIC_ORBIT,
            RoverCommand::Steer { .. } => TOPIC_STEER,
            RoverCommand::Rotate { .. } => TOPIC_ROTATE,
            RoverCommand::Stop => TOPIC_STOP,
            RoverCommand::KickServo { .. } => TOPIC_KICK_SERVO,
            RoverCommand::RequestDistance => TOPIC_DISTANCE_READ,
        }
    }

    /// The ASCII payload for this command.
    #[must_use]
    pub fn payload(&self) -> String {
        match self {
            RoverCommand::Drive { angle, speed } => {
                format!("{:.2} {:.0}", angle, f64::from(*speed))
            }
            RoverCommand::Orbit { radius, speed } => format!("{} {}", radius, speed),
            RoverCommand::Steer { turn, speed } => format!("{} {}", turn, speed),
            RoverCommand::Rotate { speed } => speed.to_string(),
            RoverCommand::Stop => "0".to_string(),
            RoverCommand::KickServo { angle } => angle.to_string(),
            RoverCommand::RequestDistance => "0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_payload_formats_heading_with_two_decimals() {
        let command = RoverCommand::Drive {
            angle: 90.0,
            speed: 40,
        };
        assert_eq!(command.topic(), "move/drive");
        assert_eq!(command.payload(), "90.00 40");
    }

    #[test]
    fn test_drive_payload_negative_heading() {
        let command = RoverCommand::Drive {
            angle: -135.4567,
            speed: 300,
        };
        assert_eq!(command.payload(), "-135.46 300");
    }

    #[test]
    fn test_drive_payload_zero_speed_keeps_heading() {
        let command = RoverCommand::Drive {
            angle: 12.3,
            speed: 0,
        };
        assert_eq!(command.payload(), "12.30 0");
    }

    #[test]
    fn test_orbit_payload() {
        let command = RoverCommand::Orbit {
            radius: 223,
            speed: -120,
        };
        assert_eq!(command.topic(), "move/orbit");
        assert_eq!(command.payload(), "223 -120");
    }

    #[test]
    fn test_steer_payload() {
        let command = RoverCommand::Steer {
            turn: -600,
            speed: 150,
        };
        assert_eq!(command.topic(), "move/steer");
        assert_eq!(command.payload(), "-600 150");
    }

    #[test]
    fn test_rotate_payload() {
        let command = RoverCommand::Rotate { speed: -10 };
        assert_eq!(command.topic(), "move/rotate");
        assert_eq!(command.payload(), "-10");
    }

    #[test]
    fn test_stop_and_ranging_payloads() {
        assert_eq!(RoverCommand::Stop.topic(), "move/stop");
        assert_eq!(RoverCommand::Stop.payload(), "0");
        assert_eq!(RoverCommand::RequestDistance.topic(), "sensor/distance/read");
        assert_eq!(RoverCommand::RequestDistance.payload(), "0");
    }

    #[test]
    fn test_kick_servo_payloads() {
        let held = RoverCommand::KickServo { angle: 90 };
        let released = RoverCommand::KickServo { angle: 165 };
        assert_eq!(held.topic(), "servo/9");
        assert_eq!(held.payload(), "90");
        assert_eq!(released.payload(), "165");
    }
}
