//! # Rover Driver Module
//!
//! Turns fused stick and button state into rover commands, once per control
//! tick.
//!
//! ## Drive Intents
//!
//! Exactly one intent is derived each tick, chosen by which sticks sit
//! outside the deadzone:
//!
//! | Left stick | Right stick | Intent | Topic |
//! |------------|-------------|--------|-------|
//! | inside | outside | drive (or orbit while `Orbit` held) | `move/drive` / `move/orbit` |
//! | outside | outside | steer | `move/steer` |
//! | outside | inside | rotate in place | `move/rotate` |
//! | inside | inside | stop | `move/drive` then `move/stop` |
//!
//! ## Per-Tick Extras
//!
//! - The kick servo command tracks the `Kick` button level every tick
//! - Every tenth tick while `Orbit` is held, a ranging sample is requested
//! - `SpeedUp`/`SpeedDown`/`Select` act on their rising edge only
//! - The connection is supervised: a selection change disconnects, and a
//!   retry counter reconnects on a fixed tick cadence
//!
//! The driver never blocks and never fails the tick loop; everything that
//! can go wrong on the link is contained in [`ConnectionManager`].

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::input::{Button, ButtonSet, InputSource, ResponseCurve, StickState};
use crate::link::ConnectionManager;
use crate::protocol::commands::RoverCommand;
use crate::protocol::sensor::{parse_distance, TOPIC_SENSOR_DISTANCE};
use crate::telemetry::{SessionLog, SessionRecord};

use super::rovers::{RoverEndpoint, RoverRegistry};

/// Clearance in millimetres added to the measured obstacle distance when
/// deriving the orbit radius.
const ORBIT_STANDOFF: f32 = 100.0;

/// Everything tunable about the drive pipeline.
///
/// The defaults reproduce the club setup; a config file can override any of
/// them.
///
/// # Examples
///
/// ```
/// use rover_helm::drive::DriveTuning;
///
/// let tuning = DriveTuning {
///     deadzone: 0.15,
///     ..DriveTuning::default()
/// };
/// assert_eq!(tuning.retry_cooldown_ticks, 120);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DriveTuning {
    /// Stick magnitude at or below which a stick counts as centered.
    pub deadzone: f32,
    /// Expo blend for the left stick.
    pub left_expo: f32,
    /// Expo blend for the right stick.
    pub right_expo: f32,
    /// Speed multiplier at startup.
    pub initial_speed_multiplier: i32,
    /// Upper bound for the speed multiplier stepping.
    pub max_speed_multiplier: i32,
    /// Speed multiplier substituted while `Boost` is held.
    pub boost_speed: i32,
    /// Kick servo angle while `Kick` is held.
    pub kick_hold_angle: i32,
    /// Kick servo angle while `Kick` is released.
    pub kick_release_angle: i32,
    /// Orbit radius in millimetres when no recent ranging sample exists.
    pub orbit_default_radius: f32,
    /// How old a ranging sample may be and still drive the orbit radius.
    pub orbit_distance_max_age: Duration,
    /// Request a ranging sample every this many ticks while `Orbit` is held.
    pub orbit_ranging_interval: u32,
    /// Ticks between reconnect attempts while disconnected.
    pub retry_cooldown_ticks: i32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            deadzone: 0.1,
            left_expo: 0.75,
            right_expo: 0.90,
            initial_speed_multiplier: 40,
            max_speed_multiplier: 300,
            boost_speed: 300,
            kick_hold_angle: 90,
            kick_release_angle: 165,
            orbit_default_radius: 150.0,
            orbit_distance_max_age: Duration::from_millis(2000),
            orbit_ranging_interval: 10,
            retry_cooldown_ticks: 120,
        }
    }
}

/// A ranging sample and when it arrived.
#[derive(Debug, Clone, Copy)]
struct DistanceReading {
    value: f32,
    received_at: Instant,
}

type SharedDistance = Arc<Mutex<Option<DistanceReading>>>;
type SharedSessionLog = Arc<Mutex<Option<SessionLog>>>;

/// The drive state machine.
///
/// Owns the [`ConnectionManager`] and all mutable driving state; the host
/// application calls [`RoverDriver::tick`] at the control rate and everything
/// else follows from there.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rover_helm::drive::{DriveTuning, RoverDriver, RoverRegistry};
/// use rover_helm::link::{ConnectionManager, MqttTransport};
/// use tokio::sync::mpsc;
///
/// let (tx, rx) = mpsc::unbounded_channel();
/// let transport = MqttTransport::new(tx, Duration::from_secs(5));
/// let link = ConnectionManager::new(Box::new(transport), rx);
///
/// let driver = RoverDriver::new(link, RoverRegistry::default(), DriveTuning::default());
/// assert_eq!(driver.speed_multiplier(), 40);
/// assert_eq!(driver.selected_rover().name(), "Rover 2");
/// ```
pub struct RoverDriver {
    link: ConnectionManager,
    registry: RoverRegistry,
    tuning: DriveTuning,
    left_curve: ResponseCurve,
    right_curve: ResponseCurve,
    speed_multiplier: i32,
    selected: usize,
    connected_index: usize,
    retry_counter: i32,
    tick_count: u32,
    previous_buttons: ButtonSet,
    distance: SharedDistance,
    log: SharedSessionLog,
    last_connected: bool,
}

impl RoverDriver {
    /// Creates a driver and registers its sensor subscription on the link.
    ///
    /// The first tick immediately attempts a connection to the selected
    /// rover; afterwards the retry cadence from `tuning` applies.
    #[must_use]
    pub fn new(mut link: ConnectionManager, registry: RoverRegistry, tuning: DriveTuning) -> Self {
        let distance: SharedDistance = Arc::new(Mutex::new(None));
        let log: SharedSessionLog = Arc::new(Mutex::new(None));

        let cache = Arc::clone(&distance);
        let sensor_log = Arc::clone(&log);
        link.subscribe(
            TOPIC_SENSOR_DISTANCE,
            Box::new(move |_, payload| match parse_distance(payload) {
                Ok(value) => {
                    debug!("Distance reading {:.2}", value);
                    if let Ok(mut reading) = cache.lock() {
                        *reading = Some(DistanceReading {
                            value,
                            received_at: Instant::now(),
                        });
                    }
                    record_to(&sensor_log, SessionRecord::SensorDistance { value });
                }
                Err(e) => warn!("Ignoring sensor payload: {}", e),
            }),
        );

        Self {
            link,
            registry,
            left_curve: ResponseCurve::new(tuning.left_expo),
            right_curve: ResponseCurve::new(tuning.right_expo),
            speed_multiplier: tuning.initial_speed_multiplier,
            selected: 0,
            connected_index: 0,
            retry_counter: 0,
            tick_count: 0,
            previous_buttons: ButtonSet::new(),
            distance,
            log,
            last_connected: false,
            tuning,
        }
    }

    /// Attaches a session log; commands, link transitions and sensor
    /// readings are recorded from the next tick on.
    #[must_use]
    pub fn with_session_log(self, session_log: SessionLog) -> Self {
        if let Ok(mut slot) = self.log.lock() {
            *slot = Some(session_log);
        }
        self
    }

    /// Runs one control tick.
    ///
    /// `now` is the tick timestamp, used only to age the cached ranging
    /// sample; pass `Instant::now()` outside of tests.
    pub fn tick(&mut self, source: &mut dyn InputSource, now: Instant) {
        self.link.poll_events();
        self.note_link_transition();

        source.poll();
        let left = source.left_stick();
        let right = source.right_stick();
        let buttons = source.buttons();

        self.tick_count = self.tick_count.wrapping_add(1);

        // the kick servo follows the button level, re-sent every tick
        let kick_angle = if buttons.is_held(Button::Kick) {
            self.tuning.kick_hold_angle
        } else {
            self.tuning.kick_release_angle
        };
        self.send(RoverCommand::KickServo { angle: kick_angle });

        self.drive_intent(left, right, buttons, now);

        let ranging_interval = self.tuning.orbit_ranging_interval.max(1);
        if buttons.is_held(Button::Orbit) && self.tick_count % ranging_interval == 0 {
            self.send(RoverCommand::RequestDistance);
        }

        self.handle_edges(buttons);
        self.previous_buttons = buttons;

        self.supervise_connection();
    }

    /// Stops the rover and tears the link down.
    pub fn shutdown(&mut self) {
        info!("Stopping the rover and closing the link");
        self.send(RoverCommand::Stop);
        self.link.disconnect();
        if self.last_connected {
            self.last_connected = false;
            self.record(SessionRecord::LinkDown);
        }
    }

    /// The current speed multiplier.
    #[must_use]
    pub fn speed_multiplier(&self) -> i32 {
        self.speed_multiplier
    }

    /// The currently selected rover endpoint.
    #[must_use]
    pub fn selected_rover(&self) -> &RoverEndpoint {
        self.registry.get(self.selected)
    }

    /// The selection index into the rover registry.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Whether the link to the selected rover is up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// The most recent ranging sample, if any arrived this session.
    #[must_use]
    pub fn last_distance(&self) -> Option<f32> {
        self.distance
            .lock()
            .ok()
            .and_then(|reading| reading.map(|r| r.value))
    }

    /// Picks and publishes exactly one drive intent for this tick.
    fn drive_intent(&mut self, left: StickState, right: StickState, buttons: ButtonSet, now: Instant) {
        let deadzone = self.tuning.deadzone;
        let left_mag = left.magnitude();
        let right_mag = right.magnitude();

        if left_mag < deadzone && right_mag > deadzone {
            if buttons.is_held(Button::Orbit) {
                self.orbit(right, buttons, now);
            } else {
                self.drive(right, right_mag, buttons);
            }
        } else if left_mag > deadzone && right_mag > deadzone {
            self.steer(left, right, buttons);
        } else if left_mag > deadzone {
            self.rotate(left, buttons);
        } else {
            self.stop(right);
        }
    }

    /// Drive on the right stick's heading, speed from its deflection.
    fn drive(&mut self, right: StickState, magnitude: f32, buttons: ButtonSet) {
        let shaped = self.right_curve.shape(magnitude);
        let speed = self.rover_speed(shaped, buttons);

        let mut angle = right.angle_degrees();
        if buttons.is_held(Button::LockAxis) {
            // quantize to the nearer of straight ahead and straight back
            angle = if angle.abs() <= 90.0 { 0.0 } else { 180.0 };
        }

        self.send(RoverCommand::Drive { angle, speed });
    }

    /// Orbit a point ahead; lateral speed from the right stick's x axis.
    fn orbit(&mut self, right: StickState, buttons: ButtonSet, now: Instant) {
        let radius = self.orbit_radius(now) as i32;
        let shaped = self.right_curve.shape(right.x());
        let speed = self.rover_speed(shaped, buttons);
        self.send(RoverCommand::Orbit { radius, speed });
    }

    /// Differential steer: right stick y sets speed, left stick x bends.
    fn steer(&mut self, left: StickState, right: StickState, buttons: ButtonSet) {
        let shaped_forward = self.right_curve.shape(right.y());
        let speed = -self.rover_speed(shaped_forward, buttons);
        let shaped_turn = self.left_curve.shape(left.x());
        let turn = Self::turn_distance(shaped_turn);
        self.send(RoverCommand::Steer { turn, speed });
    }

    /// Rotate in place from the left stick's x axis, geared down.
    fn rotate(&mut self, left: StickState, buttons: ButtonSet) {
        let shaped = self.left_curve.shape(left.x());
        let speed = self.rover_speed(shaped, buttons) / 4;
        self.send(RoverCommand::Rotate { speed });
    }

    /// Park: a zero-speed drive on the current heading, then a stop.
    fn stop(&mut self, right: StickState) {
        self.send(RoverCommand::Drive {
            angle: right.angle_degrees(),
            speed: 0,
        });
        self.send(RoverCommand::Stop);
    }

    /// Scales a shaped deflection into a wheel speed, honoring `Boost`.
    fn rover_speed(&self, shaped: f32, buttons: ButtonSet) -> i32 {
        if buttons.is_held(Button::Boost) {
            (shaped * self.tuning.boost_speed as f32) as i32
        } else {
            (shaped * self.speed_multiplier as f32) as i32
        }
    }

    /// The orbit radius for this tick: measured distance plus stand-off
    /// while the cached sample is fresh, the configured default otherwise.
    fn orbit_radius(&self, now: Instant) -> f32 {
        if let Ok(reading) = self.distance.lock() {
            if let Some(reading) = *reading {
                if now.saturating_duration_since(reading.received_at)
                    < self.tuning.orbit_distance_max_age
                {
                    return reading.value + ORBIT_STANDOFF;
                }
            }
        }
        self.tuning.orbit_default_radius
    }

    /// Inverse turn mapping: small deflection asks for a wide turn, full
    /// deflection for the tightest one, sign copied from the deflection.
    fn turn_distance(deflection: f32) -> i32 {
        let distance = ((1.0 - deflection.abs()) + 0.2) * 500.0;
        if deflection >= 0.0 {
            distance as i32
        } else {
            -(distance as i32)
        }
    }

    /// One-shot actions, fired on the rising edge only.
    fn handle_edges(&mut self, buttons: ButtonSet) {
        if buttons.rising_edge(&self.previous_buttons, Button::SpeedUp) {
            self.step_multiplier_up();
        }
        if buttons.rising_edge(&self.previous_buttons, Button::SpeedDown) {
            self.step_multiplier_down();
        }
        if buttons.rising_edge(&self.previous_buttons, Button::Select) {
            self.selected = self.registry.next_index(self.selected);
            info!("Selected {}", self.registry.get(self.selected).name());
        }
    }

    /// Steps the multiplier up; the step grows with the multiplier.
    fn step_multiplier_up(&mut self) {
        let max = self.tuning.max_speed_multiplier;
        if self.speed_multiplier < 10 {
            self.speed_multiplier += 1;
        } else if self.speed_multiplier < 50 {
            self.speed_multiplier += 5;
        } else if self.speed_multiplier < max {
            self.speed_multiplier = (self.speed_multiplier + 10).min(max);
        }
        info!("Speed multiplier set to {}", self.speed_multiplier);
    }

    /// Steps the multiplier down, mirroring the up steps, floored at zero.
    fn step_multiplier_down(&mut self) {
        if self.speed_multiplier > 50 {
            self.speed_multiplier -= 10;
        } else if self.speed_multiplier > 10 {
            self.speed_multiplier -= 5;
        } else if self.speed_multiplier > 0 {
            self.speed_multiplier -= 1;
        }
        info!("Speed multiplier set to {}", self.speed_multiplier);
    }

    /// Disconnects on a selection change and reconnects on the retry
    /// cadence while the link is down.
    fn supervise_connection(&mut self) {
        if self.selected != self.connected_index {
            self.connected_index = self.selected;
            self.link.disconnect();
        }
        if !self.link.is_connected() {
            self.retry_counter -= 1;
            if self.retry_counter < 0 {
                self.retry_counter = self.tuning.retry_cooldown_ticks;
                let endpoint = self.registry.get(self.selected);
                let address = endpoint.address();
                debug!("Retry window elapsed, trying {}", endpoint.name());
                self.link.connect(&address);
            }
        }
    }

    /// Records link up/down transitions observed since the previous tick.
    fn note_link_transition(&mut self) {
        let connected = self.link.is_connected();
        if connected == self.last_connected {
            return;
        }
        self.last_connected = connected;
        if connected {
            self.record(SessionRecord::LinkUp {
                address: self.registry.get(self.selected).address(),
            });
        } else {
            self.record(SessionRecord::LinkDown);
        }
    }

    /// Publishes a command and records it. Dropped while disconnected.
    fn send(&mut self, command: RoverCommand) {
        if !self.link.is_connected() {
            return;
        }
        let topic = command.topic();
        let payload = command.payload();
        trace!("Publishing {} on {}", payload, topic);
        self.link.publish(topic, &payload);
        self.record(SessionRecord::Command {
            topic: topic.to_string(),
            payload,
        });
    }

    fn record(&self, record: SessionRecord) {
        record_to(&self.log, record);
    }
}

fn record_to(log: &SharedSessionLog, record: SessionRecord) {
    if let Ok(mut slot) = log.lock() {
        if let Some(log) = slot.as_mut() {
            log.record(record);
        }
    }
}
