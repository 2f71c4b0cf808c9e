//! Rover endpoint registry.

use tracing::warn;

/// One reachable rover: a display name and its broker socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoverEndpoint {
    name: String,
    host: String,
    port: u16,
}

impl RoverEndpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// Display name, e.g. `"Rover 2"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Broker hostname or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Broker port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Broker address in `tcp://host:port` form.
    #[must_use]
    pub fn address(&self) -> String {
        format!("tcp://{}:{}", self.host, self.port)
    }
}

/// The club rovers: direct addresses plus the `p`-suffixed entries reached
/// through the shared access point.
#[must_use]
pub fn club_rovers() -> Vec<RoverEndpoint> {
    vec![
        RoverEndpoint::new("Rover 2", "172.24.1.184", 1883),
        RoverEndpoint::new("Rover 3", "172.24.1.185", 1883),
        RoverEndpoint::new("Rover 4", "172.24.1.186", 1883),
        RoverEndpoint::new("Rover 2p", "gcc-wifi-ap", 1884),
        RoverEndpoint::new("Rover 3p", "gcc-wifi-ap", 1885),
        RoverEndpoint::new("Rover 4p", "gcc-wifi-ap", 1886),
    ]
}

/// Ordered, non-empty list of selectable rovers.
///
/// Selection is by index; an out-of-range index falls back to the first
/// entry, and advancing past the last wraps around to it.
#[derive(Debug, Clone)]
pub struct RoverRegistry {
    rovers: Vec<RoverEndpoint>,
}

impl Default for RoverRegistry {
    fn default() -> Self {
        Self {
            rovers: club_rovers(),
        }
    }
}

impl RoverRegistry {
    /// Creates a registry from an endpoint list. An empty list falls back to
    /// the club defaults so lookups always have an entry 0.
    #[must_use]
    pub fn new(rovers: Vec<RoverEndpoint>) -> Self {
        if rovers.is_empty() {
            warn!("Empty rover list, using the built-in club rovers");
            return Self::default();
        }
        Self { rovers }
    }

    /// The endpoint at `index`, or entry 0 when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> &RoverEndpoint {
        self.rovers.get(index).unwrap_or(&self.rovers[0])
    }

    /// The selection index after `index`, wrapping past the end to 0.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next >= self.rovers.len() {
            0
        } else {
            next
        }
    }

    /// All endpoints in order.
    #[must_use]
    pub fn endpoints(&self) -> &[RoverEndpoint] {
        &self.rovers
    }

    /// Number of endpoints; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rovers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rovers.is_empty()
    }
}
