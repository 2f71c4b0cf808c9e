//! # Link Module
//!
//! Connection lifecycle over the pub/sub transport.
//!
//! This module handles:
//! - Starting, superseding and tearing down connection attempts
//! - Funneling transport callbacks onto the tick thread as [`LinkEvent`]s
//! - Discarding events from superseded sessions by generation
//! - Topic listener registration and inbound message dispatch
//! - Replaying subscriptions when a connection comes up
//!
//! The manager never blocks and never fails the tick loop: transport errors
//! are logged, the connection is dropped, and the driver's retry cadence
//! brings it back.

pub mod mqtt;
pub mod transport;

pub use mqtt::MqttTransport;
pub use transport::{LinkEvent, SessionId, Transport};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Callback invoked with `(topic, payload)` for each inbound message.
pub type TopicListener = Box<dyn FnMut(&str, &str) + Send>;

struct TopicEntry {
    topic: String,
    listeners: Vec<TopicListener>,
}

/// Owns the transport and the connection state machine.
///
/// All state changes happen on the caller's thread inside
/// [`ConnectionManager::poll_events`]; the transport's own threads only ever
/// push events into the channel.
pub struct ConnectionManager {
    transport: Box<dyn Transport>,
    events: mpsc::UnboundedReceiver<LinkEvent>,
    session: SessionId,
    connected: bool,
    subscriptions: Vec<TopicEntry>,
}

impl ConnectionManager {
    /// Creates a manager over a transport and its event channel.
    #[must_use]
    pub fn new(transport: Box<dyn Transport>, events: mpsc::UnboundedReceiver<LinkEvent>) -> Self {
        Self {
            transport,
            events,
            session: SessionId::new(),
            connected: false,
            subscriptions: Vec::new(),
        }
    }

    /// Starts a connection attempt toward `address`, superseding any
    /// outstanding one.
    ///
    /// The outcome arrives later through [`ConnectionManager::poll_events`];
    /// a transport that cannot even start the attempt is logged and left for
    /// the retry cadence.
    pub fn connect(&mut self, address: &str) {
        self.session = self.session.next();
        self.connected = false;
        info!("Connecting to {} (session {})", address, self.session);
        if let Err(e) = self.transport.connect(address, self.session) {
            warn!("Failed to start connection to {}: {}", address, e);
        }
    }

    /// Tears down the current connection. Safe to call at any time; a late
    /// event from the torn-down session is discarded by generation.
    pub fn disconnect(&mut self) {
        self.transport.disconnect();
        self.connected = false;
        self.session = self.session.next();
    }

    /// True between a `Connected` event for the current session and the next
    /// disconnect or failure.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The current connection generation.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Registers a listener for a topic.
    ///
    /// Listeners on the same topic run in registration order. The transport
    /// subscription is issued immediately while connected, and replayed on
    /// every future `Connected` event.
    pub fn subscribe(&mut self, topic: &str, listener: TopicListener) {
        let entry = self.subscriptions.iter_mut().find(|e| e.topic == topic);
        match entry {
            Some(entry) => entry.listeners.push(listener),
            None => {
                self.subscriptions.push(TopicEntry {
                    topic: topic.to_string(),
                    listeners: vec![listener],
                });
                if self.connected {
                    if let Err(e) = self.transport.subscribe(topic) {
                        warn!("Failed to subscribe to {}: {}", topic, e);
                    }
                }
            }
        }
    }

    /// Publishes a text payload to a topic.
    ///
    /// A silent no-op while disconnected. A transport error drops the
    /// connection and is swallowed; the retry cadence reconnects.
    pub fn publish(&mut self, topic: &str, payload: &str) {
        if !self.connected {
            return;
        }
        if let Err(e) = self.transport.publish(topic, payload.as_bytes()) {
            warn!("Publish to {} failed, dropping connection: {}", topic, e);
            self.disconnect();
        }
    }

    /// Drains pending link events onto this thread.
    ///
    /// Call once per tick, before reading `is_connected` or publishing.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if event.session() != self.session {
                debug!("Discarding event from superseded session {}", event.session());
                continue;
            }
            match event {
                LinkEvent::Connected { session } => {
                    info!("Link up (session {})", session);
                    self.connected = true;
                    for entry in &self.subscriptions {
                        if let Err(e) = self.transport.subscribe(&entry.topic) {
                            warn!("Failed to subscribe to {}: {}", entry.topic, e);
                        }
                    }
                }
                LinkEvent::ConnectFailed { reason, .. } => {
                    warn!("Connection attempt failed: {}", reason);
                    self.connected = false;
                }
                LinkEvent::ConnectionLost { reason, .. } => {
                    warn!("Connection lost: {}", reason);
                    self.connected = false;
                }
                LinkEvent::Message { topic, payload, .. } => {
                    let text = String::from_utf8_lossy(&payload).to_string();
                    match self.subscriptions.iter_mut().find(|e| e.topic == topic) {
                        Some(entry) => {
                            for listener in &mut entry.listeners {
                                listener(&topic, &text);
                            }
                        }
                        None => debug!("Message on unrouted topic {}", topic),
                    }
                }
            }
        }
    }
}
