//! Trait abstraction for the pub/sub link to enable testing

use bytes::Bytes;

use crate::error::Result;

/// Connection attempt generation.
///
/// Every connect advances the generation, and every [`LinkEvent`] carries the
/// generation that produced it. Events from a superseded attempt are dropped
/// by the connection manager, so a late callback from a torn-down session can
/// never flip state behind the current one's back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(u64);

impl SessionId {
    /// Generation zero, before any connect.
    #[must_use]
    pub fn new() -> Self {
        Self(0)
    }

    /// The following generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asynchronous completion and traffic from the transport, funneled onto the
/// tick thread.
#[derive(Debug, Clone)]
pub enum LinkEvent {
    /// The broker accepted the connection.
    Connected { session: SessionId },
    /// The connection attempt never came up.
    ConnectFailed { session: SessionId, reason: String },
    /// An established connection dropped.
    ConnectionLost { session: SessionId, reason: String },
    /// An inbound message on a subscribed topic.
    Message {
        session: SessionId,
        topic: String,
        payload: Bytes,
    },
}

impl LinkEvent {
    /// The connection generation this event belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            LinkEvent::Connected { session }
            | LinkEvent::ConnectFailed { session, .. }
            | LinkEvent::ConnectionLost { session, .. }
            | LinkEvent::Message { session, .. } => *session,
        }
    }
}

/// Operations the connection manager needs from a pub/sub client.
///
/// All methods are non-blocking: `connect` only starts an attempt, with the
/// outcome arriving later as a [`LinkEvent`]; `publish` and `subscribe` hand
/// off to the transport's own event loop.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send {
    /// Starts a connection attempt toward `address` (`tcp://host:port`),
    /// tagged with the given session.
    ///
    /// # Errors
    ///
    /// Returns `Link` if the attempt cannot even be started (bad address).
    fn connect(&mut self, address: &str, session: SessionId) -> Result<()>;

    /// Queues a message for the current connection.
    ///
    /// # Errors
    ///
    /// Returns `Link` if the message cannot be queued.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<()>;

    /// Queues a subscription for the current connection.
    ///
    /// # Errors
    ///
    /// Returns `Link` if the subscription cannot be queued.
    fn subscribe(&mut self, topic: &str) -> Result<()>;

    /// Tears down the current connection, if any.
    fn disconnect(&mut self);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_generations_advance() {
        let first = SessionId::new();
        let second = first.next();
        let third = second.next();

        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(first.next(), second);
        assert_eq!(format!("{}", third), "2");
    }

    #[test]
    fn test_link_event_reports_its_session() {
        let session = SessionId::new().next();

        let events = [
            LinkEvent::Connected { session },
            LinkEvent::ConnectFailed {
                session,
                reason: "refused".to_string(),
            },
            LinkEvent::ConnectionLost {
                session,
                reason: "eof".to_string(),
            },
            LinkEvent::Message {
                session,
                topic: "sensor/distance".to_string(),
                payload: Bytes::from_static(b"distance:10.0"),
            },
        ];

        for event in events {
            assert_eq!(event.session(), session);
        }
    }

    #[test]
    fn test_recording_transport_records_in_order() {
        let mut transport = mocks::RecordingTransport::new();
        let session = SessionId::new();

        transport.connect("tcp://172.24.1.184:1883", session).unwrap();
        transport.subscribe("sensor/distance").unwrap();
        transport.publish("move/stop", b"0").unwrap();
        transport.publish("move/drive", b"90.00 40").unwrap();
        transport.disconnect();

        assert_eq!(
            transport.get_connects(),
            vec![("tcp://172.24.1.184:1883".to_string(), session)]
        );
        assert_eq!(transport.last_session(), Some(session));
        assert_eq!(transport.get_subscriptions(), vec!["sensor/distance"]);
        assert_eq!(
            transport.get_publishes(),
            vec![
                ("move/stop".to_string(), "0".to_string()),
                ("move/drive".to_string(), "90.00 40".to_string()),
            ]
        );
        assert_eq!(transport.get_disconnects(), 1);
    }

    #[test]
    fn test_recording_transport_injected_errors() {
        let mut transport = mocks::RecordingTransport::new();
        transport.set_connect_error("no route");
        transport.set_publish_error("queue full");

        assert!(transport.connect("tcp://x:1883", SessionId::new()).is_err());
        assert!(transport.publish("move/stop", b"0").is_err());
        assert!(transport.get_connects().is_empty());
        assert!(transport.get_publishes().is_empty());
    }
}
