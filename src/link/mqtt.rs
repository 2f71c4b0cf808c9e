//! # MQTT Transport Module
//!
//! Real pub/sub backend over rumqttc.
//!
//! Each connect attempt builds a fresh `AsyncClient` with a unique client id
//! and spawns one event-loop task. The task forwards broker traffic into the
//! manager's event channel and ends on the first connection error; there is
//! no auto-reconnect here, the driver's retry cadence decides when to try
//! again. Everything is QoS 0 with a clean session: drive commands are only
//! worth delivering now.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Result, RoverHelmError};

use super::transport::{LinkEvent, SessionId, Transport};

/// Request queue depth for the rumqttc client.
const CLIENT_QUEUE_CAPACITY: usize = 64;

struct ActiveConnection {
    client: AsyncClient,
    worker: tokio::task::JoinHandle<()>,
}

/// [`Transport`] implementation over an MQTT broker.
pub struct MqttTransport {
    events: mpsc::UnboundedSender<LinkEvent>,
    keep_alive: Duration,
    active: Option<ActiveConnection>,
}

impl MqttTransport {
    /// Creates a transport that reports into the given event channel.
    #[must_use]
    pub fn new(events: mpsc::UnboundedSender<LinkEvent>, keep_alive: Duration) -> Self {
        Self {
            events,
            keep_alive,
            active: None,
        }
    }

    fn spawn_worker(
        &self,
        mut eventloop: rumqttc::EventLoop,
        session: SessionId,
    ) -> tokio::task::JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            let mut connected = false;
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Incoming::ConnAck(_))) => {
                        connected = true;
                        let _ = events.send(LinkEvent::Connected { session });
                    }
                    Ok(Event::Incoming(Incoming::Publish(publish))) => {
                        let _ = events.send(LinkEvent::Message {
                            session,
                            topic: publish.topic.clone(),
                            payload: publish.payload,
                        });
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let event = if connected {
                            LinkEvent::ConnectionLost {
                                session,
                                reason: e.to_string(),
                            }
                        } else {
                            LinkEvent::ConnectFailed {
                                session,
                                reason: e.to_string(),
                            }
                        };
                        let _ = events.send(event);
                        return;
                    }
                }
            }
        })
    }
}

impl Transport for MqttTransport {
    fn connect(&mut self, address: &str, session: SessionId) -> Result<()> {
        if let Some(active) = self.active.take() {
            let _ = active.client.try_disconnect();
            active.worker.abort();
        }

        let (host, port) = parse_address(address)?;
        let client_id = format!("rover-helm-{}", chrono::Utc::now().timestamp_millis());
        debug!("MQTT client {} connecting to {}:{}", client_id, host, port);

        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, CLIENT_QUEUE_CAPACITY);
        let worker = self.spawn_worker(eventloop, session);
        self.active = Some(ActiveConnection { client, worker });
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<()> {
        let active = self
            .active
            .as_ref()
            .ok_or_else(|| RoverHelmError::Link("No active connection".to_string()))?;
        active
            .client
            .try_publish(topic, QoS::AtMostOnce, false, payload.to_vec())
            .map_err(|e| RoverHelmError::Link(format!("Publish to {} failed: {}", topic, e)))
    }

    fn subscribe(&mut self, topic: &str) -> Result<()> {
        let active = self
            .active
            .as_ref()
            .ok_or_else(|| RoverHelmError::Link("No active connection".to_string()))?;
        active
            .client
            .try_subscribe(topic, QoS::AtMostOnce)
            .map_err(|e| RoverHelmError::Link(format!("Subscribe to {} failed: {}", topic, e)))
    }

    fn disconnect(&mut self) {
        if let Some(active) = self.active.take() {
            let _ = active.client.try_disconnect();
            active.worker.abort();
        }
    }
}

/// Splits a `tcp://host:port` address (scheme optional) into host and port.
fn parse_address(address: &str) -> Result<(String, u16)> {
    let stripped = address.strip_prefix("tcp://").unwrap_or(address);
    let (host, port) = stripped
        .rsplit_once(':')
        .ok_or_else(|| RoverHelmError::Link(format!("Invalid broker address: {}", address)))?;
    if host.is_empty() {
        return Err(RoverHelmError::Link(format!(
            "Invalid broker address: {}",
            address
        )));
    }
    let port = port
        .parse::<u16>()
        .map_err(|_| RoverHelmError::Link(format!("Invalid broker port in: {}", address)))?;
    Ok((host.to_string(), port))
}
