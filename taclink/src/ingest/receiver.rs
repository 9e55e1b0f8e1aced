//! Datalink receiver - UDP listener for broadcast telemetry datagrams.
//!
//! Binds a UDP socket, decodes each datagram through the front-end, and
//! forwards the decoded batches to the picture owner over a channel.
//! Datagrams are processed strictly in arrival order; the receiver never
//! reorders or deduplicates.
//!
//! # Example
//!
//! ```ignore
//! let (tx, mut rx) = mpsc::channel(64);
//! let receiver = DatalinkReceiver::new(ReceiverConfig::default(), tx);
//! let handle = receiver.start();
//!
//! while let Some(batch) = rx.recv().await {
//!     picture.ingest(&batch.records);
//! }
//! ```

use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use super::{decode_datagram, DecodedDatagram};

/// Largest datagram we expect on the wire.
const MAX_DATAGRAM_SIZE: usize = 8192;

/// Datalink receiver configuration.
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    /// Address to bind (default: all interfaces).
    pub bind_address: String,

    /// UDP port to listen on.
    pub port: u16,

    /// Timeout for socket receive operations.
    pub recv_timeout: Duration,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 49_604,
            recv_timeout: Duration::from_millis(500),
        }
    }
}

/// Error type for the datalink receiver.
#[derive(Debug, thiserror::Error)]
pub enum ReceiverError {
    /// Failed to bind the UDP socket.
    #[error("Failed to bind UDP socket on {address}:{port}: {source}")]
    SocketBind {
        address: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}

/// UDP receiver feeding decoded datagrams to the picture owner.
pub struct DatalinkReceiver {
    config: ReceiverConfig,
    batch_tx: mpsc::Sender<DecodedDatagram>,
}

impl DatalinkReceiver {
    /// Create a new receiver.
    pub fn new(config: ReceiverConfig, batch_tx: mpsc::Sender<DecodedDatagram>) -> Self {
        Self { config, batch_tx }
    }

    /// Create with default configuration.
    pub fn with_defaults(batch_tx: mpsc::Sender<DecodedDatagram>) -> Self {
        Self::new(ReceiverConfig::default(), batch_tx)
    }

    /// Get the configured port.
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// Start the receiver.
    ///
    /// Spawns an async task that listens for UDP datagrams until the
    /// channel closes.
    pub fn start(self) -> tokio::task::JoinHandle<Result<(), ReceiverError>> {
        tokio::spawn(self.run())
    }

    /// Run the receive loop.
    async fn run(self) -> Result<(), ReceiverError> {
        let socket = UdpSocket::bind(format!("{}:{}", self.config.bind_address, self.config.port))
            .await
            .map_err(|e| ReceiverError::SocketBind {
                address: self.config.bind_address.clone(),
                port: self.config.port,
                source: e,
            })?;

        info!(
            port = self.config.port,
            local_addr = ?socket.local_addr().ok(),
            "Datalink receiver started"
        );

        let mut buffer = [0u8; MAX_DATAGRAM_SIZE];
        let mut datagrams_received: u64 = 0;
        let mut batches_sent: u64 = 0;

        loop {
            if self.batch_tx.is_closed() {
                debug!("Batch channel closed, stopping receiver");
                break;
            }

            let recv_result =
                tokio::time::timeout(self.config.recv_timeout, socket.recv(&mut buffer)).await;

            match recv_result {
                Ok(Ok(len)) => {
                    datagrams_received += 1;
                    self.log_first_datagram(datagrams_received, &buffer[..len]);

                    match decode_datagram(&buffer[..len]) {
                        Some(batch) => {
                            batches_sent += 1;
                            self.send_batch(batch, batches_sent);
                        }
                        None => {
                            debug!(
                                len,
                                datagram_num = datagrams_received,
                                "Datagram too short for header, dropped"
                            );
                        }
                    }
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "UDP receive error");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
                Err(_) => {
                    trace!("No datalink traffic (timeout)");
                }
            }
        }

        info!(datagrams_received, batches_sent, "Datalink receiver stopped");
        Ok(())
    }

    fn log_first_datagram(&self, datagrams_received: u64, data: &[u8]) {
        if datagrams_received == 1 {
            let opcode = data.get(1).copied();
            info!(
                port = self.config.port,
                len = data.len(),
                opcode = ?opcode,
                "Received first datagram"
            );
        }
    }

    fn send_batch(&self, batch: DecodedDatagram, batches_sent: u64) {
        let opcode = batch.opcode;
        let records = batch.records.len();
        match self.batch_tx.try_send(batch) {
            Ok(()) => {
                if batches_sent == 1 {
                    info!(opcode, records, "First decoded batch sent to picture");
                } else {
                    trace!(opcode, records, "Decoded batch sent");
                }
            }
            Err(e) => {
                if batches_sent <= 3 {
                    warn!("Failed to send decoded batch: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReceiverConfig::default();
        assert_eq!(config.port, 49_604);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.recv_timeout, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_receiver_creation() {
        let (tx, _rx) = mpsc::channel(16);
        let receiver = DatalinkReceiver::with_defaults(tx);
        assert_eq!(receiver.port(), 49_604);
    }

    #[tokio::test]
    async fn test_bind_error_is_reported() {
        let (tx, _rx) = mpsc::channel(16);
        // Not a resolvable bind address.
        let receiver = DatalinkReceiver::new(
            ReceiverConfig {
                bind_address: "256.0.0.1".to_string(),
                port: 0,
                ..Default::default()
            },
            tx,
        );
        let result = receiver.start().await.unwrap();
        assert!(matches!(result, Err(ReceiverError::SocketBind { .. })));
    }
}
