use async_trait::async_trait;
use futures::SinkExt;
use std::time::Duration;
use thiserror::Error;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tokio_util::codec::FramedWrite;
use tracing::{debug, info};

use crate::command::FingerCommand;
use crate::protocol::HandProtocol;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChannelError {
    #[error("channel {0} is closed")]
    Closed(String),
    #[error("serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Transport between the hand controller and the hand.
#[async_trait]
pub trait CommunicationChannel: Send {
    async fn send(&mut self, command: FingerCommand) -> Result<(), ChannelError>;
    /// Closing an already closed channel is a no-op.
    async fn close(&mut self) -> Result<(), ChannelError>;
    fn name(&self) -> &str;
}

pub const SIM_PORT: &str = "SIM_PORT";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
pub(crate) const WRITE_TIMEOUT: u64 = 100;

/// Stand-in for the hand that only logs what it is told.
#[derive(Debug)]
pub struct SimulatedChannel {
    port: String,
    baud_rate: u32,
    sent: Vec<FingerCommand>,
    closed: bool,
}

impl SimulatedChannel {
    pub fn new(port: &str, baud_rate: u32) -> SimulatedChannel {
        info!("Opened simulated channel on {} at {} baud", port, baud_rate);
        SimulatedChannel {
            port: port.to_owned(),
            baud_rate,
            sent: vec![],
            closed: false,
        }
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn sent(&self) -> &[FingerCommand] {
        &self.sent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for SimulatedChannel {
    fn default() -> Self {
        SimulatedChannel::new(SIM_PORT, DEFAULT_BAUD_RATE)
    }
}

#[async_trait]
impl CommunicationChannel for SimulatedChannel {
    async fn send(&mut self, command: FingerCommand) -> Result<(), ChannelError> {
        if self.closed {
            return Err(ChannelError::Closed(self.port.clone()));
        }
        info!(
            "[SIM {}] finger {} -> {}",
            self.port,
            command.finger.index(),
            command.angle
        );
        self.sent.push(command);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ChannelError> {
        if !self.closed {
            info!("Closed simulated channel on {}", self.port);
            self.closed = true;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.port
    }
}

pub struct SerialChannel {
    port: String,
    framed_port: Option<FramedWrite<SerialStream, HandProtocol>>,
}

impl SerialChannel {
    pub fn new(port: &str) -> Result<SerialChannel, ChannelError> {
        SerialChannel::with_baud_rate(port, DEFAULT_BAUD_RATE)
    }

    pub fn with_baud_rate(port: &str, baud_rate: u32) -> Result<SerialChannel, ChannelError> {
        let serial_port = tokio_serial::new(port, baud_rate)
            .timeout(Duration::from_millis(WRITE_TIMEOUT))
            .open_native_async()?;
        info!("Opened serial channel on {} at {} baud", port, baud_rate);
        Ok(SerialChannel {
            port: port.to_owned(),
            framed_port: Some(FramedWrite::new(serial_port, HandProtocol)),
        })
    }
}

#[async_trait]
impl CommunicationChannel for SerialChannel {
    async fn send(&mut self, command: FingerCommand) -> Result<(), ChannelError> {
        let framed_port = self
            .framed_port
            .as_mut()
            .ok_or_else(|| ChannelError::Closed(self.port.clone()))?;
        framed_port.send(command).await?;
        debug!("wrote frame for finger {}", command.finger.index());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ChannelError> {
        if let Some(mut framed_port) = self.framed_port.take() {
            framed_port.close().await?;
            info!("Closed serial channel on {}", self.port);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::finger::Finger;

    #[tokio::test]
    async fn simulated_channel_records_commands() {
        let mut channel = SimulatedChannel::default();
        let command = FingerCommand::new(Finger::Ring, Angle::new(30).unwrap());
        channel.send(command).await.unwrap();
        assert_eq!(channel.sent(), &[command]);
        assert_eq!(channel.name(), SIM_PORT);
        assert_eq!(channel.baud_rate(), DEFAULT_BAUD_RATE);
    }

    #[tokio::test]
    async fn simulated_channel_rejects_send_after_close() {
        let mut channel = SimulatedChannel::new("SIM_TEST", 115200);
        channel.close().await.unwrap();
        channel.close().await.unwrap();
        assert!(channel.is_closed());
        let command = FingerCommand::new(Finger::Thumb, Angle::new(0).unwrap());
        assert!(matches!(
            channel.send(command).await,
            Err(ChannelError::Closed(port)) if port == "SIM_TEST"
        ));
        assert!(channel.sent().is_empty());
    }

    #[tokio::test]
    async fn serial_channel_missing_port_fails() {
        assert!(SerialChannel::new("/dev/finger-control-does-not-exist").is_err());
    }
}
