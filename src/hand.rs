use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::angle::Angle;
use crate::channel::{ChannelError, CommunicationChannel};
use crate::command::FingerCommand;
use crate::finger::Finger;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HandError {
    /// The hand refused or could not perform the motion.
    #[error("actuator fault on {finger}: {reason}")]
    ActuatorFault { finger: Finger, reason: String },
    /// The link to the hand is gone.
    #[error("channel fault: {0}")]
    ChannelFault(#[from] ChannelError),
}

impl HandError {
    /// Whether the interactive loop may keep prompting after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, HandError::ActuatorFault { .. })
    }
}

/// Finger actuation and teardown, as seen by the command interpreter.
#[async_trait]
pub trait HandController: Send {
    async fn move_finger(&mut self, command: FingerCommand) -> Result<(), HandError>;
    async fn close_connection(&mut self) -> Result<(), HandError>;
}

#[async_trait]
impl<H: HandController + ?Sized> HandController for Box<H> {
    async fn move_finger(&mut self, command: FingerCommand) -> Result<(), HandError> {
        (**self).move_finger(command).await
    }

    async fn close_connection(&mut self) -> Result<(), HandError> {
        (**self).close_connection().await
    }
}

pub struct BionicHand<C: CommunicationChannel> {
    channel: C,
    positions: [Option<Angle>; 5],
}

impl<C: CommunicationChannel> BionicHand<C> {
    pub fn new(channel: C) -> BionicHand<C> {
        debug!("Bionic hand attached to {}", channel.name());
        BionicHand {
            channel,
            positions: [None; 5],
        }
    }

    /// Last commanded angle of every finger, in canonical order.
    pub fn positions(&self) -> &[Option<Angle>; 5] {
        &self.positions
    }

    pub fn position(&self, finger: Finger) -> Option<Angle> {
        self.positions[finger.index() as usize]
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

#[async_trait]
impl<C: CommunicationChannel> HandController for BionicHand<C> {
    async fn move_finger(&mut self, command: FingerCommand) -> Result<(), HandError> {
        self.channel.send(command).await?;
        self.positions[command.finger.index() as usize] = Some(command.angle);
        Ok(())
    }

    async fn close_connection(&mut self) -> Result<(), HandError> {
        if let Err(e) = self.channel.close().await {
            warn!("Failed to close {}: {}", self.channel.name(), e);
            return Err(e.into());
        }
        Ok(())
    }
}
