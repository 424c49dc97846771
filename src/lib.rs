//! Quick individual finger control for a bionic hand.
//!
//! Finger references and angles are validated here and handed to a
//! [`HandController`] one move at a time, either straight from the command
//! line or from an interactive prompt.

mod angle;
mod channel;
mod command;
mod finger;
mod hand;
mod interpreter;
mod protocol;

pub use angle::{Angle, AngleError};
pub use channel::{
    ChannelError, CommunicationChannel, SerialChannel, SimulatedChannel, DEFAULT_BAUD_RATE,
    SIM_PORT,
};
pub use command::{CommandError, FingerCommand};
pub use finger::{resolve as resolve_finger, Finger, UnknownFinger, VALID_NAMES};
pub use hand::{BionicHand, HandController, HandError};
pub use interpreter::{Interpreter, Invocation};
