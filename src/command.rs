use crate::angle::{Angle, AngleError};
use crate::finger::{self, Finger, UnknownFinger};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    #[error("expected 2 tokens, got {0}")]
    WrongTokenCount(usize),
    #[error(transparent)]
    Angle(#[from] AngleError),
    #[error(transparent)]
    Finger(#[from] UnknownFinger),
}

/// A fully validated move request.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FingerCommand {
    pub finger: Finger,
    pub angle: Angle,
}

impl FingerCommand {
    pub fn new(finger: Finger, angle: Angle) -> FingerCommand {
        FingerCommand { finger, angle }
    }

    /// Validate a finger reference and an angle literal.
    ///
    /// The angle is checked before the finger so a bad angle is reported
    /// even when the finger is also wrong.
    pub fn parse(finger: &str, angle: &str) -> Result<FingerCommand, CommandError> {
        let angle = angle.parse::<Angle>()?;
        let finger = finger::resolve(finger)?;
        Ok(FingerCommand::new(finger, angle))
    }

    /// Parse a `<finger> <angle>` line as typed at the prompt.
    pub fn parse_line(line: &str) -> Result<FingerCommand, CommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [finger, angle] => FingerCommand::parse(finger, angle),
            _ => Err(CommandError::WrongTokenCount(tokens.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_by_name_and_index() {
        let command = FingerCommand::parse_line("thumb 90").unwrap();
        assert_eq!(command.finger.index(), 0);
        assert_eq!(command.angle.degrees(), 90);

        let command = FingerCommand::parse_line("  2\t180 ").unwrap();
        assert_eq!(command.finger, Finger::Middle);
        assert_eq!(command.angle.degrees(), 180);
    }

    #[test]
    fn token_count_checked_first() {
        assert_eq!(
            FingerCommand::parse_line("middle"),
            Err(CommandError::WrongTokenCount(1))
        );
        assert_eq!(FingerCommand::parse_line(""), Err(CommandError::WrongTokenCount(0)));
        assert_eq!(
            FingerCommand::parse_line("bogus x y"),
            Err(CommandError::WrongTokenCount(3))
        );
    }

    #[test]
    fn angle_checked_before_finger() {
        assert_eq!(
            FingerCommand::parse_line("bogus abc"),
            Err(CommandError::Angle(AngleError::NotANumber))
        );
        assert_eq!(
            FingerCommand::parse_line("1 200"),
            Err(CommandError::Angle(AngleError::OutOfRange(200)))
        );
        assert_eq!(
            FingerCommand::parse_line("7 10"),
            Err(CommandError::Finger(UnknownFinger("7".to_owned())))
        );
    }
}
