use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::angle::{Angle, AngleError};
use crate::command::{CommandError, FingerCommand};
use crate::finger::{self, UnknownFinger, VALID_NAMES};
use crate::hand::HandController;

const FORMAT_HINT: &str = "Format: finger angle (e.g., 'thumb 90' or '1 90')";
const ANGLE_HINT: &str = "Invalid angle. Please enter a number.";
const FINGER_HINT: &str = "Invalid finger. Use name (thumb/index/middle/ring/pinky) or index (0-4)";
const QUIT: &str = "q";

/// How the process was asked to run, decided once from the positional arguments.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Invocation {
    Direct { finger: String, angle: String },
    Interactive,
    Usage,
}

impl Invocation {
    pub fn from_positionals(args: &[String]) -> Invocation {
        match args {
            [] => Invocation::Interactive,
            [finger, angle] => Invocation::Direct {
                finger: finger.clone(),
                angle: angle.clone(),
            },
            _ => Invocation::Usage,
        }
    }
}

fn range_hint() -> String {
    format!("Angle must be between {} and {}", Angle::MIN, Angle::MAX)
}

/// Turns user input into finger moves on a hand controller.
///
/// [`Interpreter::run`] consumes the interpreter, so the controller is
/// closed exactly once whichever way the session ends.
pub struct Interpreter<H: HandController, W: Write> {
    controller: H,
    out: W,
}

impl<H: HandController, W: Write> Interpreter<H, W> {
    pub fn new(controller: H, out: W) -> Interpreter<H, W> {
        Interpreter { controller, out }
    }

    /// Run one invocation, then close the controller.
    ///
    /// `input` is only read in interactive mode. `shutdown` ends either mode
    /// early. Validation failures are reported to the user and are not
    /// errors; controller faults are.
    pub async fn run<R, S>(mut self, invocation: Invocation, input: R, shutdown: S) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        let result = match invocation {
            Invocation::Direct { finger, angle } => {
                self.run_direct(&finger, &angle, shutdown).await
            }
            Invocation::Interactive => self.run_interactive(input, shutdown).await,
            Invocation::Usage => self.print_usage(),
        };
        let closed = self
            .controller
            .close_connection()
            .await
            .context("failed to close hand connection");
        result?;
        closed
    }

    async fn run_direct<S>(&mut self, finger: &str, angle: &str, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        let angle = match angle.parse::<Angle>() {
            Ok(angle) => angle,
            Err(AngleError::NotANumber) => {
                writeln!(self.out, "Error: Angle must be a number")?;
                writeln!(self.out, "Usage: finger-control [finger] [angle]")?;
                return Ok(());
            }
            Err(AngleError::OutOfRange(degrees)) => {
                debug!("rejected angle {}", degrees);
                writeln!(self.out, "{}", range_hint())?;
                return Ok(());
            }
        };
        let finger = match finger::resolve(finger) {
            Ok(finger) => finger,
            Err(UnknownFinger(token)) => {
                writeln!(self.out, "Unknown finger: {}", token)?;
                writeln!(self.out, "Valid fingers: {}", VALID_NAMES)?;
                return Ok(());
            }
        };
        writeln!(
            self.out,
            "Moving {} (finger {}) to {}",
            finger,
            finger.index(),
            angle
        )?;
        tokio::pin!(shutdown);
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                writeln!(self.out, "\nExiting...")?;
                Ok(())
            }
            moved = self.controller.move_finger(FingerCommand::new(finger, angle)) => {
                moved.with_context(|| format!("failed to move {} to {}", finger, angle))
            }
        }
    }

    async fn run_interactive<R, S>(&mut self, mut input: R, shutdown: S) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        S: Future<Output = ()>,
    {
        self.print_banner()?;
        let mut buf = Vec::new();
        tokio::pin!(shutdown);
        loop {
            buf.clear();
            write!(self.out, "\nEnter command: ")?;
            self.out.flush()?;
            let read = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    writeln!(self.out, "\nExiting...")?;
                    break;
                }
                read = input.read_until(b'\n', &mut buf) => read?,
            };
            if read == 0 {
                debug!("input closed");
                writeln!(self.out)?;
                break;
            }
            // undecodable bytes fall through to the usual parse hints
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if line.eq_ignore_ascii_case(QUIT) {
                break;
            }

            let command = match FingerCommand::parse_line(line) {
                Ok(command) => command,
                Err(e) => {
                    debug!("rejected {:?}: {}", line, e);
                    let hint = match e {
                        CommandError::WrongTokenCount(_) => FORMAT_HINT.to_owned(),
                        CommandError::Angle(AngleError::NotANumber) => ANGLE_HINT.to_owned(),
                        CommandError::Angle(AngleError::OutOfRange(_)) => range_hint(),
                        CommandError::Finger(_) => FINGER_HINT.to_owned(),
                    };
                    writeln!(self.out, "{}", hint)?;
                    continue;
                }
            };

            writeln!(self.out, "Moving {} to {}", command.finger, command.angle)?;
            match self.controller.move_finger(command).await {
                Ok(()) => info!("moved {} to {}", command.finger, command.angle),
                Err(e) if e.is_recoverable() => {
                    warn!("move failed: {}", e);
                    writeln!(self.out, "Command failed: {}", e)?;
                }
                Err(e) => {
                    writeln!(self.out, "Command failed: {}", e)?;
                    return Err(e).context("lost connection to the hand");
                }
            }
        }
        Ok(())
    }

    fn print_banner(&mut self) -> Result<()> {
        writeln!(self.out, "\n=== Quick Finger Control ===")?;
        writeln!(self.out, "Finger mapping:")?;
        writeln!(self.out, "0 = Thumb, 1 = Index, 2 = Middle, 3 = Ring, 4 = Pinky")?;
        writeln!(self.out, "\nCommands:")?;
        writeln!(self.out, "- Enter 'finger_name angle' (e.g., 'thumb 90')")?;
        writeln!(self.out, "- Enter 'finger_index angle' (e.g., '1 90')")?;
        writeln!(self.out, "- Enter 'q' to quit")?;
        Ok(())
    }

    fn print_usage(&mut self) -> Result<()> {
        writeln!(self.out, "Usage:")?;
        writeln!(self.out, "  finger-control                    # Interactive mode")?;
        writeln!(self.out, "  finger-control [finger] [angle]   # Direct control")?;
        writeln!(self.out, "Examples:")?;
        writeln!(self.out, "  finger-control thumb 90")?;
        writeln!(self.out, "  finger-control index 45")?;
        writeln!(self.out, "  finger-control 2 180    # Middle finger to 180°")?;
        Ok(())
    }
}
