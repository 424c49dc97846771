use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum AngleError {
    #[error("angle is not a number")]
    NotANumber,
    #[error("angle {0} is outside {min}..={max}", min = Angle::MIN, max = Angle::MAX)]
    OutOfRange(i64),
}

/// Joint angle in degrees, always within the actuator's safe range.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Angle(u8);

impl Angle {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 180;

    /// Out-of-range values are rejected, never clamped.
    pub fn new(degrees: i64) -> Result<Angle, AngleError> {
        if degrees < Angle::MIN as i64 || degrees > Angle::MAX as i64 {
            return Err(AngleError::OutOfRange(degrees));
        }
        Ok(Angle(degrees as u8))
    }

    pub fn degrees(self) -> u8 {
        self.0
    }
}

impl FromStr for Angle {
    type Err = AngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = s.trim().parse::<i64>().map_err(|_| AngleError::NotANumber)?;
        Angle::new(degrees)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whole_range() {
        for degrees in 0..=180 {
            assert_eq!(Angle::new(degrees).unwrap().degrees() as i64, degrees);
        }
    }

    #[test]
    fn rejects_outside_range() {
        for degrees in &[-1, -180, 181, 200, i64::MAX, i64::MIN] {
            assert_eq!(Angle::new(*degrees), Err(AngleError::OutOfRange(*degrees)));
        }
    }

    #[test]
    fn parse_distinguishes_failures() {
        assert_eq!("90".parse::<Angle>().unwrap().degrees(), 90);
        assert_eq!("+45".parse::<Angle>().unwrap().degrees(), 45);
        assert_eq!("ninety".parse::<Angle>(), Err(AngleError::NotANumber));
        assert_eq!("90.5".parse::<Angle>(), Err(AngleError::NotANumber));
        assert_eq!("".parse::<Angle>(), Err(AngleError::NotANumber));
        assert_eq!("200".parse::<Angle>(), Err(AngleError::OutOfRange(200)));
        assert_eq!("-5".parse::<Angle>(), Err(AngleError::OutOfRange(-5)));
    }

    #[test]
    fn display_in_degrees() {
        assert_eq!(Angle::new(45).unwrap().to_string(), "45°");
    }
}
