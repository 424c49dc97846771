use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown finger: {0}")]
pub struct UnknownFinger(pub String);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Canonical names and short aliases, case-insensitive.
const ALIASES: &[(&str, Finger)] = &[
    ("thumb", Finger::Thumb),
    ("t", Finger::Thumb),
    ("index", Finger::Index),
    ("i", Finger::Index),
    ("pointer", Finger::Index),
    ("middle", Finger::Middle),
    ("m", Finger::Middle),
    ("ring", Finger::Ring),
    ("r", Finger::Ring),
    ("pinky", Finger::Pinky),
    ("p", Finger::Pinky),
    ("little", Finger::Pinky),
];

pub const VALID_NAMES: &str = "thumb, index, middle, ring, pinky";

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Finger::Thumb => "Thumb",
            Finger::Index => "Index",
            Finger::Middle => "Middle",
            Finger::Ring => "Ring",
            Finger::Pinky => "Pinky",
        }
    }
}

impl TryFrom<u8> for Finger {
    type Error = UnknownFinger;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Finger::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| UnknownFinger(index.to_string()))
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolve a finger reference.
///
/// Names and aliases are tried first, then a plain digit string naming an
/// index in `0..=4`. Signs, decimals and anything fuzzy are rejected.
pub fn resolve(token: &str) -> Result<Finger, UnknownFinger> {
    let token = token.trim();
    let folded = token.to_lowercase();
    if let Some((_, finger)) = ALIASES.iter().find(|(alias, _)| *alias == folded) {
        return Ok(*finger);
    }
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = token.parse::<u8>() {
            if let Ok(finger) = Finger::try_from(index) {
                return Ok(finger);
            }
        }
    }
    Err(UnknownFinger(token.to_owned()))
}
