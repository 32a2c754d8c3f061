//! Universal World Profile — the 9-character world code, e.g. `A867977-8`.
//!
//! ```text
//! A 8 6 7 9 7 7 - 8
//! | | | | | | |   +-- tech level
//! | | | | | | +------ law level
//! | | | | | +-------- government
//! | | | | +---------- population
//! | | | +------------ hydrographics
//! | | +-------------- atmosphere
//! | +---------------- size
//! +------------------ starport
//! ```
//!
//! Every numeric field is one eHex digit. [`Uwp`] is immutable; build one
//! with [`Uwp::new`] or parse it from text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ehex;

/// Length of a UWP string, separator included.
pub const UWP_LEN: usize = 9;

/// Position of the `-` before the tech level.
const SEPARATOR_POS: usize = 7;

/// Spaceport quality, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Starport {
    A,
    B,
    C,
    D,
    E,
    X,
}

impl Starport {
    pub const ALL: [Starport; 6] = [
        Starport::A,
        Starport::B,
        Starport::C,
        Starport::D,
        Starport::E,
        Starport::X,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Starport::A),
            'B' => Some(Starport::B),
            'C' => Some(Starport::C),
            'D' => Some(Starport::D),
            'E' => Some(Starport::E),
            'X' => Some(Starport::X),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Starport::A => 'A',
            Starport::B => 'B',
            Starport::C => 'C',
            Starport::D => 'D',
            Starport::E => 'E',
            Starport::X => 'X',
        }
    }

    /// Position in [`Starport::ALL`], used to index per-starport tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Starport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Why a string is not a UWP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UwpError {
    #[error("UWP must be 9 characters, got {0}")]
    WrongLength(usize),
    #[error("UWP needs '-' before the tech level, found '{0}'")]
    MissingSeparator(char),
    #[error("'{0}' is not a starport class (A-E or X)")]
    InvalidStarport(char),
    #[error("'{digit}' at position {position} is not an eHex digit")]
    InvalidDigit { position: usize, digit: char },
    #[error("{field} value {value} does not fit in one eHex digit")]
    FieldOutOfRange { field: &'static str, value: u8 },
}

/// A decoded world profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uwp {
    starport: Starport,
    size: u8,
    atmosphere: u8,
    hydrographics: u8,
    population: u8,
    government: u8,
    law_level: u8,
    tech_level: u8,
}

impl Uwp {
    /// Build a record, rejecting any field that will not encode as eHex.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        starport: Starport,
        size: u8,
        atmosphere: u8,
        hydrographics: u8,
        population: u8,
        government: u8,
        law_level: u8,
        tech_level: u8,
    ) -> Result<Self, UwpError> {
        let fields = [
            ("size", size),
            ("atmosphere", atmosphere),
            ("hydrographics", hydrographics),
            ("population", population),
            ("government", government),
            ("law level", law_level),
            ("tech level", tech_level),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| *v > ehex::MAX_VALUE) {
            return Err(UwpError::FieldOutOfRange { field, value });
        }
        Ok(Self {
            starport,
            size,
            atmosphere,
            hydrographics,
            population,
            government,
            law_level,
            tech_level,
        })
    }

    /// Generator-side constructor; values are already bounded by the
    /// rules, the clamp only guarantees the encoding invariant.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn clamped(
        starport: Starport,
        size: i32,
        atmosphere: i32,
        hydrographics: i32,
        population: i32,
        government: i32,
        law_level: i32,
        tech_level: i32,
    ) -> Self {
        let c = |v: i32| v.clamp(0, ehex::MAX_VALUE as i32) as u8;
        Self {
            starport,
            size: c(size),
            atmosphere: c(atmosphere),
            hydrographics: c(hydrographics),
            population: c(population),
            government: c(government),
            law_level: c(law_level),
            tech_level: c(tech_level),
        }
    }

    pub fn parse(text: &str) -> Result<Self, UwpError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != UWP_LEN {
            return Err(UwpError::WrongLength(chars.len()));
        }
        let starport = Starport::from_char(chars[0]).ok_or(UwpError::InvalidStarport(chars[0]))?;
        if chars[SEPARATOR_POS] != '-' {
            return Err(UwpError::MissingSeparator(chars[SEPARATOR_POS]));
        }
        let digit = |position: usize| {
            ehex::to_value(chars[position]).map_err(|_| UwpError::InvalidDigit {
                position,
                digit: chars[position],
            })
        };
        Ok(Self {
            starport,
            size: digit(1)?,
            atmosphere: digit(2)?,
            hydrographics: digit(3)?,
            population: digit(4)?,
            government: digit(5)?,
            law_level: digit(6)?,
            tech_level: digit(8)?,
        })
    }

    pub fn starport(&self) -> Starport {
        self.starport
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn atmosphere(&self) -> u8 {
        self.atmosphere
    }

    pub fn hydrographics(&self) -> u8 {
        self.hydrographics
    }

    pub fn population(&self) -> u8 {
        self.population
    }

    pub fn government(&self) -> u8 {
        self.government
    }

    pub fn law_level(&self) -> u8 {
        self.law_level
    }

    pub fn tech_level(&self) -> u8 {
        self.tech_level
    }

    pub fn is_populated(&self) -> bool {
        self.population > 0
    }
}

impl fmt::Display for Uwp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = |v: u8| ehex::to_digit(v as i32).map_err(|_| fmt::Error);
        write!(
            f,
            "{}{}{}{}{}{}{}-{}",
            self.starport,
            d(self.size)?,
            d(self.atmosphere)?,
            d(self.hydrographics)?,
            d(self.population)?,
            d(self.government)?,
            d(self.law_level)?,
            d(self.tech_level)?,
        )
    }
}

impl FromStr for Uwp {
    type Err = UwpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uwp::parse(s)
    }
}

impl TryFrom<String> for Uwp {
    type Error = UwpError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Uwp::parse(&value)
    }
}

impl From<Uwp> for String {
    fn from(uwp: Uwp) -> Self {
        uwp.to_string()
    }
}
