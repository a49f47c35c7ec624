//! Four-digit numerals and the modular character mapping.
//!
//! A character with code `c` is carried by any numeral `n` in `1..=9999`
//! with `n mod M == c`. [`generate`] picks one such numeral per character;
//! [`reduce`] maps a numeral back to its character.

pub mod generate;
pub mod reduce;

pub use generate::{CandidateTable, NumeralSource, RandomSource, ScriptedSource};
pub use reduce::{reduce, reduce_all};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, NumeralError};
use crate::raster::geometry::Quadrant;

/// Result type for numeral operations.
pub type NumeralResult<T> = std::result::Result<T, NumeralError>;

/// Largest four-digit numeral.
pub const MAX_NUMERAL: u16 = 9999;

/// Decimal place of a digit within a numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlaceValue {
    Units,
    Tens,
    Hundreds,
    Thousands,
}

impl PlaceValue {
    /// All places, lowest first. The position in this array is the rank.
    pub const ALL: [PlaceValue; 4] = [
        PlaceValue::Units,
        PlaceValue::Tens,
        PlaceValue::Hundreds,
        PlaceValue::Thousands,
    ];

    /// 0 for units up to 3 for thousands.
    pub fn rank(self) -> usize {
        match self {
            PlaceValue::Units => 0,
            PlaceValue::Tens => 1,
            PlaceValue::Hundreds => 2,
            PlaceValue::Thousands => 3,
        }
    }

    /// `10^rank`.
    pub fn weight(self) -> u16 {
        10u16.pow(self.rank() as u32)
    }

    /// The quadrant this place is drawn in.
    ///
    /// Units top-right, tens top-left, hundreds bottom-right, thousands
    /// bottom-left. Glyph assets and decoding both rely on this pairing.
    pub fn quadrant(self) -> Quadrant {
        match self {
            PlaceValue::Units => Quadrant::TopRight,
            PlaceValue::Tens => Quadrant::TopLeft,
            PlaceValue::Hundreds => Quadrant::BottomRight,
            PlaceValue::Thousands => Quadrant::BottomLeft,
        }
    }
}

impl std::fmt::Display for PlaceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaceValue::Units => write!(f, "units"),
            PlaceValue::Tens => write!(f, "tens"),
            PlaceValue::Hundreds => write!(f, "hundreds"),
            PlaceValue::Thousands => write!(f, "thousands"),
        }
    }
}

/// An integer in `0..=9999`, always viewed as four digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Numeral(u16);

impl Numeral {
    pub const ZERO: Numeral = Numeral(0);

    pub fn new(value: u32) -> NumeralResult<Self> {
        if value > MAX_NUMERAL as u32 {
            return Err(NumeralError::OutOfRange { value });
        }
        Ok(Self(value as u16))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// The digit at one place.
    pub fn digit(self, place: PlaceValue) -> u8 {
        ((self.0 / place.weight()) % 10) as u8
    }

    /// Digits in reading order: thousands, hundreds, tens, units.
    pub fn digits(self) -> [u8; 4] {
        [
            self.digit(PlaceValue::Thousands),
            self.digit(PlaceValue::Hundreds),
            self.digit(PlaceValue::Tens),
            self.digit(PlaceValue::Units),
        ]
    }

    /// Build from per-place digits, each taken mod 10.
    pub fn from_place_digits(digits: impl IntoIterator<Item = (PlaceValue, u8)>) -> Self {
        let value = digits
            .into_iter()
            .map(|(place, d)| (d % 10) as u16 * place.weight())
            .sum();
        Self(value)
    }
}

impl TryFrom<u16> for Numeral {
    type Error = NumeralError;

    fn try_from(value: u16) -> NumeralResult<Self> {
        Numeral::new(value as u32)
    }
}

impl From<Numeral> for u16 {
    fn from(n: Numeral) -> u16 {
        n.0
    }
}

impl std::fmt::Display for Numeral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Size of the character-code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Modulus(u32);

impl Modulus {
    /// 7-bit ASCII.
    pub const ASCII: Self = Self(128);

    pub fn new(modulus: u32) -> Result<Self, ConfigError> {
        if modulus == 0 || modulus > MAX_NUMERAL as u32 {
            return Err(ConfigError::InvalidModulus { modulus });
        }
        Ok(Self(modulus))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self::ASCII
    }
}

impl TryFrom<u32> for Modulus {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, ConfigError> {
        Modulus::new(value)
    }
}

impl From<Modulus> for u32 {
    fn from(m: Modulus) -> u32 {
        m.0
    }
}

impl std::fmt::Display for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
