//! Credential code model: nibbles, digit positions, and the 6-digit code.
//!
//! A 26-bit H10301 credential carries 24 data bits, edited on the device as
//! six hexadecimal digits. The types here make the value and position bounds
//! part of the type: a [`Nibble`] is always in `0..=0xF` and a [`DigitIndex`]
//! always addresses one of the [`CODE_LEN`] digits, so no call site needs a
//! range check.

use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;

use thiserror_no_std::Error;

/// Number of hex digits in a credential code.
pub const CODE_LEN: usize = 6;

/// Uppercase hex alphabet, indexed by nibble value.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

// ---------------------------------------------------------------------------
// Nibble
// ---------------------------------------------------------------------------

/// A 4-bit value in `0..=0xF`, displayed as one hex character.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nibble(u8);

impl Nibble {
    pub const MIN: Nibble = Nibble(0x0);
    pub const MAX: Nibble = Nibble(0xF);

    /// Returns `None` if `value` does not fit in four bits.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Next value, wrapping `0xF` back to `0x0`.
    pub const fn wrapping_inc(self) -> Self {
        if self.0 < Self::MAX.0 {
            Self(self.0 + 1)
        } else {
            Self::MIN
        }
    }

    /// Previous value, wrapping `0x0` around to `0xF`.
    pub const fn wrapping_dec(self) -> Self {
        if self.0 > Self::MIN.0 {
            Self(self.0 - 1)
        } else {
            Self::MAX
        }
    }

    /// Uppercase hex character for this value.
    pub const fn to_hex_char(self) -> char {
        HEX_DIGITS[self.0 as usize] as char
    }

    /// Parse a single hex character, upper- or lowercase.
    pub fn from_hex_char(c: char) -> Option<Self> {
        c.to_digit(16).map(|d| Self(d as u8))
    }
}

impl From<Nibble> for u8 {
    fn from(nibble: Nibble) -> Self {
        nibble.0
    }
}

impl fmt::Display for Nibble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_char())
    }
}

// ---------------------------------------------------------------------------
// DigitIndex
// ---------------------------------------------------------------------------

/// Position of one digit within a [`CardCode`], always `< CODE_LEN`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigitIndex(u8);

impl DigitIndex {
    pub const FIRST: DigitIndex = DigitIndex(0);
    pub const LAST: DigitIndex = DigitIndex(CODE_LEN as u8 - 1);

    pub const fn new(index: usize) -> Option<Self> {
        if index < CODE_LEN {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// Position to the right, wrapping from the last digit to the first.
    pub const fn next(self) -> Self {
        if self.0 < Self::LAST.0 {
            Self(self.0 + 1)
        } else {
            Self::FIRST
        }
    }

    /// Position to the left, wrapping from the first digit to the last.
    pub const fn prev(self) -> Self {
        if self.0 > Self::FIRST.0 {
            Self(self.0 - 1)
        } else {
            Self::LAST
        }
    }

    /// Every position, left to right.
    pub fn all() -> impl Iterator<Item = DigitIndex> {
        (0..CODE_LEN as u8).map(DigitIndex)
    }
}

impl From<DigitIndex> for usize {
    fn from(index: DigitIndex) -> Self {
        index.get()
    }
}

// ---------------------------------------------------------------------------
// CardCode
// ---------------------------------------------------------------------------

/// Errors produced when parsing a [`CardCode`] from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeParseError {
    #[error("expected {expected} hex digits, found {found}")]
    Length { expected: usize, found: usize },
    #[error("invalid hex digit {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
}

/// Six hex digits, most significant first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardCode([Nibble; CODE_LEN]);

impl CardCode {
    /// All digits zero.
    pub const fn zeroed() -> Self {
        Self([Nibble::MIN; CODE_LEN])
    }

    pub const fn from_nibbles(nibbles: [Nibble; CODE_LEN]) -> Self {
        Self(nibbles)
    }

    pub fn nibbles(&self) -> &[Nibble; CODE_LEN] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Nibble> + '_ {
        self.0.iter().copied()
    }

    /// Hex characters for every digit, left to right.
    pub fn to_hex_chars(&self) -> [char; CODE_LEN] {
        self.0.map(Nibble::to_hex_char)
    }
}

impl Index<DigitIndex> for CardCode {
    type Output = Nibble;

    fn index(&self, index: DigitIndex) -> &Self::Output {
        &self.0[index.get()]
    }
}

impl IndexMut<DigitIndex> for CardCode {
    fn index_mut(&mut self, index: DigitIndex) -> &mut Self::Output {
        &mut self.0[index.get()]
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nibble in self.0 {
            write!(f, "{}", nibble)?;
        }
        Ok(())
    }
}

impl FromStr for CardCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != CODE_LEN {
            return Err(CodeParseError::Length {
                expected: CODE_LEN,
                found,
            });
        }

        let mut code = Self::zeroed();
        for (position, (digit, slot)) in s.chars().zip(code.0.iter_mut()).enumerate() {
            *slot = Nibble::from_hex_char(digit)
                .ok_or(CodeParseError::InvalidDigit { digit, position })?;
        }
        Ok(code)
    }
}
