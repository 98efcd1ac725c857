//! Core domain types for Chausar.

use crate::error::DiceError;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Number of tokens each player owns.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Fewest seats a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game can be started with.
pub const MAX_PLAYERS: usize = 4;

/// Seat color. Each color owns a track entry point and a home stretch.
///
/// Seats are colored in declaration order: seat 0 is red, seat 1 green,
/// seat 2 yellow, seat 3 blue.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Enters the track at index 0.
    Red,
    /// Enters the track at index 13.
    Green,
    /// Enters the track at index 26.
    Yellow,
    /// Enters the track at index 39.
    Blue,
}

impl Color {
    /// Returns the color bound to the given seat, if the seat exists.
    #[instrument]
    pub fn for_seat(seat: usize) -> Option<Self> {
        Self::iter().nth(seat)
    }

    /// Returns the seat index this color occupies.
    pub fn seat(self) -> usize {
        self as usize
    }
}

/// A board coordinate on the 15×15 grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("[{row},{col}]")]
pub struct Cell {
    /// Row, 0 at the top.
    pub row: u8,
    /// Column, 0 at the left.
    pub col: u8,
}

impl Cell {
    /// Creates a cell at the given row and column.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Seat index of a player (0-based, in turn order).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{_0}")]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Returns the seat as a `usize` index.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// Identifies one token: its owner's seat and its slot (0..4) within that seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{player}-{slot}")]
pub struct TokenId {
    /// Owning player.
    pub player: PlayerId,
    /// Slot within the owner's four tokens.
    pub slot: u8,
}

impl TokenId {
    /// Creates a token id.
    pub fn new(player: PlayerId, slot: u8) -> Self {
        Self { player, slot }
    }
}

/// The face of a six-sided die. Always within `1..=6`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// The face that releases tokens from base and grants an extra roll.
    pub const SIX: Self = Self(6);

    /// Returns the pip count.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true for a six.
    pub fn is_six(self) -> bool {
        self == Self::SIX
    }
}

impl TryFrom<u8> for DieFace {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DiceError::FaceOutOfRange(value))
        }
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}
