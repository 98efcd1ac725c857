//! Board geometry: the shared track, per-color entry points, home stretches
//! and safe cells.
//!
//! Everything here is a pure lookup over static tables. A token's progress is
//! measured in color-relative steps:
//!
//! - `0..=50` walk the shared 52-cell track starting at the color's entry cell
//! - `51..=55` walk the color's private five-cell home stretch
//! - `56` is the finish; it has no cell

use crate::types::{Cell, Color};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::instrument;

/// Side length of the square board grid.
pub const BOARD_SIZE: u8 = 15;

/// Number of cells on the shared cyclic track.
pub const TRACK_LEN: usize = 52;

/// Number of cells in each home stretch.
pub const HOME_STRETCH_LEN: usize = 5;

/// Last step that is still on the shared track.
pub const LAST_TRACK_STEP: u8 = 50;

/// First step inside the home stretch.
pub const HOME_STRETCH_START: u8 = LAST_TRACK_STEP + 1;

/// The step at which a token is finished.
pub const FINISH_STEP: u8 = HOME_STRETCH_START + HOME_STRETCH_LEN as u8;

const fn c(row: u8, col: u8) -> Cell {
    Cell::new(row, col)
}

/// The shared track, clockwise from red's entry cell.
#[rustfmt::skip]
pub const COMMON_PATH: [Cell; TRACK_LEN] = [
    c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5),
    c(5, 6), c(4, 6), c(3, 6), c(2, 6), c(1, 6), c(0, 6),
    c(0, 7), c(0, 8),
    c(1, 8), c(2, 8), c(3, 8), c(4, 8), c(5, 8),
    c(6, 9), c(6, 10), c(6, 11), c(6, 12), c(6, 13), c(6, 14),
    c(7, 14), c(8, 14),
    c(8, 13), c(8, 12), c(8, 11), c(8, 10), c(8, 9),
    c(9, 8), c(10, 8), c(11, 8), c(12, 8), c(13, 8), c(14, 8),
    c(14, 7), c(14, 6),
    c(13, 6), c(12, 6), c(11, 6), c(10, 6), c(9, 6),
    c(8, 5), c(8, 4), c(8, 3), c(8, 2), c(8, 1), c(8, 0),
    c(7, 0), c(6, 0),
];

#[rustfmt::skip]
const SAFE_CELLS: [Cell; 8] = [
    c(6, 1), c(1, 8), c(8, 13), c(13, 6),
    c(6, 2), c(2, 8), c(8, 12), c(12, 6),
];

static SAFE_ZONES: LazyLock<HashSet<Cell>> = LazyLock::new(|| SAFE_CELLS.into_iter().collect());

/// Where a color-relative step lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landing {
    /// On the shared track, where captures can happen.
    Track {
        /// Absolute index into [`COMMON_PATH`].
        index: usize,
        /// Board coordinate.
        cell: Cell,
    },
    /// Inside the color's private home stretch.
    HomeStretch {
        /// Board coordinate.
        cell: Cell,
    },
    /// Past the last home cell; the token is done.
    Finished,
}

impl Landing {
    /// Returns the board coordinate, if this landing has one.
    pub fn cell(&self) -> Option<Cell> {
        match self {
            Landing::Track { cell, .. } | Landing::HomeStretch { cell } => Some(*cell),
            Landing::Finished => None,
        }
    }
}

/// Returns the shared-track index at which `color` enters.
#[instrument]
pub fn start_index(color: Color) -> usize {
    match color {
        Color::Red => 0,
        Color::Green => 13,
        Color::Yellow => 26,
        Color::Blue => 39,
    }
}

/// Returns the cell a token of `color` occupies when it leaves base.
#[instrument]
pub fn entry_cell(color: Color) -> Cell {
    COMMON_PATH[start_index(color)]
}

/// Returns the five home-stretch cells of `color`, outermost first.
#[instrument]
pub fn home_stretch(color: Color) -> [Cell; HOME_STRETCH_LEN] {
    match color {
        Color::Red => [c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5)],
        Color::Green => [c(1, 7), c(2, 7), c(3, 7), c(4, 7), c(5, 7)],
        Color::Yellow => [c(7, 13), c(7, 12), c(7, 11), c(7, 10), c(7, 9)],
        Color::Blue => [c(13, 7), c(12, 7), c(11, 7), c(10, 7), c(9, 7)],
    }
}

/// Resolves a color-relative step to where it lands.
///
/// Steps beyond [`FINISH_STEP`] are clamped to `Finished`; callers guard
/// against overshoot before advancing.
#[instrument]
pub fn landing(color: Color, step: u8) -> Landing {
    if step <= LAST_TRACK_STEP {
        let index = (start_index(color) + usize::from(step)) % TRACK_LEN;
        Landing::Track {
            index,
            cell: COMMON_PATH[index],
        }
    } else if step < FINISH_STEP {
        Landing::HomeStretch {
            cell: home_stretch(color)[usize::from(step - HOME_STRETCH_START)],
        }
    } else {
        Landing::Finished
    }
}

/// Returns the coordinate for a color-relative step, or `None` at the finish.
#[instrument]
pub fn cell_at(color: Color, step: u8) -> Option<Cell> {
    landing(color, step).cell()
}

/// Returns true if tokens on `cell` are immune to capture.
#[instrument]
pub fn is_safe(cell: Cell) -> bool {
    SAFE_ZONES.contains(&cell)
}

/// Returns the shared-track index of `cell`, if it lies on the track.
#[instrument]
pub fn track_index_of(cell: Cell) -> Option<usize> {
    COMMON_PATH.iter().position(|&track| track == cell)
}
