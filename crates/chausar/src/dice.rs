//! Dice sources.
//!
//! Randomness is the engine's only source of non-determinism, so it is
//! injected. Production play uses [`RandomDice`]; tests force exact rolls
//! with [`ScriptedDice`].

use crate::error::DiceError;
use crate::types::DieFace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Produces die faces on demand.
pub trait DiceSource: Send {
    /// Rolls once.
    fn next_face(&mut self) -> DieFace;
}

/// A fair six-sided die backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDice<StdRng> {
    /// A reproducible die for the given seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A die seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> DiceSource for RandomDice<R> {
    fn next_face(&mut self) -> DieFace {
        let pips: u8 = self.rng.gen_range(1..=6);
        debug!(pips, "Rolled");
        // gen_range(1..=6) always yields a valid face
        DieFace::try_from(pips).unwrap_or(DieFace::SIX)
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<DieFace>,
    cursor: usize,
}

impl ScriptedDice {
    /// Builds a script from raw pip counts.
    ///
    /// # Errors
    ///
    /// Returns `DiceError::EmptyScript` for an empty list and
    /// `DiceError::FaceOutOfRange` for any value outside `1..=6`.
    #[instrument]
    pub fn new(pips: &[u8]) -> Result<Self, DiceError> {
        if pips.is_empty() {
            return Err(DiceError::EmptyScript);
        }
        let faces = pips
            .iter()
            .map(|&p| DieFace::try_from(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { faces, cursor: 0 })
    }
}

impl DiceSource for ScriptedDice {
    fn next_face(&mut self) -> DieFace {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}
