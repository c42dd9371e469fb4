use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every random decision in the game flows through one of these.
///
/// `Seeded` is the normal mode: a `StdRng` grown from a single `u64`, so a
/// whole session replays identically from its seed. `Scripted` feeds back a
/// fixed list of raw outcomes in order and is the test oracle: a test that
/// knows how many draws a turn makes can dictate every one of them.
#[derive(Debug, Clone)]
pub enum GameRng {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng::Seeded(StdRng::seed_from_u64(seed))
    }

    pub fn scripted(outcomes: Vec<u8>) -> Self {
        GameRng::Scripted { outcomes, index: 0 }
    }

    fn take(outcomes: &[u8], index: &mut usize, reason: &str) -> u8 {
        if *index >= outcomes.len() {
            panic!(
                "scripted rng ran out of outcomes (needed one for: {})",
                reason
            );
        }
        let value = outcomes[*index];
        *index += 1;
        value
    }

    /// Uniform roll in 1..=100. Accuracy checks, effect chances, and catch
    /// rolls all use this.
    pub fn percent(&mut self, reason: &str) -> u8 {
        match self {
            GameRng::Seeded(rng) => rng.random_range(1u8..=100),
            GameRng::Scripted { outcomes, index } => Self::take(outcomes, index, reason),
        }
    }

    /// Damage spread percentage in 85..=100. Scripted values outside the
    /// range are clamped into it.
    pub fn spread(&mut self, reason: &str) -> u8 {
        match self {
            GameRng::Seeded(rng) => rng.random_range(85u8..=100),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, reason).clamp(85, 100)
            }
        }
    }

    /// Critical-hit roll in 1..=16. A 1 is a critical hit, so the crit rate
    /// is exactly 1/16.
    pub fn crit_roll(&mut self, reason: &str) -> u8 {
        match self {
            GameRng::Seeded(rng) => rng.random_range(1u8..=16),
            GameRng::Scripted { outcomes, index } => Self::take(outcomes, index, reason),
        }
    }

    /// Fair coin. Scripted: odd values are heads (true).
    pub fn coin_flip(&mut self, reason: &str) -> bool {
        match self {
            GameRng::Seeded(rng) => rng.random_ratio(1, 2),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, reason) % 2 == 1
            }
        }
    }

    /// IV draw, 0..=31.
    pub fn iv(&mut self, reason: &str) -> u8 {
        match self {
            GameRng::Seeded(rng) => rng.random_range(0u8..=31),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, reason).min(31)
            }
        }
    }

    /// 1-in-4096 shiny draw. Scripted: a 1 means shiny.
    pub fn shiny(&mut self, reason: &str) -> bool {
        match self {
            GameRng::Seeded(rng) => rng.random_ratio(1, 4096),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, reason) == 1
            }
        }
    }

    /// Uniform index into a non-empty collection of `len` items.
    pub fn pick(&mut self, len: usize, reason: &str) -> usize {
        assert!(len > 0, "cannot pick from an empty collection ({})", reason);
        match self {
            GameRng::Seeded(rng) => rng.random_range(0..len),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, reason) as usize % len
            }
        }
    }

    /// Fresh trainer id for a new player.
    pub fn trainer_id(&mut self) -> u16 {
        match self {
            GameRng::Seeded(rng) => rng.random_range(0u16..=u16::MAX),
            GameRng::Scripted { outcomes, index } => {
                Self::take(outcomes, index, "trainer id") as u16
            }
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng::seeded(0)
    }
}
