//! RNG oracle for deterministic random number generation.
//!
//! This module provides a trait-based RNG system that ensures deterministic
//! random number generation for dice draws, turn order picks, target picks and
//! encounter spawning.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. An encounter
//! replayed from the same game seed and the same inputs resolves identically.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Draw a single die digit in `0..=9`.
    ///
    /// A drawn `0` is the die face showing ten.
    fn digit(&self, seed: u64) -> u8 {
        (self.next_u32(seed) % 10) as u8
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Pick a uniform index in `0..len`. Returns 0 for empty or single-element sets.
    fn index(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32(seed) % len as u32) as usize
    }

    /// Roll a percentage chance (0-100 inclusive passes everything at 100).
    fn chance(&self, seed: u64, percent: u8) -> bool {
        self.range(seed, 1, 100) <= u32::from(percent)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Purpose of a draw, mixed into the seed so that independent draws made at
/// the same nonce never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DrawContext {
    /// Tens digit of a percentile roll.
    TensDigit = 0,
    /// Ones digit of a percentile roll.
    OnesDigit = 1,
    /// Dice roll as a whole (sub-seeded into the two digits).
    Dice = 2,
    /// Which combatant acts next.
    ActorPick = 3,
    /// Which player a monster attacks.
    TargetPick = 4,
    /// Which ally an ally outcome lands on.
    AllyPick = 5,
    /// Encounter composition.
    Spawn = 6,
    /// Day-advance ecosystem events.
    Ecosystem = 7,
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at session start (for replay/determinism)
/// * `nonce` - Draw sequence number (increments every draw)
/// * `actor_id` - Combatant the draw is made for
/// * `context` - Purpose of the draw
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Monotonic seed source.
///
/// Every call to [`SeedSequence::next`] consumes one nonce, so two draws never
/// share a seed even when they are made for the same actor and purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeedSequence {
    game_seed: u64,
    nonce: u64,
}

impl SeedSequence {
    pub const fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
        }
    }

    /// Returns the next seed for `actor` and `context`.
    pub fn next(&mut self, actor: u32, context: DrawContext) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, actor, context as u32);
        self.nonce += 1;
        seed
    }

    /// Number of seeds handed out so far.
    pub const fn nonce(&self) -> u64 {
        self.nonce
    }

    pub const fn game_seed(&self) -> u64 {
        self.game_seed
    }
}
