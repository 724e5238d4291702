//! Deterministic random number generation.
//!
//! RULE: nothing in the core may call a platform RNG. All randomness
//! flows through DashRng streams derived from one master seed, so a
//! run (sample generation + every refresh perturbation) replays
//! exactly from its seed.
//!
//! Each consumer gets its own stream, seeded from
//! (master_seed XOR stream_slot). Adding a new stream never disturbs
//! existing streams.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct DashRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DashRng {
    pub fn new(master_seed: u64, slot: StreamSlot) -> Self {
        let derived = master_seed ^ ((slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: slot.name(),
            inner: Pcg64Mcg::seed_from_u64(derived),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform integer in [-spread, +spread]. The refresh simulator's
    /// perturbation primitive.
    pub fn jitter(&mut self, spread: i64) -> i64 {
        assert!(spread >= 0, "spread must be >= 0");
        self.next_u64_below(2 * spread as u64 + 1) as i64 - spread
    }

    /// Bernoulli trial: true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Sample = 0,
    Refresh = 1,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Refresh => "refresh",
        }
    }
}
