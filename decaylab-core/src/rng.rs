//! Seeded return engines.
//!
//! Two engines are available, selected by [`RngEngine`]:
//!
//! - `Mt19937`: 32-bit Mersenne Twister seeded through the `init_by_array` key
//!   schedule, the seed split into little-endian 32-bit words. Together with
//!   [`uniform_index`] this reproduces the seed-30 reference trace.
//! - `ChaCha8`: `ChaCha8Rng::seed_from_u64`, portable across platforms and
//!   `rand` releases.
//!
//! Every engine feeds the same draw procedure, so a trace is fully determined
//! by `(engine, seed, variations, days)`.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_core::{impls, Error, RngCore};
use serde::{Deserialize, Serialize};

/// Pseudo-random engine driving the return stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngEngine {
    #[default]
    Mt19937,
    #[serde(rename = "chacha8")]
    ChaCha8,
}

impl RngEngine {
    pub const ALL: [RngEngine; 2] = [RngEngine::Mt19937, RngEngine::ChaCha8];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mt19937 => "mt19937",
            Self::ChaCha8 => "chacha8",
        }
    }

    /// Build a freshly seeded engine.
    pub fn build(self, seed: u64) -> Box<dyn RngCore + Send> {
        match self {
            Self::Mt19937 => Box::new(Mt19937::new(seed)),
            Self::ChaCha8 => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl fmt::Display for RngEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RngEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mt19937" | "mt" | "mersenne" => Ok(Self::Mt19937),
            "chacha8" | "chacha" => Ok(Self::ChaCha8),
            other => Err(format!(
                "unknown engine '{other}'. Valid: mt19937, chacha8"
            )),
        }
    }
}

// ─── MT19937 ─────────────────────────────────────────────────────────

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// 32-bit Mersenne Twister (MT19937).
#[derive(Clone)]
pub struct Mt19937 {
    state: Box<[u32; N]>,
    index: usize,
}

impl Mt19937 {
    /// Seed from a `u64` via `init_by_array`. A zero seed uses the key `[0]`.
    pub fn new(seed: u64) -> Self {
        let lo = seed as u32;
        let hi = (seed >> 32) as u32;
        if hi == 0 {
            Self::from_key(&[lo])
        } else {
            Self::from_key(&[lo, hi])
        }
    }

    /// Seed with the `init_genrand` routine (single 32-bit word).
    pub fn from_u32(seed: u32) -> Self {
        let mut state = Box::new([0u32; N]);
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    /// Seed with the `init_by_array` key schedule.
    pub fn from_key(key: &[u32]) -> Self {
        let mut rng = Self::from_u32(19_650_218);
        let mt = &mut rng.state;
        let key_len = key.len().max(1);
        let mut i = 1usize;
        let mut j = 0usize;

        for _ in 0..N.max(key_len) {
            let prev = mt[i - 1];
            let word = key.get(j).copied().unwrap_or(0);
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(word)
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key_len {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }
        mt[0] = UPPER_MASK;
        rng
    }

    fn twist(&mut self) {
        let mt = &mut self.state;
        for k in 0..N {
            let y = (mt[k] & UPPER_MASK) | (mt[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            mt[k] = mt[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }
}

impl fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mt19937").field("index", &self.index).finish()
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// ─── Draws ───────────────────────────────────────────────────────────

/// Draw an index in `0..n` uniformly by bit-rejection sampling.
///
/// `k = bit_length(n)`; take the top `k` bits of `next_u32()` and retry until
/// the value is below `n`. At least one word is consumed even when `n == 1`.
/// Sets wider than 32 bits fall back to the top bits of `next_u64()`.
pub fn uniform_index<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> usize {
    assert!(n > 0, "cannot draw from an empty set");
    let n = n as u64;
    let bits = 64 - n.leading_zeros();
    loop {
        let r = if bits <= 32 {
            u64::from(rng.next_u32() >> (32 - bits))
        } else {
            rng.next_u64() >> (64 - bits)
        };
        if r < n {
            return r as usize;
        }
    }
}

/// Finite stream of daily returns drawn with replacement from a variation set.
pub struct ReturnStream<'a, R: RngCore + ?Sized> {
    rng: &'a mut R,
    variations: &'a [f64],
    remaining: usize,
}

impl<'a, R: RngCore + ?Sized> ReturnStream<'a, R> {
    /// `variations` must be non-empty.
    pub fn new(rng: &'a mut R, variations: &'a [f64], days: usize) -> Self {
        Self {
            rng,
            variations,
            remaining: if variations.is_empty() { 0 } else { days },
        }
    }
}

impl<R: RngCore + ?Sized> Iterator for ReturnStream<'_, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = uniform_index(&mut *self.rng, self.variations.len());
        Some(self.variations[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: RngCore + ?Sized> ExactSizeIterator for ReturnStream<'_, R> {}
