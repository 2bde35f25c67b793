//! MT19937 uniform generator.
//!
//! RULE: the output stream is a pure function of the seed. Same seed,
//! same words, on every run and every platform. The three seeding paths
//! (scalar, array, crypto) all land in the same 624-word state.
//!
//! Scalar and array seeding follow the reference `init_genrand` /
//! `init_by_array` routines bit for bit, so streams can be checked against
//! any other MT19937 implementation.

use crate::{
    entropy,
    error::RollResult,
    seed::Seed,
};
use rand::RngCore;
use std::fmt;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Scalar seed applied before array mixing.
const ARRAY_BASE_SEED: u32 = 19_650_218;

/// Anything that can hand out uniform reals in [0, 1).
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Mersenne Twister state plus the seed that produced it.
#[derive(Clone)]
pub struct UniformGenerator {
    mt:   [u32; N],
    mti:  usize,
    seed: Seed,
}

impl UniformGenerator {
    /// Seed from `seed`, or from the entropy chain when `None`.
    ///
    /// An invalid seed is not fatal: a warning is logged and a crypto seed
    /// is used instead. Check [`seed`](Self::seed) for what was applied, or
    /// use [`try_new`](Self::try_new) to get the error instead.
    pub fn new(seed: Option<Seed>) -> Self {
        let mut generator = Self::unseeded();
        generator.init(seed);
        generator
    }

    /// Seed strictly: an invalid seed is returned as an error.
    pub fn try_new(seed: impl Into<Seed>) -> RollResult<Self> {
        let seed = seed.into();
        seed.validate()?;
        let mut generator = Self::unseeded();
        generator.apply(seed);
        Ok(generator)
    }

    /// Scalar seeding (`init_genrand`).
    pub fn with_int(seed: u64) -> RollResult<Self> {
        Self::try_new(Seed::Int(seed))
    }

    /// Array seeding (`init_by_array`).
    pub fn with_array(key: &[u64]) -> RollResult<Self> {
        Self::try_new(Seed::Array(key.to_vec()))
    }

    /// Seed from a freshly generated crypto seed array.
    pub fn with_crypto() -> Self {
        Self::new(None)
    }

    fn unseeded() -> Self {
        Self {
            mt:   [0; N],
            mti:  N,
            seed: Seed::Int(0),
        }
    }

    /// The seed currently in effect.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Re-seed. Returns the seed actually applied, which is a fresh crypto
    /// seed when `seed` is invalid.
    pub fn set_seed(&mut self, seed: impl Into<Seed>) -> &Seed {
        self.reseed(Some(seed.into()))
    }

    /// Re-seed from `seed`, or from the entropy chain when `None`.
    pub fn reseed(&mut self, seed: Option<Seed>) -> &Seed {
        self.init(seed);
        &self.seed
    }

    fn init(&mut self, seed: Option<Seed>) {
        let Some(seed) = seed else {
            self.seed_crypto();
            return;
        };
        match seed.validate() {
            Ok(()) => self.apply(seed),
            Err(e) => {
                log::warn!("{e}; generating a random seed array instead");
                self.seed_crypto();
            }
        }
    }

    fn apply(&mut self, seed: Seed) {
        match &seed {
            Seed::Int(value) => self.seed_int(*value as u32),
            Seed::Array(key) => self.seed_array(key),
        }
        self.seed = seed;
    }

    fn seed_int(&mut self, seed: u32) {
        self.mt[0] = seed;
        for i in 1..N {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.mti = N;
    }

    fn seed_array(&mut self, key: &[u64]) {
        self.seed_int(ARRAY_BASE_SEED);
        let mut i = 1;
        let mut j = 0;

        for _ in 0..N.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j] as u32)
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..N - 1 {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                self.mt[0] = self.mt[N - 1];
                i = 1;
            }
        }

        // MSB is 1, assuring a non-zero initial state.
        self.mt[0] = UPPER_MASK;
        self.mti = N;
    }

    fn seed_crypto(&mut self) {
        let seed = entropy::create_random_seed();
        log::debug!("Crypto seed generated: {seed}");
        self.apply(seed);
    }

    /// Regenerate all 624 words in one pass.
    fn twist(&mut self) {
        for kk in 0..N {
            let y = (self.mt[kk] & UPPER_MASK) | (self.mt[(kk + 1) % N] & LOWER_MASK);
            let mut next = self.mt[(kk + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.mt[kk] = next;
        }
        self.mti = 0;
    }

    /// Next tempered 32-bit word.
    pub fn int32(&mut self) -> u32 {
        if self.mti >= N {
            self.twist();
        }
        let mut y = self.mt[self.mti];
        self.mti += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// 53-bit real in [0, 1) built from two consecutive words.
    pub fn random(&mut self) -> f64 {
        let a = self.int32() >> 5;
        let b = self.int32() >> 6;
        (f64::from(a) * 67_108_864.0 + f64::from(b)) * (1.0 / 9_007_199_254_740_992.0)
    }
}

impl UniformSource for UniformGenerator {
    fn next_uniform(&mut self) -> f64 {
        self.random()
    }
}

impl RngCore for UniformGenerator {
    fn next_u32(&mut self) -> u32 {
        self.int32()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.int32());
        let lo = u64::from(self.int32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.int32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl fmt::Debug for UniformGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniformGenerator")
            .field("seed", &self.seed)
            .field("mti", &self.mti)
            .finish_non_exhaustive()
    }
}
