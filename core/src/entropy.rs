//! Secure seed material for crypto seeding.
//!
//! Sources are tried in order: the OS secure source, then the thread-local
//! CSPRNG, then a clock-seeded PCG fill. Every step down the chain logs a
//! quality warning. The chain itself never fails.

use crate::seed::Seed;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Shortest seed array produced by [`create_random_seed`].
pub const MIN_SEED_WORDS: usize = 20;
/// Longest seed array produced by [`create_random_seed`].
pub const MAX_SEED_WORDS: usize = 623;

/// A named link in the entropy chain.
pub type EntropySource<'a> = (&'static str, &'a mut dyn RngCore);

/// Generate a random seed array of 20..=623 32-bit words.
pub fn create_random_seed() -> Seed {
    let mut os = rand::rngs::OsRng;
    let mut thread = rand::thread_rng();
    seed_words_from(&mut [
        ("os", &mut os as &mut dyn RngCore),
        ("thread", &mut thread as &mut dyn RngCore),
    ])
}

/// Build a seed array from the first source in `sources` that can deliver
/// bytes. The first word picks the array length, the rest fill it.
pub fn seed_words_from(sources: &mut [EntropySource<'_>]) -> Seed {
    let mut bytes = vec![0u8; 4 * (MAX_SEED_WORDS + 1)];
    fill_from_chain(sources, &mut bytes);

    let words: Vec<u64> = bytes
        .chunks_exact(4)
        .map(|c| u64::from(u32::from_le_bytes([c[0], c[1], c[2], c[3]])))
        .collect();
    let span = (MAX_SEED_WORDS - MIN_SEED_WORDS + 1) as u64;
    let len = MIN_SEED_WORDS + (words[0] % span) as usize;
    Seed::Array(words[1..=len].to_vec())
}

fn fill_from_chain(sources: &mut [EntropySource<'_>], dest: &mut [u8]) {
    for (name, rng) in sources.iter_mut() {
        match rng.try_fill_bytes(dest) {
            Ok(()) => return,
            Err(e) => log::warn!(
                "Seed source '{name}' unavailable ({e}); seed quality degraded, trying next source"
            ),
        }
    }
    log::warn!("No secure seed source available; using a clock-seeded pseudo-random fill");
    clock_seeded().fill_bytes(dest);
}

fn clock_seeded() -> Pcg64Mcg {
    static CALLS: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let call = CALLS.fetch_add(1, Ordering::Relaxed);
    let mixed = nanos
        ^ call.wrapping_mul(0x9e37_79b9_7f4a_7c15)
        ^ u64::from(std::process::id()).rotate_left(32);
    Pcg64Mcg::seed_from_u64(mixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    struct Offline;

    impl RngCore for Offline {
        fn next_u32(&mut self) -> u32 {
            panic!("offline source drawn directly")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("offline source drawn directly")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("offline source drawn directly")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("offline")))
        }
    }

    fn words(seed: &Seed) -> &[u64] {
        match seed {
            Seed::Array(words) => words,
            Seed::Int(_) => panic!("crypto seeds are arrays"),
        }
    }

    #[test]
    fn length_stays_in_bounds() {
        for _ in 0..50 {
            let seed = create_random_seed();
            let len = words(&seed).len();
            assert!((MIN_SEED_WORDS..=MAX_SEED_WORDS).contains(&len), "len {len}");
            assert!(seed.is_valid());
        }
    }

    #[test]
    fn first_word_picks_length() {
        // StepRng(0, 1) yields u64s 0, 1, 2, ... so word 0 is zero.
        let mut step = StepRng::new(0, 1);
        let seed = seed_words_from(&mut [("step", &mut step as &mut dyn RngCore)]);
        assert_eq!(words(&seed).len(), MIN_SEED_WORDS);
        assert_eq!(&words(&seed)[..3], &[0, 1, 0]);
    }

    #[test]
    fn unavailable_source_falls_through_to_next() {
        let mut offline = Offline;
        let mut step = StepRng::new(7, 3);
        let chained = seed_words_from(&mut [
            ("offline", &mut offline as &mut dyn RngCore),
            ("step", &mut step as &mut dyn RngCore),
        ]);

        let mut step = StepRng::new(7, 3);
        let direct = seed_words_from(&mut [("step", &mut step as &mut dyn RngCore)]);

        assert_eq!(chained, direct);
    }

    #[test]
    fn exhausted_chain_still_produces_a_seed() {
        let mut offline = Offline;
        let seed = seed_words_from(&mut [("offline", &mut offline as &mut dyn RngCore)]);
        assert!(seed.is_valid());
        assert!(words(&seed).len() >= MIN_SEED_WORDS);
    }
}
