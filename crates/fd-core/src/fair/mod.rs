//! Commitment-based fair random draws.
//!
//! A draw picks a value uniformly in `0..=max`, publishes an HMAC-SHA256
//! commitment to it, and keeps the value and key sealed until the
//! counterpart has locked in its own input. [`Draw::reveal`] consumes the
//! draw, so a sealed value can be opened exactly once and a key is never
//! used for a second value.
//!
//! Uniformity comes from rejection sampling over 32-bit samples: samples
//! at or above the largest multiple of `max + 1` that fits in `2^32` are
//! discarded. The loop has no fixed bound. The rejection probability per
//! sample is below one half for any `max`, so the expected number of
//! samples is below two.

pub mod commitment;

pub use commitment::{Commitment, KEY_LEN, SecretKey, verify_hex};

use std::fmt;

use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

const SAMPLE_SPACE: u64 = 1 << 32;

/// Fair random generator over a cryptographically secure source.
///
/// The source is owned, so tests can substitute a seeded generator.
/// Failures of the source are returned as [`CoreError::Entropy`]; there is
/// no fallback to a weaker generator.
#[derive(Debug)]
pub struct FairRandom<R> {
    rng: R,
}

impl<R: TryCryptoRng> FairRandom<R> {
    /// Wrap a secure random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a value in `0..=max` and commit to it under a fresh key.
    pub fn draw(&mut self, max: u32) -> CoreResult<Draw> {
        let key = self.fresh_key()?;
        let value = self.uniform(max)?;
        let commitment = Commitment::new(&key, value)?;
        debug!(max, commitment = %commitment, "committed fair draw");
        Ok(Draw {
            commitment,
            reveal: Reveal { key, value, max },
        })
    }

    fn fresh_key(&mut self) -> CoreResult<SecretKey> {
        let mut bytes = [0u8; KEY_LEN];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CoreError::Entropy(e.to_string()))?;
        Ok(SecretKey::from_bytes(bytes))
    }

    fn uniform(&mut self, max: u32) -> CoreResult<u32> {
        let range = u64::from(max) + 1;
        let zone = rejection_zone(max);
        loop {
            let sample = self
                .rng
                .try_next_u32()
                .map_err(|e| CoreError::Entropy(e.to_string()))?;
            if u64::from(sample) < zone {
                // sample % range < range <= 2^32
                return Ok((u64::from(sample) % range) as u32);
            }
        }
    }
}

/// Exclusive upper bound of accepted 32-bit samples for range `0..=max`.
///
/// This is the largest multiple of `max + 1` not exceeding `2^32`.
pub fn rejection_zone(max: u32) -> u64 {
    let range = u64::from(max) + 1;
    SAMPLE_SPACE - SAMPLE_SPACE % range
}

/// A committed draw whose value is still sealed.
pub struct Draw {
    commitment: Commitment,
    reveal: Reveal,
}

impl fmt::Debug for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draw")
            .field("commitment", &self.commitment)
            .field("max", &self.reveal.max)
            .finish_non_exhaustive()
    }
}

impl Draw {
    /// The commitment to publish before the counterpart chooses.
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Upper bound of the drawn range.
    pub fn max(&self) -> u32 {
        self.reveal.max
    }

    /// Open the draw, exposing key and value.
    pub fn reveal(self) -> Reveal {
        self.reveal
    }
}

/// The opened key and value of a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    key: SecretKey,
    value: u32,
    max: u32,
}

impl Reveal {
    /// The secret key the commitment was made with.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// The committed value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Upper bound of the drawn range.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Check this reveal against a previously published commitment.
    pub fn verify(&self, commitment: &Commitment) -> bool {
        self.value <= self.max && commitment.verify(&self.key, self.value)
    }
}

/// Hex form of a revealed draw, for logs and transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealRecord {
    /// Upper bound of the drawn range.
    pub max: u32,
    /// Published commitment, uppercase hex.
    pub hmac: String,
    /// Revealed key, uppercase hex.
    pub key: String,
    /// Revealed value.
    pub value: u32,
}

impl RevealRecord {
    /// Record a reveal together with the commitment it opens.
    pub fn new(commitment: &Commitment, reveal: &Reveal) -> Self {
        Self {
            max: reveal.max,
            hmac: commitment.to_hex(),
            key: reveal.key.to_hex(),
            value: reveal.value,
        }
    }

    /// Recompute the commitment from the recorded key and value.
    pub fn verify(&self) -> CoreResult<bool> {
        Ok(self.value <= self.max && verify_hex(&self.key, self.value, &self.hmac)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{CryptoRng, RngCore, SeedableRng};

    use super::*;

    fn seeded(seed: u64) -> FairRandom<StdRng> {
        FairRandom::new(StdRng::seed_from_u64(seed))
    }

    /// Replays fixed 32-bit samples and counts how many were taken.
    /// Key bytes are constant and do not consume samples.
    struct Scripted {
        samples: VecDeque<u32>,
        taken: Rc<Cell<usize>>,
    }

    impl Scripted {
        fn new(samples: &[u32]) -> (Self, Rc<Cell<usize>>) {
            let taken = Rc::new(Cell::new(0));
            let rng = Self {
                samples: samples.iter().copied().collect(),
                taken: Rc::clone(&taken),
            };
            (rng, taken)
        }
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.taken.set(self.taken.get() + 1);
            self.samples.pop_front().expect("script ran out of samples")
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0x5a);
        }
    }

    impl CryptoRng for Scripted {}

    #[test]
    fn zone_is_multiple_of_range() {
        assert_eq!(rejection_zone(0), SAMPLE_SPACE);
        assert_eq!(rejection_zone(1), SAMPLE_SPACE);
        assert_eq!(rejection_zone(5), SAMPLE_SPACE - SAMPLE_SPACE % 6);
        assert_eq!(rejection_zone(5) % 6, 0);
        assert_eq!(rejection_zone(u32::MAX), SAMPLE_SPACE);
    }

    #[test]
    fn sample_past_zone_is_redrawn() {
        let (rng, taken) = Scripted::new(&[u32::MAX, 7]);
        let mut fair = FairRandom::new(rng);
        assert_eq!(fair.draw(5).unwrap().reveal().value(), 1);
        assert_eq!(taken.get(), 2);
    }

    #[test]
    fn sample_at_zone_is_redrawn() {
        let zone = rejection_zone(5);
        let (rng, taken) = Scripted::new(&[zone as u32, 2]);
        let mut fair = FairRandom::new(rng);
        assert_eq!(fair.draw(5).unwrap().reveal().value(), 2);
        assert_eq!(taken.get(), 2);
    }

    #[test]
    fn last_sample_below_zone_is_accepted() {
        let below = (rejection_zone(5) - 1) as u32;
        let (rng, taken) = Scripted::new(&[below]);
        let mut fair = FairRandom::new(rng);
        assert_eq!(fair.draw(5).unwrap().reveal().value(), 5);
        assert_eq!(taken.get(), 1);
    }

    #[test]
    fn sealed_draw_debug_hides_value_and_key() {
        let (rng, _) = Scripted::new(&[4]);
        let mut fair = FairRandom::new(rng);
        let draw = fair.draw(5).unwrap();
        let debug = format!("{draw:?}");
        assert!(debug.contains("max: 5"));
        assert!(!debug.contains("value"));
        assert!(!debug.contains("key"));
        assert!(!debug.contains("5A5A"));
    }

    #[test]
    fn zero_max_always_draws_zero() {
        let mut fair = seeded(1);
        for _ in 0..50 {
            assert_eq!(fair.draw(0).unwrap().reveal().value(), 0);
        }
    }

    #[test]
    fn reveal_opens_commitment() {
        let mut fair = seeded(2);
        let draw = fair.draw(5).unwrap();
        let commitment = *draw.commitment();
        let reveal = draw.reveal();
        assert!(reveal.verify(&commitment));
        assert!(commitment.verify(reveal.key(), reveal.value()));
    }

    #[test]
    fn reveal_does_not_open_other_commitment() {
        let mut fair = seeded(3);
        let first = fair.draw(5).unwrap();
        let second = fair.draw(5).unwrap();
        let other = *second.commitment();
        assert!(!first.reveal().verify(&other));
    }

    #[test]
    fn keys_are_never_reused() {
        let mut fair = seeded(4);
        let keys: HashSet<String> = (0..1000)
            .map(|_| fair.draw(1).unwrap().reveal().key().to_hex())
            .collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn os_source_draws() {
        let mut fair = FairRandom::new(rand::rngs::OsRng);
        let draw = fair.draw(5).unwrap();
        let commitment = *draw.commitment();
        let reveal = draw.reveal();
        assert!(reveal.value() <= 5);
        assert!(reveal.verify(&commitment));
    }

    #[test]
    fn six_way_draws_pass_chi_square() {
        const TRIALS: usize = 60_000;
        let mut fair = seeded(5);
        let mut counts = [0usize; 6];
        for _ in 0..TRIALS {
            counts[fair.draw(5).unwrap().reveal().value() as usize] += 1;
        }
        let expected = TRIALS as f64 / 6.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // df = 5, p = 0.0001
        assert!(chi2 < 25.74, "chi-square {chi2} for {counts:?}");
    }

    #[test]
    fn record_verifies_and_detects_tampering() {
        let mut fair = seeded(6);
        let draw = fair.draw(1).unwrap();
        let commitment = *draw.commitment();
        let reveal = draw.reveal();
        let mut record = RevealRecord::new(&commitment, &reveal);
        assert!(record.verify().unwrap());
        record.value ^= 1;
        assert!(!record.verify().unwrap());
    }

    proptest! {
        #[test]
        fn draw_stays_in_range(seed in any::<u64>(), max in any::<u32>()) {
            let mut fair = seeded(seed);
            let reveal = fair.draw(max).unwrap().reveal();
            prop_assert!(reveal.value() <= max);
        }

        #[test]
        fn every_draw_is_verifiable(seed in any::<u64>(), max in 0u32..1000) {
            let mut fair = seeded(seed);
            let draw = fair.draw(max).unwrap();
            let commitment = *draw.commitment();
            prop_assert!(draw.reveal().verify(&commitment));
        }
    }
}
