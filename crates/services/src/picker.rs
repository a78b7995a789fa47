use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quiz_core::session::ItemPicker;

/// Uniform random picker backed by an OS-seeded `StdRng`.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded variant for reproducible selection.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Deterministic picker that replays a scripted index sequence, then sticks
/// at the first candidate. Test helper.
#[derive(Debug, Default)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: usize,
}

impl SequencePicker {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }
}

impl ItemPicker for SequencePicker {
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.indices.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        idx.min(len.saturating_sub(1))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomPicker::seeded(7);
        for len in 1..=16 {
            for _ in 0..32 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn seeded_pickers_are_reproducible() {
        let mut a = RandomPicker::seeded(42);
        let mut b = RandomPicker::seeded(42);
        let seq_a: Vec<usize> = (0..8).map(|_| a.pick(10)).collect();
        let seq_b: Vec<usize> = (0..8).map(|_| b.pick(10)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn sequence_picker_replays_then_sticks_at_zero() {
        let mut picker = SequencePicker::new(vec![2, 1]);
        assert_eq!(picker.pick(5), 2);
        assert_eq!(picker.pick(5), 1);
        assert_eq!(picker.pick(5), 0);
        // Out-of-range scripted indices are clamped.
        let mut picker = SequencePicker::new(vec![9]);
        assert_eq!(picker.pick(3), 2);
    }
}
