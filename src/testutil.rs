// Copyright (c) 2026 rezky_nightky

use std::collections::VecDeque;

use rand::RngCore;

// Generator that returns the same word forever. `low()` uses a small nonzero
// word: zero would be rejected forever by `Uniform` integer sampling. It
// keeps every `random::<f64>()` near 0.0 (all chance gates pass) and every
// range sample at its lower bound; `high()` does the opposite.
#[derive(Clone, Copy, Debug)]
pub struct ConstRng(pub u64);

impl ConstRng {
    pub fn low() -> Self {
        ConstRng(1 << 16)
    }

    pub fn high() -> Self {
        ConstRng(u64::MAX)
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}

// Replays a fixed list of words, one per draw, then repeats `u64::MAX`.
// `next_u32` truncates the word.
#[derive(Clone, Debug)]
pub struct SeqRng {
    words: VecDeque<u64>,
}

impl SeqRng {
    pub fn new(words: impl IntoIterator<Item = u64>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

impl RngCore for SeqRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.words.pop_front().unwrap_or(u64::MAX)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for b in dst {
            *b = self.next_u64() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distr::{Distribution, Uniform};
    use rand::Rng;

    #[test]
    fn low_word_is_accepted_by_uniform_column_sampling() {
        for w in [1u16, 4, 10, 37, 40, 120] {
            let cols = Uniform::new_inclusive(0u16, w - 1).expect("valid range");
            assert_eq!(cols.sample(&mut ConstRng::low()), 0, "width {w}");
        }
        let speeds = Uniform::new(0.0f32, 1.0).expect("valid range");
        assert!(speeds.sample(&mut ConstRng::low()) < 0.001);
        assert!(ConstRng::low().random::<f64>() < 0.001);
    }

    #[test]
    fn high_word_samples_top_of_range() {
        let cols = Uniform::new_inclusive(0u16, 39).expect("valid range");
        assert_eq!(cols.sample(&mut ConstRng::high()), 39);
        assert_eq!(ConstRng::high().random_range(-3..=3), 3);
    }

    #[test]
    fn seq_rng_replays_then_saturates() {
        let mut rng = SeqRng::new([0, 1 << 31]);
        assert_eq!(rng.next_u64(), 0);
        assert_eq!(rng.next_u32(), 1 << 31);
        assert_eq!(rng.remaining(), 0);
        assert_eq!(rng.next_u64(), u64::MAX);
    }
}
