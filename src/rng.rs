// Tiny seedable RNG (no external crate) plus the shuffle that orders an image's reveal.

/// Deterministic xorshift32 RNG for lightweight randomness.
/// Visual: decides which stitches appear first while an image is revealed.
#[derive(Clone, Debug)]
pub struct Rng32 { state: u32 }

impl Rng32 {
    pub fn from_seed(seed: u32) -> Self { Self { state: seed | 1 } }

    #[inline] pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `0..bound` (Lemire's multiply-shift with rejection).
    pub fn below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let m = (self.next_u32() as u64) * (bound as u64);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }
}

/// Fisher-Yates: every permutation of `items` is equally likely.
pub fn shuffle<T>(items: &mut [T], rng: &mut Rng32) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}
