use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Seeded random stream owned by a single generation run.
///
/// The effective seed is kept so it can be reported back, whether it was
/// supplied by the caller or drawn from system entropy.
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
}

impl RandomSource {
    /// Seeded from `seed`, or from a freshly drawn seed when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => RandomSource::from_seed(s),
            None => RandomSource::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        RandomSource {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a 32-bit seed from the OS so it stays short enough to retype.
    pub fn from_entropy() -> Self {
        let seed = u64::from(rand::rng().random::<u32>());
        RandomSource::from_seed(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `0..n`.
    ///
    /// # Panics
    /// If `n` is zero.
    pub fn uniform_int(&mut self, n: usize) -> usize {
        assert!(n > 0, "cannot draw from an empty range");
        self.rng.random_range(0..n)
    }

    /// Uniformly chosen element of `items`.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.uniform_int(items.len())])
        }
    }

    /// Fisher-Yates shuffle drawing from the same stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::from_seed(42);
        let mut b = RandomSource::new(Some(42));
        let draws_a = (0..32).map(|_| a.uniform_int(1000)).collect::<Vec<_>>();
        let draws_b = (0..32).map(|_| b.uniform_int(1000)).collect::<Vec<_>>();
        assert_eq!(draws_a, draws_b);

        let mut xs = (0..20).collect::<Vec<_>>();
        let mut ys = xs.clone();
        a.shuffle(&mut xs);
        b.shuffle(&mut ys);
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_uniform_int_in_range() {
        let mut rng = RandomSource::from_seed(7);
        assert!((0..1000).all(|_| rng.uniform_int(3) < 3));
        assert_eq!(rng.uniform_int(1), 0);
    }

    #[test]
    fn test_entropy_seed_is_reported() {
        let rng = RandomSource::new(None);
        assert!(rng.seed() <= u64::from(u32::MAX));
        let mut replay = RandomSource::from_seed(rng.seed());
        let mut original = rng.clone();
        assert_eq!(original.uniform_int(1 << 20), replay.uniform_int(1 << 20));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = RandomSource::from_seed(3);
        let mut xs = (0..50).collect::<Vec<_>>();
        rng.shuffle(&mut xs);
        let mut sorted = xs.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose() {
        let mut rng = RandomSource::from_seed(9);
        assert_eq!(rng.choose::<u8>(&[]), None);
        assert_eq!(rng.choose(&[5]), Some(&5));
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn test_uniform_int_zero_panics() {
        RandomSource::from_seed(1).uniform_int(0);
    }
}
