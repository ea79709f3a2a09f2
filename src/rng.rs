use rand::{rngs::StdRng, Rng, SeedableRng};

pub(crate) struct BugRng {
    inner: StdRng,
}

impl BugRng {
    pub(crate) fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Uniform in `[min, max)`. An empty range yields `min`.
    pub(crate) fn random_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    pub(crate) fn next_bug(&mut self) -> u8 {
        self.random_int(0, 10) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_half_open_range() {
        let mut rng = BugRng::seeded(7);
        for _ in 0..2_000 {
            let v = rng.random_int(3, 6);
            assert!((3..6).contains(&v));
        }
    }

    #[test]
    fn every_digit_shows_up() {
        let mut rng = BugRng::seeded(0xC0FFEE);
        let mut seen = [false; 10];
        for _ in 0..1_000 {
            seen[rng.next_bug() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = BugRng::seeded(1);
        assert_eq!(rng.random_int(4, 4), 4);
        assert_eq!(rng.random_int(9, 2), 9);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BugRng::seeded(42);
        let mut b = BugRng::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.next_bug(), b.next_bug());
        }
    }
}
