use rand::Rng;

use super::model::{LaptopDataset, SplitPair};

/// Default relative perturbation for a refresh.
pub const DEFAULT_JITTER_PCT: f64 = 0.06;

// ---------------------------------------------------------------------------
// Jitter
// ---------------------------------------------------------------------------

/// Perturb `value` by up to `value * pct` in either direction.
///
/// The sign is a fair coin and the magnitude an independent uniform draw, so
/// two values are taken from `rng` per call. The result is rounded to the
/// nearest integer and never negative.
pub fn jitter<R: Rng + ?Sized>(value: f64, pct: f64, rng: &mut R) -> f64 {
    let delta = value * pct;
    let sign = if rng.gen::<f64>() > 0.5 { 1.0 } else { -1.0 };
    let offset = sign * rng.gen::<f64>() * delta;
    (value + offset).round().max(0.0)
}

fn jitter_all<R: Rng + ?Sized>(values: &mut [f64], pct: f64, rng: &mut R) {
    for v in values.iter_mut() {
        *v = jitter(*v, pct, rng);
    }
}

// ---------------------------------------------------------------------------
// Randomizer
// ---------------------------------------------------------------------------

/// Applies [`jitter`] across a whole dataset.
#[derive(Debug, Clone, Copy)]
pub struct Randomizer {
    pub pct: f64,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self {
            pct: DEFAULT_JITTER_PCT,
        }
    }
}

impl Randomizer {
    pub fn new(pct: f64) -> Self {
        Self { pct }
    }

    /// Jitter every series in place.
    ///
    /// Plain series are jittered entry by entry. The storage split only
    /// redraws `ssd`; `hdd` is derived from the old total and floors at zero.
    /// Scatter `x` is left alone.
    pub fn randomize<R: Rng + ?Sized>(&self, store: &mut LaptopDataset, rng: &mut R) {
        for series in [
            &mut store.brands,
            &mut store.ram,
            &mut store.cpu,
            &mut store.resolution,
        ] {
            jitter_all(&mut series.values, self.pct, rng);
        }

        let total = store.storage.total();
        let ssd = jitter(store.storage.ssd, self.pct, rng);
        store.storage = SplitPair::resplit(total, ssd);

        jitter_all(&mut store.scatter.y, self.pct, rng);
    }
}

/// Return a randomized copy of `store` using the default percentage.
pub fn randomize<R: Rng + ?Sized>(store: &LaptopDataset, rng: &mut R) -> LaptopDataset {
    let mut next = store.clone();
    Randomizer::default().randomize(&mut next, rng);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_draws_leave_value_unchanged() {
        // Every f64 draw is 0.0: sign is negative, magnitude is zero.
        let mut rng = StepRng::new(0, 0);
        assert_eq!(jitter(2700.0, 0.06, &mut rng), 2700.0);
    }

    #[test]
    fn max_draws_push_to_upper_edge() {
        // Draws just below 1.0: positive sign, full delta.
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(jitter(2700.0, 0.06, &mut rng), 2862.0);
        assert_eq!(jitter(0.0, 0.06, &mut rng), 0.0);
    }

    #[test]
    fn jitter_is_non_negative_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for &value in &[0.0, 1.0, 3.0, 17.0, 180.0, 1960.0, 2700.0] {
            for &pct in &[0.01, 0.06, 0.5, 0.99] {
                for _ in 0..200 {
                    let j = jitter(value, pct, &mut rng);
                    assert!(j >= 0.0);
                    assert!(j >= (value * (1.0 - pct)).floor() - 1.0);
                    assert!(j <= (value * (1.0 + pct)).ceil() + 1.0);
                    assert_eq!(j, j.round());
                }
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let ds = LaptopDataset::builtin();
        let a = randomize(&ds, &mut StdRng::seed_from_u64(42));
        let b = randomize(&ds, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn randomize_preserves_shape_and_scatter_x() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ds = LaptopDataset::builtin();
        let shape = ds.shape();
        let xs = ds.scatter.x.clone();
        let labels = ds.brands.labels.clone();
        for _ in 0..50 {
            Randomizer::default().randomize(&mut ds, &mut rng);
            assert_eq!(ds.shape(), shape);
            assert_eq!(ds.scatter.x, xs);
            assert_eq!(ds.brands.labels, labels);
            assert!(ds.validate().is_ok());
        }
    }

    #[test]
    fn one_refresh_keeps_builtin_storage_total() {
        // A 6% draw on 2700 stays well below 3976, so no overshoot is possible.
        for seed in 0..20 {
            let ds = randomize(&LaptopDataset::builtin(), &mut StdRng::seed_from_u64(seed));
            assert_eq!(ds.storage.total(), 3976.0);
        }
    }

    #[test]
    fn storage_split_tracks_previous_total_every_round() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut ds = LaptopDataset::builtin();
        for _ in 0..200 {
            let total = ds.storage.total();
            Randomizer::default().randomize(&mut ds, &mut rng);
            let SplitPair { ssd, hdd } = ds.storage;
            if ssd <= total {
                assert_eq!(ssd + hdd, total);
            } else {
                assert_eq!(hdd, 0.0);
            }
        }
    }

    #[test]
    fn storage_overshoot_floors_second_component() {
        // Upper-edge draws on a split where the first part exceeds the total
        // once jittered: 96 * 1.5 rounds to 144 > 100.
        let mut rng = StepRng::new(u64::MAX, 0);
        let mut ds = LaptopDataset::builtin();
        ds.storage = SplitPair { ssd: 96.0, hdd: 4.0 };
        Randomizer::new(0.5).randomize(&mut ds, &mut rng);
        assert_eq!(ds.storage.ssd, 144.0);
        assert_eq!(ds.storage.hdd, 0.0);
    }

    #[test]
    fn randomize_is_not_a_fixed_point() {
        let mut rng = StdRng::seed_from_u64(5);
        let ds = LaptopDataset::builtin();
        let once = randomize(&ds, &mut rng);
        let twice = randomize(&once, &mut rng);
        assert_ne!(ds, once);
        assert_ne!(once, twice);
    }
}
