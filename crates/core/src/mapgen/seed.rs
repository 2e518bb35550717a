//! Deterministic seed mixing and pseudo-random stream helpers for map generation.

pub(super) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub(super) fn derive_floor_seed(run_seed: u64, depth: usize) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (depth as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Sequential draws from one floor seed. Each generation phase owns its own
/// stream so adding draws to one phase never shifts the others.
#[derive(Clone, Debug)]
pub(super) struct SeedStream {
    seed: u64,
    counter: u64,
}

impl SeedStream {
    pub(super) fn new(floor_seed: u64, phase: u64) -> Self {
        Self { seed: mix_seed_stream(floor_seed, phase.wrapping_mul(0x1000_0000_0000)), counter: 0 }
    }

    fn next_u64(&mut self) -> u64 {
        self.counter += 1;
        mix_seed_stream(self.seed, self.counter)
    }

    /// Uniform draw in `min..=max`.
    pub(super) fn range_inclusive(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        let span = (max - min + 1) as u64;
        min + (self.next_u64() % span) as usize
    }

    /// Uniform draw in `min..max`; returns `min` for an empty range.
    pub(super) fn range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.range_inclusive(min, max - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_draws_stay_inside_requested_bounds() {
        let mut stream = SeedStream::new(12_345, 1);
        for _ in 0..200 {
            let value = stream.range_inclusive(7, 13);
            assert!((7..=13).contains(&value));
            let value = stream.range(3, 4);
            assert_eq!(value, 3);
        }
    }

    #[test]
    fn floor_seed_changes_when_inputs_change() {
        let baseline = derive_floor_seed(99, 2);
        assert_ne!(baseline, derive_floor_seed(98, 2));
        assert_ne!(baseline, derive_floor_seed(99, 3));
        assert_eq!(baseline, derive_floor_seed(99, 2));
    }

    #[test]
    fn phases_produce_independent_sequences() {
        let mut nodes = SeedStream::new(7, 1);
        let mut rooms = SeedStream::new(7, 2);
        let a: Vec<usize> = (0..8).map(|_| nodes.range_inclusive(0, 1_000)).collect();
        let b: Vec<usize> = (0..8).map(|_| rooms.range_inclusive(0, 1_000)).collect();
        assert_ne!(a, b);
    }
}
