//! Random source capability used for particle construction
//!
//! The simulation owns a seeded `Pcg32`; tests can substitute a scripted
//! source to pin every spawned attribute.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Uniform random floats in a closed range
pub trait RandomSource {
    /// Uniform sample in `[lo, hi]`
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Create the simulation RNG for a run seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
