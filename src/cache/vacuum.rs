//! Automatic Vacuum
//!
//! Probabilistic storage compaction after removals.

use rand::Rng;
use tracing::{debug, warn};

use crate::cache::stats::StatsRecorder;
use crate::storage::DocumentStore;

// == Vacuum ==
/// Runs compaction once every `factor` removals on average.
///
/// - `0` never compacts
/// - `1` compacts after every removal
/// - `n > 1` compacts with probability `1/n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vacuum {
    factor: u32,
}

impl Vacuum {
    pub fn new(factor: u32) -> Self {
        Self { factor }
    }

    /// Draws whether compaction runs now.
    pub fn should_run<R: Rng>(&self, rng: &mut R) -> bool {
        self.factor > 0 && rng.gen_range(1..=self.factor) == 1
    }

    // == After Removal ==
    /// Maybe compacts the store. Compaction errors are logged, never returned.
    pub async fn after_removal(&self, store: &dyn DocumentStore, stats: &StatsRecorder) {
        // ThreadRng is not Send; draw before awaiting
        let run = self.should_run(&mut rand::thread_rng());
        if !run {
            return;
        }

        stats.record_compaction();
        match store.compact().await {
            Ok(()) => debug!("Automatic vacuum completed"),
            Err(e) => {
                stats.record_compaction_failure();
                warn!("Automatic vacuum failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_factor_zero_never_runs() {
        let vacuum = Vacuum::new(0);
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| !vacuum.should_run(&mut rng)));
    }

    #[test]
    fn test_factor_one_always_runs() {
        let vacuum = Vacuum::new(1);
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| vacuum.should_run(&mut rng)));
    }

    #[test]
    fn test_factor_n_runs_sometimes() {
        let vacuum = Vacuum::new(4);
        let mut rng = StdRng::seed_from_u64(42);
        let runs = (0..4000).filter(|_| vacuum.should_run(&mut rng)).count();

        // Expected ~1000
        assert!(runs > 800 && runs < 1200, "unexpected run count {}", runs);
    }
}
