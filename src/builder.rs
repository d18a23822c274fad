use crate::engine::{Aligner, DEFAULT_GAP_PENALTY};
use crate::error::ConfigError;
use crate::grid::BestCellPolicy;
use crate::traits::{Score, SymbolScorer};

/// Validating builder for [`Aligner`].
///
/// `threads` sizes a dedicated worker pool for the wavefront aligner. Without
/// the `parallel` feature the value is still validated but has no effect.
pub struct AlignerBuilder<S: SymbolScorer> {
    scorer: S,
    gap: Score,
    policy: BestCellPolicy,
    threads: Option<usize>,
}

impl<S: SymbolScorer> AlignerBuilder<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            gap: DEFAULT_GAP_PENALTY,
            policy: BestCellPolicy::default(),
            threads: None,
        }
    }
    pub fn gap_penalty(mut self, gap: Score) -> Self {
        self.gap = gap;
        self
    }
    pub fn best_cell_policy(mut self, policy: BestCellPolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
    pub fn build(self) -> Result<Aligner<S>, ConfigError> {
        if self.gap < 0 {
            return Err(ConfigError::NegativeGap(self.gap));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }

        #[cfg(feature = "parallel")]
        let pool = match self.threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("motif-align-{i}"))
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        #[cfg(feature = "parallel")]
        let aligner = Aligner::from_parts(self.scorer, self.gap, self.policy, pool);
        #[cfg(not(feature = "parallel"))]
        let aligner = Aligner::from_parts(self.scorer, self.gap, self.policy);
        Ok(aligner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::MatchScorer;

    #[test]
    fn rejects_negative_gap() {
        let err = AlignerBuilder::new(MatchScorer::default())
            .gap_penalty(-1)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::NegativeGap(-1)));
    }

    #[test]
    fn rejects_zero_threads() {
        let err = AlignerBuilder::new(MatchScorer::default())
            .threads(0)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ConfigError::ZeroThreads));
    }

    #[test]
    fn carries_settings() {
        let a = AlignerBuilder::new(MatchScorer::new(2, 2))
            .gap_penalty(0)
            .best_cell_policy(BestCellPolicy::FirstCome)
            .threads(2)
            .build()
            .unwrap();
        assert_eq!(a.gap_penalty(), 0);
        assert_eq!(a.best_cell_policy(), BestCellPolicy::FirstCome);
        assert_eq!(a.local_wavefront(&[1, 2], &[1, 2]).score, 4);
    }
}
