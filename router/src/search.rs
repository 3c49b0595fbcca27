//! Iterated restart driver.
//!
//! Runs the synthesis heuristic over a schedule of stages with growing
//! attempt budgets and randomization windows, keeping the smallest result
//! seen anywhere in the run. Stops as soon as a result reaches the target.

use crate::algo::synthesis::synthesize;
use pinboard_common::db::paths::PathSet;
use pinboard_common::error::BoardError;
use pinboard_common::geom::point::Point;
use pinboard_common::util::config::{SearchConfig, StageConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: usize,
    pub window: usize,
    pub attempts: u64,
    /// Best segment count over the whole run after this stage.
    pub best: usize,
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub paths: PathSet,
    /// Attempts consumed over all stages.
    pub iterations: u64,
    pub reached_target: bool,
    pub base_seed: u64,
    pub stages: Vec<StageSummary>,
}

impl SearchOutcome {
    pub fn segments(&self) -> usize {
        self.paths.unique_len()
    }
}

struct Attempt {
    paths: PathSet,
    score: usize,
}

pub struct Search<'a> {
    pins: Vec<Point>,
    target: usize,
    config: &'a SearchConfig,
    base_seed: u64,
}

impl<'a> Search<'a> {
    /// Fails fast on an empty or repeated pin list or an empty schedule.
    pub fn new(pins: &[Point], target: usize, config: &'a SearchConfig) -> Result<Self, BoardError> {
        if pins.is_empty() {
            return Err(BoardError::EmptyPinSet);
        }
        let mut seen = HashSet::with_capacity(pins.len());
        if let Some(&dup) = pins.iter().find(|p| !seen.insert(**p)) {
            return Err(BoardError::DuplicatePin(dup));
        }
        if config.stages.is_empty() {
            return Err(BoardError::InvalidInput("search schedule has no stages".to_string()));
        }
        if let Some(stage) = config.stages.iter().position(|s| s.max_attempts == 0) {
            return Err(BoardError::InvalidInput(format!(
                "search stage {stage} has an attempt budget of 0"
            )));
        }

        let base_seed = config.seed.unwrap_or_else(|| thread_rng().r#gen());
        Ok(Self {
            pins: pins.to_vec(),
            target,
            config,
            base_seed,
        })
    }

    /// Attempt `index` of the run always sees the same generator, whichever
    /// thread runs it.
    fn attempt(&self, index: u64, window: usize) -> Attempt {
        let seed = self
            .base_seed
            .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut rng = StdRng::seed_from_u64(seed);
        let paths = synthesize(&self.pins, window, &mut rng);
        let score = paths.unique_len();
        Attempt { paths, score }
    }

    fn run_batch(&self, first: u64, len: usize, window: usize) -> Vec<Attempt> {
        if self.config.parallel && len > 1 {
            (0..len)
                .into_par_iter()
                .map(|k| self.attempt(first + k as u64, window))
                .collect()
        } else {
            (0..len).map(|k| self.attempt(first + k as u64, window)).collect()
        }
    }

    pub fn run(&self) -> SearchOutcome {
        if self.pins.len() < 2 {
            return SearchOutcome {
                paths: PathSet::new(),
                iterations: 0,
                reached_target: true,
                base_seed: self.base_seed,
                stages: Vec::new(),
            };
        }

        let batch_size = if self.config.parallel {
            self.config.batch_size.max(1)
        } else {
            1
        };

        log::info!(
            "Searching {} pins for <= {} segments over {} stages (base seed {})",
            self.pins.len(),
            self.target,
            self.config.stages.len(),
            self.base_seed
        );

        let mut best: Option<Attempt> = None;
        let mut iterations = 0u64;
        let mut summaries = Vec::with_capacity(self.config.stages.len());

        for (stage_idx, &StageConfig { max_attempts, window }) in self.config.stages.iter().enumerate() {
            let start = Instant::now();
            let mut used = 0u64;
            let mut hit = false;

            while used < max_attempts && !hit {
                let len = (max_attempts - used).min(batch_size as u64) as usize;
                let batch = self.run_batch(iterations, len, window);

                // Fold in attempt order so the result matches a serial run.
                for attempt in batch {
                    used += 1;
                    iterations += 1;
                    let score = attempt.score;
                    if best.as_ref().is_none_or(|b| score < b.score) {
                        best = Some(attempt);
                    }
                    if score <= self.target {
                        hit = true;
                        break;
                    }
                }
            }

            let best_score = best.as_ref().map_or(usize::MAX, |b| b.score);
            log::info!(
                "Stage {} (budget {}, window {}): {} attempts, best {} / target {}, Time: {}ms",
                stage_idx,
                max_attempts,
                window,
                used,
                best_score,
                self.target,
                start.elapsed().as_millis()
            );
            summaries.push(StageSummary {
                stage: stage_idx,
                window,
                attempts: used,
                best: best_score,
            });

            if best_score <= self.target {
                break;
            }
        }

        let (paths, score) = best.map_or((PathSet::new(), usize::MAX), |b| (b.paths, b.score));
        let reached_target = score <= self.target;
        if !reached_target {
            log::warn!(
                "Search exhausted all {} stages: best {} exceeds target {}",
                self.config.stages.len(),
                score,
                self.target
            );
        }

        SearchOutcome {
            paths,
            iterations,
            reached_target,
            base_seed: self.base_seed,
            stages: summaries,
        }
    }
}

/// Searches for a path set of at most `target` segments connecting `pins`.
/// Running out of stages is not an error; the best result is returned.
pub fn search(pins: &[Point], target: usize, config: &SearchConfig) -> Result<SearchOutcome, BoardError> {
    Ok(Search::new(pins, target, config)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_common::db::cluster::cluster;

    fn p(x: u32, y: u32) -> Point {
        Point::new(x, y)
    }

    fn config(stages: &[(u64, usize)], parallel: bool) -> SearchConfig {
        SearchConfig {
            stages: stages.iter().map(|&(n, w)| StageConfig::new(n, w)).collect(),
            seed: Some(17),
            parallel,
            batch_size: 8,
        }
    }

    const MEDIUM: [(u32, u32); 7] = [(3, 5), (3, 10), (5, 5), (5, 7), (7, 2), (10, 2), (10, 8)];

    #[test]
    fn stops_at_first_stage_when_target_is_loose() {
        let pins = [p(0, 1), p(4, 4), p(8, 3), p(2, 5)];
        let cfg = config(&[(50, 0), (200, 1)], false);
        let outcome = search(&pins, 100, &cfg).unwrap();

        assert!(outcome.reached_target);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.stages.len(), 1);
    }

    #[test]
    fn best_is_non_increasing_across_stages() {
        let pins: Vec<Point> = MEDIUM.iter().map(|&(x, y)| p(x, y)).collect();
        // target 0 is unreachable, so every stage runs to its budget
        let cfg = config(&[(5, 0), (20, 1), (40, 3), (40, 5)], false);
        let outcome = search(&pins, 0, &cfg).unwrap();

        assert!(!outcome.reached_target);
        assert_eq!(outcome.stages.len(), 4);
        assert_eq!(outcome.iterations, 105);
        assert!(outcome.stages.windows(2).all(|w| w[1].best <= w[0].best));
        assert_eq!(outcome.segments(), outcome.stages[3].best);
        assert!(cluster(outcome.paths.as_slice(), &pins).unwrap().is_connected());
    }

    #[test]
    fn parallel_and_serial_agree_under_a_seed() {
        let pins: Vec<Point> = MEDIUM.iter().map(|&(x, y)| p(x, y)).collect();
        let stages = [(10, 0), (30, 2), (60, 4)];
        let serial = search(&pins, 22, &config(&stages, false)).unwrap();
        let parallel = search(&pins, 22, &config(&stages, true)).unwrap();

        assert_eq!(serial.iterations, parallel.iterations);
        assert_eq!(serial.paths, parallel.paths);
        assert_eq!(serial.stages, parallel.stages);
    }

    #[test]
    fn single_pin_is_trivial() {
        let cfg = config(&[(10, 0)], false);
        let outcome = search(&[p(4, 4)], 0, &cfg).unwrap();
        assert!(outcome.paths.is_empty());
        assert!(outcome.reached_target);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn invalid_input_fails_before_any_stage() {
        let cfg = config(&[(10, 0)], false);
        assert_eq!(search(&[], 5, &cfg).unwrap_err(), BoardError::EmptyPinSet);
        assert_eq!(
            search(&[p(1, 1), p(2, 2), p(1, 1)], 5, &cfg).unwrap_err(),
            BoardError::DuplicatePin(p(1, 1))
        );
        let empty = config(&[], false);
        assert!(matches!(
            search(&[p(1, 1), p(2, 2)], 5, &empty),
            Err(BoardError::InvalidInput(_))
        ));

        let zero_budget = config(&[(0, 0)], false);
        assert!(matches!(
            search(&[p(0, 0), p(3, 3)], 5, &zero_budget),
            Err(BoardError::InvalidInput(_))
        ));
        let later_zero = config(&[(10, 0), (0, 1)], true);
        assert!(matches!(
            search(&[p(0, 0), p(3, 3)], 5, &later_zero),
            Err(BoardError::InvalidInput(msg)) if msg.contains("stage 1")
        ));
    }
}
