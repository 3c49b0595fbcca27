pub mod algo;
pub mod search;

use pinboard_common::db::case::Case;
use pinboard_common::db::paths::PathSet;
use pinboard_common::error::BoardError;
use pinboard_common::geom::bounds::BoardBounds;
use pinboard_common::util::check;
use pinboard_common::util::config::SearchConfig;
use pinboard_common::util::profiler::ScopedTimer;
use std::time::Duration;

pub use search::{SearchOutcome, search};

#[derive(Clone, Debug)]
pub struct CaseReport {
    pub is_success: bool,
    pub paths_used: usize,
    pub reached_target: bool,
    pub iterations: u64,
    /// Seed that reproduces this run when set as `search.seed`.
    pub base_seed: u64,
    pub elapsed: Duration,
    pub paths: PathSet,
}

/// Searches one case and re-scores the result independently of the search.
pub fn solve_case(case: &Case, config: &SearchConfig) -> Result<CaseReport, BoardError> {
    let bounds = BoardBounds::new(case.size);
    check::validate_pins(&case.pins, bounds)?;

    let timer = ScopedTimer::new("solve_case");
    let outcome = search(&case.pins, case.target, config)?;
    let elapsed = timer.elapsed();

    check::validate_paths(outcome.paths.as_slice(), bounds)?;
    let score = check::score(outcome.paths.as_slice(), &case.pins)?;

    if score.is_success {
        log::info!(
            "\x1b[32mPASS\x1b[0m: '{}' connected with {}/{} path elements ({} attempts, seed {})",
            case.name,
            score.paths_used,
            case.target,
            outcome.iterations,
            outcome.base_seed
        );
    } else {
        log::error!(
            "\x1b[31mFAIL\x1b[0m: '{}' left {} pin clusters (seed {})",
            case.name,
            score.pin_clusters,
            outcome.base_seed
        );
    }

    Ok(CaseReport {
        is_success: score.is_success,
        paths_used: score.paths_used,
        reached_target: outcome.reached_target,
        iterations: outcome.iterations,
        base_seed: outcome.base_seed,
        elapsed,
        paths: outcome.paths,
    })
}
