//! Solving many independent puzzles at once

use super::engine::{SearchEngine, SearchOutcome};
use crate::puzzle::State;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

/// Summary of one puzzle in a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub puzzle: State,
    pub solved: bool,
    /// Moves in the solution, when one was found
    pub moves: Option<usize>,
    pub expanded: usize,
    pub states_cached: usize,
    pub solve_time_ms: u64,
    /// Set when the puzzle could not be searched at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            puzzle: outcome.start.clone(),
            solved: outcome.is_solved(),
            moves: outcome.solution.as_ref().map(|s| s.moves()),
            expanded: outcome.statistics.expanded,
            states_cached: outcome.statistics.states_cached,
            solve_time_ms: outcome.statistics.elapsed.as_millis() as u64,
            error: None,
        }
    }

    fn failed(puzzle: &State, error: impl std::fmt::Display) -> Self {
        Self {
            puzzle: puzzle.clone(),
            solved: false,
            moves: None,
            expanded: 0,
            states_cached: 0,
            solve_time_ms: 0,
            error: Some(error.to_string()),
        }
    }
}

/// Solve every puzzle on a rayon pool, keeping input order.
///
/// Each search still runs on one thread with its own cache and queue.
/// `threads == 0` uses one worker per core.
pub fn solve_batch(puzzles: &[State], threads: usize, progress_interval: usize) -> Result<Vec<BatchEntry>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build batch thread pool")?;

    let entries = pool.install(|| {
        puzzles
            .par_iter()
            .map(|puzzle| {
                let outcome = SearchEngine::new(puzzle.clone())
                    .and_then(|engine| engine.with_progress_interval(progress_interval).run());
                match outcome {
                    Ok(outcome) => BatchEntry::from_outcome(&outcome),
                    Err(error) => {
                        tracing::warn!(puzzle = %puzzle, %error, "skipping puzzle");
                        BatchEntry::failed(puzzle, error)
                    }
                }
            })
            .collect()
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_keeps_order() {
        let puzzles = vec![
            State::new(vec![7, 1]),
            State::new(vec![2, 1]),
            State::new(vec![1]),
            State::new(vec![3, 0]),
        ];
        let entries = solve_batch(&puzzles, 2, 0).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].puzzle, puzzles[0]);
        assert_eq!(entries[0].moves, Some(4));
        assert!(!entries[1].solved);
        assert_eq!(entries[2].moves, Some(0));
        assert!(entries[3].error.is_some());
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let puzzles = vec![State::new(vec![1, 6]), State::new(vec![7, 1])];
        let entries = solve_batch(&puzzles, 0, 0).unwrap();

        for (puzzle, entry) in puzzles.iter().zip(&entries) {
            let single = SearchEngine::new(puzzle.clone()).unwrap().run().unwrap();
            assert_eq!(entry.states_cached, single.statistics.states_cached);
            assert_eq!(entry.moves, single.solution.map(|s| s.moves()));
        }
    }
}
