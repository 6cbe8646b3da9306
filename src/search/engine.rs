//! Breadth-first search from a tuple to its reverse

use super::candidate::{Candidate, MoveError};
use super::filter::{RejectionCounts, ValidityFilter};
use crate::puzzle::State;
use crate::report::Solution;
use serde::Serialize;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Expansions between progress log lines
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("puzzle must contain at least one value")]
    EmptyPuzzle,

    #[error("puzzle values must be positive, found 0 at position {index}")]
    NonPositiveValue { index: usize },

    #[error("move generation failed: {0}")]
    Move(#[from] MoveError),
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStatistics {
    /// Candidates taken off the queue and expanded
    pub expanded: usize,
    /// Successors built by split or join
    pub generated: usize,
    /// Successors that passed the validity filter
    pub enqueued: usize,
    pub rejections: RejectionCounts,
    /// Distinct states recorded by the cache
    pub states_cached: usize,
    pub peak_queue_len: usize,
    /// Deepest candidate expanded, in moves from the start
    pub max_depth: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Result of one search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub start: State,
    pub goal: State,
    /// The first path found, or `None` when the queue ran dry
    pub solution: Option<Solution>,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Searches split/join moves from a start tuple to its reverse.
///
/// Every call to [`SearchEngine::run`] starts from an empty cache and queue.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    start: State,
    goal: State,
    vmax: u32,
    progress_interval: usize,
}

impl SearchEngine {
    /// Prepare a search, rejecting empty puzzles and zero values
    pub fn new(start: State) -> Result<Self, SearchError> {
        if let Some(index) = start.values().iter().position(|&v| v == 0) {
            return Err(SearchError::NonPositiveValue { index });
        }
        let vmax = start.max().ok_or(SearchError::EmptyPuzzle)?;
        let goal = start.reversed();

        Ok(Self {
            start,
            goal,
            vmax,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    /// Log progress every `interval` expansions (0 disables progress lines)
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn goal(&self) -> &State {
        &self.goal
    }

    pub fn vmax(&self) -> u32 {
        self.vmax
    }

    /// Run the search to completion
    pub fn run(&self) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();
        let mut filter = ValidityFilter::new(self.vmax);
        let mut queue: VecDeque<Rc<Candidate>> = VecDeque::new();
        let mut statistics = SearchStatistics::default();

        tracing::debug!(start = %self.start, goal = %self.goal, vmax = self.vmax, "starting search");

        queue.push_back(Rc::new(Candidate::root(self.start.clone())));
        statistics.peak_queue_len = queue.len();

        while let Some(current) = queue.pop_front() {
            if current.state() == &self.goal {
                tracing::debug!(depth = current.depth(), "goal reached");
                let solution = Solution::from_candidate(&current, self.vmax);
                return Ok(self.finish(Some(solution), statistics, &filter, started));
            }

            statistics.expanded += 1;
            statistics.max_depth = statistics.max_depth.max(current.depth());

            for successor in Self::successors(&current) {
                let successor = successor?;
                statistics.generated += 1;
                if filter.is_valid(successor.state()) {
                    queue.push_back(Rc::new(successor));
                    statistics.enqueued += 1;
                }
            }
            statistics.peak_queue_len = statistics.peak_queue_len.max(queue.len());

            if self.progress_interval > 0 && statistics.expanded % self.progress_interval == 0 {
                tracing::debug!(
                    expanded = statistics.expanded,
                    queued = queue.len(),
                    cached = filter.cache().len(),
                    depth = current.depth(),
                    "search progress"
                );
            }
        }

        tracing::debug!(expanded = statistics.expanded, "queue exhausted");
        Ok(self.finish(None, statistics, &filter, started))
    }

    /// Successors of `current` in expansion order: for each position left to
    /// right, the join with its right neighbour, then every split in
    /// increasing order. Built lazily, one candidate at a time.
    ///
    /// A join whose sum overflows `u32` is skipped, as it lies above any bound.
    fn successors(
        current: &Rc<Candidate>,
    ) -> impl Iterator<Item = Result<Candidate, MoveError>> + '_ {
        let len = current.state().len();
        current
            .state()
            .values()
            .iter()
            .enumerate()
            .flat_map(move |(index, &value)| {
                let join = (index + 1 < len).then(|| current.join(index));
                let splits = (1..value).map(move |keep| current.split(index, keep));
                join.into_iter().chain(splits)
            })
            .filter(|successor| !matches!(successor, Err(MoveError::SumOverflow { .. })))
    }

    fn finish(
        &self,
        solution: Option<Solution>,
        mut statistics: SearchStatistics,
        filter: &ValidityFilter,
        started: Instant,
    ) -> SearchOutcome {
        statistics.rejections = filter.rejections();
        statistics.states_cached = filter.cache().len();
        statistics.elapsed = started.elapsed();

        SearchOutcome {
            start: self.start.clone(),
            goal: self.goal.clone(),
            solution,
            statistics,
        }
    }
}
