//! Validity rules applied to every generated candidate

use super::cache::StateCache;
use crate::puzzle::State;
use serde::Serialize;
use thiserror::Error;

/// Why a candidate was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("state was already seen")]
    AlreadySeen,
    #[error("state holds a repeated value")]
    DuplicateValue,
    #[error("state holds a value above the starting maximum")]
    AboveBound,
}

/// Per-rule rejection counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub already_seen: usize,
    pub duplicate_value: usize,
    pub above_bound: usize,
}

impl RejectionCounts {
    pub fn total(&self) -> usize {
        self.already_seen + self.duplicate_value + self.above_bound
    }

    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::AlreadySeen => self.already_seen += 1,
            Rejection::DuplicateValue => self.duplicate_value += 1,
            Rejection::AboveBound => self.above_bound += 1,
        }
    }
}

/// Applies the cache, duplicate and bound rules, in that order.
///
/// The cache rule runs first and records the state even when a later rule
/// rejects it, so an invalid state is never examined twice.
#[derive(Debug)]
pub struct ValidityFilter {
    vmax: u32,
    cache: StateCache,
    rejections: RejectionCounts,
}

impl ValidityFilter {
    /// Create a filter with a fresh cache, bounding values by `vmax`
    pub fn new(vmax: u32) -> Self {
        Self {
            vmax,
            cache: StateCache::new(),
            rejections: RejectionCounts::default(),
        }
    }

    pub fn vmax(&self) -> u32 {
        self.vmax
    }

    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    pub fn rejections(&self) -> RejectionCounts {
        self.rejections
    }

    /// Run the rules against `state`, naming the first one that fails
    pub fn check(&mut self, state: &State) -> Result<(), Rejection> {
        let verdict = self.evaluate(state);
        if let Err(rejection) = verdict {
            self.rejections.record(rejection);
        }
        verdict
    }

    pub fn is_valid(&mut self, state: &State) -> bool {
        self.check(state).is_ok()
    }

    fn evaluate(&mut self, state: &State) -> Result<(), Rejection> {
        if !self.cache.accept(state) {
            return Err(Rejection::AlreadySeen);
        }
        if state.has_duplicates() {
            return Err(Rejection::DuplicateValue);
        }
        if state.exceeds(self.vmax) {
            return Err(Rejection::AboveBound);
        }
        Ok(())
    }
}
