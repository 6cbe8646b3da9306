//! Set of states seen during a single search

use crate::puzzle::State;
use std::collections::HashSet;

/// Records every state the validity filter has presented.
///
/// Lives for exactly one search. There is no removal and no capacity bound.
#[derive(Debug, Default)]
pub struct StateCache {
    seen: HashSet<State>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records the state the first time it is presented,
    /// false on every later presentation of an equal state.
    pub fn accept(&mut self, state: &State) -> bool {
        if self.seen.contains(state) {
            return false;
        }
        self.seen.insert(state.clone())
    }

    pub fn contains(&self, state: &State) -> bool {
        self.seen.contains(state)
    }

    /// Number of distinct states recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_once() {
        let mut cache = StateCache::new();
        let state = State::new(vec![3, 5, 7]);

        assert!(cache.accept(&state));
        assert!(!cache.accept(&state));
        assert!(!cache.accept(&State::new(vec![3, 5, 7])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_order_matters() {
        let mut cache = StateCache::new();
        assert!(cache.accept(&State::new(vec![3, 5])));
        assert!(cache.accept(&State::new(vec![5, 3])));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fresh_cache_is_empty() {
        let cache = StateCache::new();
        assert!(cache.is_empty());
        assert!(!cache.contains(&State::new(vec![1])));
    }
}
