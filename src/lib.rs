//! Split/join reversal search
//!
//! Finds a sequence of split and join moves that turns a tuple of distinct
//! positive integers into its reverse, using a breadth-first search that never
//! revisits a state, never repeats a value within a tuple and never grows a
//! value past the starting maximum.

pub mod config;
pub mod puzzle;
pub mod search;
pub mod report;
pub mod utils;

pub use config::Settings;
pub use puzzle::State;
pub use report::Solution;
pub use search::{SearchEngine, SearchError, SearchOutcome};

use anyhow::{Context, Result};
use std::io::Write;

/// Search for a path from `puzzle` to its reverse
pub fn solve(puzzle: &[u32]) -> Result<SearchOutcome, SearchError> {
    SearchEngine::new(State::from(puzzle))?.run()
}

/// Search and write the textual report to `out`
pub fn solve_and_report<W: Write>(puzzle: &[u32], out: &mut W) -> Result<SearchOutcome> {
    let outcome = solve(puzzle).context("Search could not start")?;
    out.write_all(utils::ReportFormatter::format_report(&outcome).as_bytes())
        .context("Failed to write report")?;
    Ok(outcome)
}
