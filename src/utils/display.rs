//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::report::Solution;
use crate::search::{BatchEntry, SearchOutcome, SearchStatistics};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Width of each column in a path line
const FIELD_WIDTH: usize = 18;

/// Format search results for display
pub struct ReportFormatter;

impl ReportFormatter {
    /// The textual report for one search: start, goal, then the path or a
    /// no-solution line
    pub fn format_report(outcome: &SearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("Start: {}\n", outcome.start));
        output.push_str(&format!("Goal:  {}\n", outcome.goal));

        match &outcome.solution {
            Some(solution) => {
                output.push_str("Solution found!\n");
                output.push_str(&Self::format_path(solution));
            }
            None => output.push_str("No solutions found :-(\n"),
        }

        output
    }

    /// One line per step, move label then tuple
    pub fn format_path(solution: &Solution) -> String {
        let mut output = String::new();
        for step in &solution.steps {
            output.push_str(&format!(
                "{:width$} ===> {:width$}\n",
                step.step,
                step.state,
                width = FIELD_WIDTH
            ));
        }
        output
    }

    /// Format search counters
    pub fn format_statistics(statistics: &SearchStatistics) -> String {
        let mut output = String::new();

        output.push_str("Search Statistics:\n");
        output.push_str(&format!("  Expanded: {}\n", statistics.expanded));
        output.push_str(&format!("  Generated: {}\n", statistics.generated));
        output.push_str(&format!("  Enqueued: {}\n", statistics.enqueued));
        output.push_str(&format!(
            "  Rejected: {} (seen {}, duplicate {}, above bound {})\n",
            statistics.rejections.total(),
            statistics.rejections.already_seen,
            statistics.rejections.duplicate_value,
            statistics.rejections.above_bound
        ));
        output.push_str(&format!("  States cached: {}\n", statistics.states_cached));
        output.push_str(&format!("  Peak queue length: {}\n", statistics.peak_queue_len));
        output.push_str(&format!("  Max depth: {}\n", statistics.max_depth));
        output.push_str(&format!("  Solve time: {:.3}s\n", statistics.elapsed.as_secs_f64()));

        output
    }

    /// Format batch results as a summary table
    pub fn format_batch_summary(entries: &[BatchEntry]) -> String {
        let mut output = String::new();

        output.push_str("Batch Summary:\n");
        output.push_str("Puzzle             | Solved | Moves | Cached   | Time(ms)\n");
        output.push_str("-------------------|--------|-------|----------|---------\n");

        for entry in entries {
            let moves = entry
                .moves
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string());
            let solved = match (&entry.error, entry.solved) {
                (Some(_), _) => "error",
                (None, true) => "yes",
                (None, false) => "no",
            };

            output.push_str(&format!(
                "{:18} | {:6} | {:5} | {:8} | {}\n",
                entry.puzzle, solved, moves, entry.states_cached, entry.solve_time_ms
            ));
        }

        let solved = entries.iter().filter(|e| e.solved).count();
        output.push_str(&format!("\n{}/{} puzzles solved\n", solved, entries.len()));

        output
    }

    /// Save a solved outcome in the requested format, returning the file written
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", solution.metadata.id));
                let content = format!(
                    "Start: {}\nGoal:  {}\n{}",
                    solution.start,
                    solution.goal,
                    Self::format_path(solution)
                );
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", solution.metadata.id));
                solution.save_to_file(&path)?;
                path
            }
        };

        Ok(path)
    }

    /// Save batch results as a JSON summary
    pub fn save_batch_summary<P: AsRef<Path>>(entries: &[BatchEntry], output_dir: P) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = output_dir.join("batch_summary.json");
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}

/// ANSI colouring for console messages, disabled by `NO_COLOR` or a dumb terminal
pub struct ColorOutput;

impl ColorOutput {
    pub fn colored(text: &str, color: Color) -> String {
        if Self::enabled() {
            format!("\x1b[{}m{}\x1b[0m", color as u8, text)
        } else {
            text.to_string()
        }
    }

    fn enabled() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Puzzles a batch could not search
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

/// Foreground colours, discriminants are the ANSI codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
}
