//! Configuration settings for the split/join search

use crate::puzzle::{load_puzzle_from_file, State};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Start tuple used when no puzzle file is given
    pub start: Vec<u32>,
    /// Optional file holding the start tuple; takes precedence over `start`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Expansions between progress log lines, 0 to disable
    pub progress_interval: usize,
    /// Worker threads for batch solving, 0 for one per core
    pub batch_threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solution: bool,
    pub output_directory: PathBuf,
    pub show_statistics: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig {
                start: vec![3, 5, 7],
                input_file: None,
            },
            search: SearchConfig {
                progress_interval: crate::search::engine::DEFAULT_PROGRESS_INTERVAL,
                batch_threads: 0,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solution: false,
                output_directory: PathBuf::from("output/solutions"),
                show_statistics: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        match &self.puzzle.input_file {
            Some(file) => {
                if !file.exists() {
                    anyhow::bail!("Puzzle file does not exist: {}", file.display());
                }
            }
            None => {
                if self.puzzle.start.is_empty() {
                    anyhow::bail!("Start tuple must contain at least one value");
                }
                if self.puzzle.start.contains(&0) {
                    anyhow::bail!("Start tuple values must be positive");
                }
            }
        }

        Ok(())
    }

    /// The start tuple, read from the puzzle file when one is configured
    pub fn start_state(&self) -> Result<State> {
        match &self.puzzle.input_file {
            Some(file) => load_puzzle_from_file(file),
            None => Ok(State::new(self.puzzle.start.clone())),
        }
    }

    /// Merge settings with command line overrides.
    ///
    /// An explicit start tuple takes precedence over an input file, whether
    /// the file comes from the config or the command line.
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref input_file) = cli_overrides.input_file {
            self.puzzle.input_file = Some(input_file.clone());
        }
        if let Some(ref start) = cli_overrides.start {
            self.puzzle.start = start.values().to_vec();
            self.puzzle.input_file = None;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if cli_overrides.save {
            self.output.save_solution = true;
        }
        if cli_overrides.verbose {
            self.output.show_statistics = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub start: Option<State>,
    pub input_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub save: bool,
    pub verbose: bool,
}
