//! Configuration management for the split/join search

pub mod settings;

pub use settings::{
    Settings, PuzzleConfig, SearchConfig, OutputConfig, OutputFormat, CliOverrides
};
