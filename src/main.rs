//! Main CLI application for the split/join reversal search

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use split_join_search::{
    config::{CliOverrides, OutputFormat, Settings},
    puzzle::{create_example_puzzles, load_puzzles_from_file, parse_puzzle_from_string},
    report::{PathValidator, Solution},
    search::{solve_batch, SearchEngine},
    utils::{ColorOutput, ReportFormatter},
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "split_join_search")]
#[command(about = "Split/join reversal search")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Without a subcommand the classic (3, 5, 7) puzzle is solved
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a path from a tuple to its reverse
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Start tuple, e.g. "3,5,7" (overrides config)
        #[arg(short, long, conflicts_with = "input")]
        puzzle: Option<String>,

        /// File holding the start tuple (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format for saved solutions (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save the solution to the output directory
        #[arg(long)]
        save: bool,

        /// Show search statistics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Re-check a saved JSON solution
    Validate {
        /// Solution file path
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Solve one puzzle per line of a file, in parallel
    Batch {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle list file
        #[arg(short, long)]
        input: PathBuf,

        /// Worker threads, 0 for one per core (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Write a JSON summary to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        None => default_command(),
        Some(Commands::Solve {
            config, puzzle, input, output, format, save, verbose
        }) => {
            solve_command(config, puzzle, input, output, format, save, verbose)
        }
        Some(Commands::Setup { directory, force }) => {
            setup_command(directory, force)
        }
        Some(Commands::Validate { solution }) => {
            validate_command(solution)
        }
        Some(Commands::Batch { config, input, threads, output }) => {
            batch_command(config, input, threads, output)
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "split_join_search=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn default_command() -> Result<()> {
    let settings = Settings::default();
    let outcome = SearchEngine::new(settings.start_state()?)?.run()?;
    print!("{}", ReportFormatter::format_report(&outcome));
    Ok(())
}

fn solve_command(
    config_path: PathBuf,
    puzzle: Option<String>,
    input_file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
    save: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let start = puzzle
        .as_deref()
        .map(parse_puzzle_from_string)
        .transpose()
        .context("Invalid --puzzle value")?;

    let cli_overrides = CliOverrides {
        start,
        input_file,
        output_dir,
        format,
        save,
        verbose,
    };
    settings.merge_with_cli(&cli_overrides);

    settings.validate()
        .context("Configuration validation failed")?;

    let engine = SearchEngine::new(settings.start_state()?)
        .context("Failed to set up search")?
        .with_progress_interval(settings.search.progress_interval);
    let outcome = engine.run()
        .context("Search failed")?;

    print!("{}", ReportFormatter::format_report(&outcome));

    if settings.output.show_statistics {
        println!("\n{}", ReportFormatter::format_statistics(&outcome.statistics));
    }

    if let (Some(solution), true) = (&outcome.solution, settings.output.save_solution) {
        let path = ReportFormatter::save_solution(
            solution,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let puzzle_dir = directory.join("puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &puzzle_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_puzzles(&puzzle_dir)
        .context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", puzzle_dir.display());

    let mut json_config = Settings::default();
    json_config.puzzle.input_file = Some(PathBuf::from("puzzles/pair.txt"));
    json_config.output.format = OutputFormat::Json;
    json_config.output.save_solution = true;
    json_config.to_file(&config_dir.join("json.yaml"))?;

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --puzzle \"3,5,7\" --verbose");
    println!("3. Run: cargo run -- batch --input {}", puzzle_dir.join("batch.txt").display());

    Ok(())
}

fn validate_command(solution_path: PathBuf) -> Result<()> {
    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    println!("Start: {}", solution.start);
    println!("Goal:  {}", solution.goal);
    print!("{}", ReportFormatter::format_path(&solution));

    let result = PathValidator::new().validate(&solution);
    println!("\n{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn batch_command(
    config_path: PathBuf,
    input: PathBuf,
    threads: Option<usize>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let puzzles = load_puzzles_from_file(&input)?;
    let threads = threads.unwrap_or(settings.search.batch_threads);

    println!("{}", ColorOutput::info(&format!("Solving {} puzzles...", puzzles.len())));
    let entries = solve_batch(&puzzles, threads, settings.search.progress_interval)?;
    println!("{}", ReportFormatter::format_batch_summary(&entries));
    for entry in &entries {
        if let Some(error) = &entry.error {
            println!("{}", ColorOutput::warning(&format!("Skipped {}: {}", entry.puzzle, error)));
        }
    }

    if let Some(dir) = output_dir {
        let path = ReportFormatter::save_batch_summary(&entries, &dir)
            .context("Failed to save batch summary")?;
        println!("{}", ColorOutput::success(&format!("Summary saved to {}", path.display())));
    }

    Ok(())
}
