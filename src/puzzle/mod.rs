//! Puzzle tuples and their file formats

pub mod state;
pub mod io;

pub use state::State;
pub use io::{
    create_example_puzzles, load_puzzle_from_file, load_puzzles_from_file,
    parse_puzzle_from_string, save_puzzle_to_file,
};
