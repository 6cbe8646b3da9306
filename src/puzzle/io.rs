//! File I/O for puzzle tuples

use super::State;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a single puzzle from a text file.
/// Format: integers separated by commas and/or whitespace, optionally in parentheses.
/// Lines starting with '#' are ignored.
pub fn load_puzzle_from_file<P: AsRef<Path>>(path: P) -> Result<State> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    let body: Vec<&str> = puzzle_lines(&content).collect();
    if body.is_empty() {
        anyhow::bail!("Puzzle file {} contains no values", path.as_ref().display());
    }

    parse_puzzle_from_string(&body.join(" "))
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Load one puzzle per line, e.g. for batch solving
pub fn load_puzzles_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<State>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    let mut puzzles = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let puzzle = parse_puzzle_from_string(line)
            .with_context(|| format!("Line {} of {}", line_no + 1, path.as_ref().display()))?;
        puzzles.push(puzzle);
    }

    if puzzles.is_empty() {
        anyhow::bail!("No puzzles found in {}", path.as_ref().display());
    }

    Ok(puzzles)
}

/// Parse a puzzle such as `3,5,7`, `3 5 7` or `(3, 5, 7)`
pub fn parse_puzzle_from_string(content: &str) -> Result<State> {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut values = Vec::new();
    for token in inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        let value: u32 = token
            .parse()
            .with_context(|| format!("Invalid value '{}'. Only positive integers are allowed", token))?;
        if value == 0 {
            anyhow::bail!("Invalid value 0. Puzzle values must be positive");
        }
        values.push(value);
    }

    if values.is_empty() {
        anyhow::bail!("Puzzle must contain at least one value");
    }

    Ok(State::new(values))
}

/// Save a puzzle to a text file
pub fn save_puzzle_to_file<P: AsRef<Path>>(puzzle: &State, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, format!("{}\n", puzzle))
        .with_context(|| format!("Failed to write puzzle to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example puzzle files in a directory
pub fn create_example_puzzles<P: AsRef<Path>>(dir_path: P) -> Result<()> {
    let dir = dir_path.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    save_puzzle_to_file(&State::new(vec![3, 5, 7]), dir.join("classic.txt"))?;
    save_puzzle_to_file(&State::new(vec![7, 1]), dir.join("pair.txt"))?;
    save_puzzle_to_file(&State::new(vec![1]), dir.join("single.txt"))?;

    let batch = "\
# one puzzle per line
(3, 5, 7)
7, 1
1 6
2 1
1, 7, 2
";
    std::fs::write(dir.join("batch.txt"), batch)
        .with_context(|| format!("Failed to write batch file in {}", dir.display()))?;

    Ok(())
}

fn puzzle_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_formats() {
        let expected = State::new(vec![3, 5, 7]);
        assert_eq!(parse_puzzle_from_string("3,5,7").unwrap(), expected);
        assert_eq!(parse_puzzle_from_string("3 5 7").unwrap(), expected);
        assert_eq!(parse_puzzle_from_string("(3, 5, 7)").unwrap(), expected);
        assert_eq!(parse_puzzle_from_string("(1,)").unwrap(), State::new(vec![1]));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse_puzzle_from_string("3, x, 7").is_err());
        assert!(parse_puzzle_from_string("3, 0, 7").is_err());
        assert!(parse_puzzle_from_string("3, -1").is_err());
        assert!(parse_puzzle_from_string("()").is_err());
        assert!(parse_puzzle_from_string("").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/puzzle.txt");
        let puzzle = State::new(vec![4, 1, 9]);

        save_puzzle_to_file(&puzzle, &path).unwrap();
        assert_eq!(load_puzzle_from_file(&path).unwrap(), puzzle);
    }

    #[test]
    fn test_example_puzzles() {
        let temp_dir = tempdir().unwrap();
        create_example_puzzles(temp_dir.path()).unwrap();

        let classic = load_puzzle_from_file(temp_dir.path().join("classic.txt")).unwrap();
        assert_eq!(classic, State::new(vec![3, 5, 7]));

        let batch = load_puzzles_from_file(temp_dir.path().join("batch.txt")).unwrap();
        assert_eq!(batch.len(), 5);
        assert_eq!(batch[1], State::new(vec![7, 1]));
    }
}
