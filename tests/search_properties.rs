//! End-to-end behaviour of the split/join search

use split_join_search::puzzle::State;
use split_join_search::report::PathValidator;
use split_join_search::search::{Candidate, Move, SearchEngine, ValidityFilter};
use split_join_search::{solve, solve_and_report};
use std::collections::VecDeque;
use std::rc::Rc;

fn path_states(values: &[u32]) -> Vec<Vec<u32>> {
    solve(values)
        .unwrap()
        .solution
        .expect("expected a solution")
        .steps
        .iter()
        .map(|s| s.state.values().to_vec())
        .collect()
}

#[test]
fn classic_puzzle_reaches_its_reverse() {
    let outcome = solve(&[3, 5, 7]).unwrap();
    assert_eq!(outcome.goal, State::new(vec![7, 5, 3]));

    let solution = outcome.solution.expect("(3, 5, 7) is solvable");
    assert_eq!(solution.final_state(), Some(&State::new(vec![7, 5, 3])));
    for step in &solution.steps {
        assert_eq!(step.state.sum(), 15, "mass changed at {}", step.state);
    }
    assert!(PathValidator::new().validate(&solution).is_valid);
}

#[test]
fn classic_puzzle_path_is_stable() {
    assert_eq!(
        path_states(&[3, 5, 7]),
        vec![
            vec![3, 5, 7],
            vec![2, 1, 5, 7],
            vec![2, 6, 7],
            vec![2, 5, 1, 7],
            vec![2, 5, 1, 4, 3],
            vec![7, 1, 4, 3],
            vec![7, 5, 3],
        ]
    );
}

#[test]
fn classic_puzzle_report() {
    let mut out = Vec::new();
    solve_and_report(&[3, 5, 7], &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().map(str::trim_end).collect();

    assert_eq!(
        lines,
        vec![
            "Start: (3, 5, 7)",
            "Goal:  (7, 5, 3)",
            "Solution found!",
            "begin              ===> (3, 5, 7)",
            "split 3   -> 2,1   ===> (2, 1, 5, 7)",
            "join  1,5 -> 6     ===> (2, 6, 7)",
            "split 6   -> 5,1   ===> (2, 5, 1, 7)",
            "split 7   -> 4,3   ===> (2, 5, 1, 4, 3)",
            "join  2,5 -> 7     ===> (7, 1, 4, 3)",
            "join  1,4 -> 5     ===> (7, 5, 3)",
        ]
    );
}

#[test]
fn single_value_succeeds_without_moves() {
    let mut out = Vec::new();
    let outcome = solve_and_report(&[1], &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert_eq!(outcome.solution.unwrap().moves(), 0);
    assert_eq!(report.lines().count(), 4);
    assert!(report.contains("Solution found!"));
    assert!(report.contains("begin              ===> (1,)"));
}

#[test]
fn unreachable_goals_are_reported_not_failed() {
    for puzzle in [&[2, 1][..], &[1, 2], &[3, 1, 2], &[1, 2, 3]] {
        let mut out = Vec::new();
        let outcome = solve_and_report(puzzle, &mut out).unwrap();
        assert!(!outcome.is_solved(), "{:?}", puzzle);
        assert!(String::from_utf8(out).unwrap().ends_with("No solutions found :-(\n"));
    }
}

#[test]
fn searches_are_deterministic() {
    for puzzle in [&[3, 5, 7][..], &[1, 6], &[2, 1]] {
        let first = solve(puzzle).unwrap();
        let second = solve(puzzle).unwrap();
        assert_eq!(first.solution, second.solution);
        assert_eq!(first.statistics.states_cached, second.statistics.states_cached);
        assert_eq!(first.statistics.expanded, second.statistics.expanded);
    }
}

#[test]
fn each_search_gets_a_fresh_cache() {
    let engine = SearchEngine::new(State::new(vec![7, 1])).unwrap();
    let first = engine.run().unwrap();
    let second = engine.run().unwrap();
    assert!(second.is_solved());
    assert_eq!(first.statistics.states_cached, second.statistics.states_cached);
}

#[test]
fn small_tuples_always_terminate() {
    for a in 1..=5u32 {
        for b in 1..=5u32 {
            if a == b {
                continue;
            }
            let outcome = solve(&[a, b]).unwrap();
            if let Some(solution) = outcome.solution {
                assert!(PathValidator::new().validate(&solution).is_valid);
            }
        }
    }
}

#[test]
fn duplicated_states_are_never_enqueued() {
    // (4, 4, 7) is reachable from (4, 1, 3, 7) by a join but holds a repeated value
    let parent = Rc::new(Candidate::root(State::new(vec![4, 1, 3, 7])));
    let child = parent.join(1).unwrap();
    assert_eq!(child.state(), &State::new(vec![4, 4, 7]));

    let mut filter = ValidityFilter::new(7);
    assert!(!filter.is_valid(child.state()));
    assert!(!filter.is_valid(child.state()));
}

/// Replays the search loop by hand and checks every generated candidate
#[test]
fn every_generated_candidate_conserves_mass() {
    let start = State::new(vec![3, 5, 7]);
    let mass = start.sum();
    let mut filter = ValidityFilter::new(7);
    let mut queue = VecDeque::from([Rc::new(Candidate::root(start))]);
    let mut expanded = 0;

    while let Some(current) = queue.pop_front() {
        expanded += 1;
        if expanded > 200 {
            break;
        }
        let len = current.state().len();
        for index in 0..len {
            let mut successors = Vec::new();
            if index + 1 < len {
                let joined = current.join(index).unwrap();
                assert_eq!(joined.state().len(), len - 1);
                successors.push(joined);
            }
            for keep in 1..current.state().get(index).unwrap() {
                let split = current.split(index, keep).unwrap();
                assert_eq!(split.state().len(), len + 1);
                successors.push(split);
            }
            for successor in successors {
                assert_eq!(successor.state().sum(), mass);
                assert_ne!(successor.step(), Move::Begin);
                if filter.is_valid(successor.state()) {
                    assert!(!successor.state().has_duplicates());
                    assert!(!successor.state().exceeds(7));
                    queue.push_back(Rc::new(successor));
                }
            }
        }
    }
}

#[test]
fn bad_puzzles_are_rejected_up_front() {
    assert!(solve(&[]).is_err());
    assert!(solve(&[3, 0, 1]).is_err());
    let mut out = Vec::new();
    assert!(solve_and_report(&[], &mut out).is_err());
    assert!(out.is_empty());
}
