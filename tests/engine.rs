use bananagrams_engine::{
    convert_array_to_word, count_letters, Board, Dictionary, Direction, Engine, Error, Letters,
    SolveConfig, Solution, BOARD_SIZE, EMPTY_VALUE,
};

const WORDS: &[&str] = &["CAT", "RAT", "CAR", "AT", "CATS", "RATS", "BAN"];

fn engine() -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    let dictionary = Dictionary::from_words(WORDS).unwrap();
    Engine::with_dictionaries(dictionary.clone(), dictionary)
}

/// Counts the letters on the board inside the bounding box
fn letters_on_board(solution: &Solution) -> Letters {
    let mut counts = [0usize; 26];
    for row in solution.min_row..solution.max_row + 1 {
        for col in solution.min_col..solution.max_col + 1 {
            if solution.board.get_val(row, col) != EMPTY_VALUE {
                counts[solution.board.get_val(row, col)] += 1;
            }
        }
    }
    counts
}

/// Asserts every universal invariant of a successful solve
fn assert_valid_solution(solution: &Solution, hand: Letters) {
    // The bounding box is tight and everything outside it is empty
    assert_eq!(
        solution.board.occupied_bounds(),
        Some((solution.min_col, solution.max_col, solution.min_row, solution.max_row))
    );
    // The tiles on the board are exactly the hand
    assert_eq!(letters_on_board(solution), hand);
    assert_eq!(solution.letters, hand);
    // Every maximal run of two or more letters is a dictionary word
    for row in solution.min_row..solution.max_row + 1 {
        let mut run: Vec<usize> = Vec::new();
        for col in solution.min_col..solution.max_col + 2 {
            let val = if col <= solution.max_col { solution.board.get_val(row, col) } else { EMPTY_VALUE };
            if val != EMPTY_VALUE {
                run.push(val);
            } else {
                if run.len() > 1 {
                    assert!(
                        WORDS.contains(&convert_array_to_word(&run).as_str()),
                        "invalid run {} in row {}",
                        convert_array_to_word(&run),
                        row
                    );
                }
                run.clear();
            }
        }
    }
    for col in solution.min_col..solution.max_col + 1 {
        let mut run: Vec<usize> = Vec::new();
        for row in solution.min_row..solution.max_row + 2 {
            let val = if row <= solution.max_row { solution.board.get_val(row, col) } else { EMPTY_VALUE };
            if val != EMPTY_VALUE {
                run.push(val);
            } else {
                if run.len() > 1 {
                    assert!(
                        WORDS.contains(&convert_array_to_word(&run).as_str()),
                        "invalid run {} in column {}",
                        convert_array_to_word(&run),
                        col
                    );
                }
                run.clear();
            }
        }
    }
    // The occupied cells form a single 4-connected component
    assert_connected(solution);
    // Replaying the sequence from an empty board reproduces the board
    let mut replayed = Board::new();
    for placement in solution.play_sequence.iter() {
        for (i, &letter) in placement.word.iter().enumerate() {
            match placement.direction {
                Direction::Horizontal => replayed.set_val(placement.row, placement.col + i, letter),
                Direction::Vertical => replayed.set_val(placement.row + i, placement.col, letter),
            }
        }
    }
    assert_eq!(replayed, solution.board);
}

fn assert_connected(solution: &Solution) {
    let mut occupied: Vec<(usize, usize)> = Vec::new();
    for row in solution.min_row..solution.max_row + 1 {
        for col in solution.min_col..solution.max_col + 1 {
            if solution.board.get_val(row, col) != EMPTY_VALUE {
                occupied.push((row, col));
            }
        }
    }
    let mut seen = vec![occupied[0]];
    let mut frontier = vec![occupied[0]];
    while let Some((row, col)) = frontier.pop() {
        let neighbors = [
            (row.wrapping_sub(1), col),
            (row + 1, col),
            (row, col.wrapping_sub(1)),
            (row, col + 1),
        ];
        for neighbor in neighbors {
            if neighbor.0 < BOARD_SIZE
                && neighbor.1 < BOARD_SIZE
                && solution.board.get_val(neighbor.0, neighbor.1) != EMPTY_VALUE
                && !seen.contains(&neighbor)
            {
                seen.push(neighbor);
                frontier.push(neighbor);
            }
        }
    }
    assert_eq!(seen.len(), occupied.len(), "board is not a single connected component");
}

#[test]
fn solves_a_single_word_hand() {
    let solution = engine().play_from_scratch(count_letters("BAN"), &SolveConfig::default()).unwrap();
    assert_valid_solution(&solution, count_letters("BAN"));
    // The seed word lies horizontally, centered on the middle row
    assert_eq!((solution.min_row, solution.max_row), (72, 72));
    assert_eq!(solution.min_col, 71);
}

#[test]
fn solves_a_crossing_hand() {
    let hand = count_letters("CAATR");
    let solution = engine().play_from_scratch(hand, &SolveConfig::default()).unwrap();
    assert_valid_solution(&solution, hand);
    assert!(solution.play_sequence.len() >= 2);
}

#[test]
fn rejects_a_hand_below_two_tiles() {
    assert!(matches!(
        engine().play_from_scratch(count_letters("Z"), &SolveConfig::default()),
        Err(Error::NotEnoughLetters(1))
    ));
}

#[test]
fn dumps_when_no_word_is_makeable() {
    assert!(matches!(
        engine().play_from_scratch(count_letters("ZZZZZ"), &SolveConfig::default()),
        Err(Error::Dump)
    ));
}

#[test]
fn extends_by_one_letter() {
    let engine = engine();
    let config = SolveConfig::default();
    let solution = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    let hand = count_letters("CAATRS");
    let extended = engine.play_from_existing(hand, &solution, &config).unwrap().unwrap();
    assert_valid_solution(&extended, hand);
    // The box widened by at most one cell in each dimension
    assert!(solution.min_col - extended.min_col <= 1);
    assert!(extended.max_col - solution.max_col <= 1);
    assert!(solution.min_row - extended.min_row <= 1);
    assert!(extended.max_row - solution.max_row <= 1);
}

#[test]
fn removed_letters_fall_back_to_scratch() {
    let engine = engine();
    let config = SolveConfig::default();
    let solution = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    let hand = count_letters("CAAT");
    // The comparison is SomeLess, so the engine requests a fallback
    assert_eq!(engine.play_from_existing(hand, &solution, &config).unwrap(), None);
    let fresh = engine.play_from_scratch(hand, &config).unwrap();
    assert_valid_solution(&fresh, hand);
}

#[test]
fn same_hand_is_returned_unchanged() {
    let engine = engine();
    let config = SolveConfig::default();
    let solution = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    let again = engine.play_from_existing(count_letters("CAATR"), &solution, &config).unwrap().unwrap();
    assert_eq!(again, solution);
}

#[test]
fn replays_and_continues_a_grown_hand() {
    let engine = engine();
    let config = SolveConfig::default();
    let solution = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    // Two added tiles skip the one-letter path and replay the prior sequence
    let hand = count_letters("CAATRST");
    let extended = engine.play_from_existing(hand, &solution, &config).unwrap().unwrap();
    assert_valid_solution(&extended, hand);
    // The prior placements survive as a prefix
    assert_eq!(&extended.play_sequence[..solution.play_sequence.len()], &solution.play_sequence[..]);
}

#[test]
fn deterministic_across_runs() {
    let engine = engine();
    let config = SolveConfig::default();
    let first = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    let second = engine.play_from_scratch(count_letters("CAATR"), &config).unwrap();
    assert_eq!(first.board, second.board);
    assert_eq!(first.play_sequence, second.play_sequence);
}
