use wordle_trie::{
    load_dictionary, FeedbackPattern, SolverConfig, SolverError, Trie, WordleSolver,
};

fn get_test_words() -> Vec<&'static str> {
    vec![
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ]
}

fn test_solver() -> WordleSolver {
    WordleSolver::from_words(get_test_words(), SolverConfig::default())
}

#[test]
fn test_solver_creation() {
    let solver = test_solver();
    assert_eq!(solver.remaining_count(), get_test_words().len());
    assert_eq!(solver.config().word_length, 5);
}

#[test]
fn test_config_word_length_follows_trie() {
    let trie = Trie::from_words(4, ["moon", "mood"]);
    let solver = WordleSolver::with_config(trie, SolverConfig::default());
    assert_eq!(solver.config().word_length, 4);
}

#[test]
fn test_apply_feedback() {
    let mut solver = test_solver();

    let pattern = FeedbackPattern::calculate("crane", "crate");
    let report = solver.apply_feedback("crane", &pattern).unwrap();

    assert!(solver.remaining_count() < 10);
    assert_eq!(report.after, solver.remaining_count());
    assert!(solver.possible_answers().contains(&"crate".to_string()));
}

#[test]
fn test_find_best_guess() {
    let solver = test_solver();
    let best = solver.find_best_guess().unwrap();

    assert!(!best.word.is_empty());
    assert!(best.score > 0.0);
    assert_eq!(solver.select_next_guess(), Some(best.word));
}

#[test]
fn test_find_best_guess_single_answer() {
    let solver = WordleSolver::from_words(["crane"], SolverConfig::default());
    let best = solver.find_best_guess().unwrap();

    assert_eq!(best.word, "crane");
    assert!((best.score - 5.0).abs() < 1e-12);
}

#[test]
fn test_best_guess_is_deterministic() {
    let solver = test_solver();
    let first = solver.select_next_guess();
    for _ in 0..5 {
        assert_eq!(solver.select_next_guess(), first);
    }
    assert_eq!(solver.clone().select_next_guess(), first);
}

#[test]
fn test_best_guess_uses_positional_frequency() {
    // "s" leads four of five words and "e" ends four of five
    let solver = WordleSolver::from_words(
        ["slate", "stare", "spine", "shore", "crank"],
        SolverConfig::default(),
    );
    let best = solver.find_best_guess().unwrap();
    assert!(best.word.starts_with('s'));
    assert!(best.word.ends_with('e'));
}

#[test]
fn test_ranked_guesses() {
    let solver = test_solver();

    let top_5 = solver.ranked_guesses(5);
    assert_eq!(top_5.len(), 5);
    assert_eq!(Some(top_5[0].word.clone()), solver.select_next_guess());

    for i in 1..top_5.len() {
        assert!(top_5[i - 1].score >= top_5[i].score);
    }

    assert_eq!(solver.ranked_guesses(100).len(), 10);
}

#[test]
fn test_solve_for_target() {
    let mut solver = test_solver();

    let guesses = solver.solve_for_target("crate").unwrap();

    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);

    let (final_guess, final_pattern) = guesses.last().unwrap();
    assert!(final_pattern.is_win());
    assert_eq!(final_guess, "crate");
}

#[test]
fn test_solve_various_targets() {
    for target in get_test_words() {
        let mut solver = test_solver();
        let guesses = solver.solve_for_target(target).unwrap();

        assert!(!guesses.is_empty(), "Failed to solve for target: {}", target);
        assert!(guesses.len() <= 6, "Too many guesses for target: {}", target);

        let (final_guess, final_pattern) = guesses.last().unwrap();
        assert!(final_pattern.is_win(), "Didn't win for target: {}", target);
        assert_eq!(final_guess, target, "Final guess doesn't match target: {}", target);
    }
}

#[test]
fn test_first_word_is_played_first() {
    let config = SolverConfig::default().first_word("toast");
    let mut solver = WordleSolver::from_words(get_test_words(), config);

    let guesses = solver.solve_for_target("crane").unwrap();

    assert_eq!(guesses[0].0, "toast");
    assert!(guesses.last().unwrap().1.is_win());
}

#[test]
fn test_first_word_length_is_checked() {
    let config = SolverConfig::default().first_word("toasts");
    let mut solver = WordleSolver::from_words(get_test_words(), config);

    let err = solver.solve_for_target("crane").unwrap_err();
    assert!(matches!(err, SolverError::LengthMismatch { expected: 5, .. }));
}

#[test]
fn test_target_length_is_checked() {
    let mut solver = test_solver();
    assert!(solver.solve_for_target("cranes").is_err());
}

#[test]
fn test_unknown_target_runs_out_of_candidates() {
    let mut solver = test_solver();
    let guesses = solver.solve_for_target("fuzzy").unwrap();

    assert!(!guesses.is_empty());
    assert!(guesses.len() <= 6);
    assert!(!guesses.last().unwrap().1.is_win());
    assert_eq!(solver.remaining_count(), 0);
    assert_eq!(solver.select_next_guess(), None);
}

#[test]
fn test_max_guesses_is_respected() {
    let config = SolverConfig::default().max_guesses(1);
    let mut solver = WordleSolver::from_words(get_test_words(), config);

    let target = get_test_words()
        .into_iter()
        .find(|w| Some(w.to_string()) != test_solver().select_next_guess())
        .unwrap();
    let guesses = solver.solve_for_target(target).unwrap();

    assert_eq!(guesses.len(), 1);
    assert!(!guesses[0].1.is_win());
}

#[test]
fn test_reset() {
    let mut solver = test_solver();

    let pattern = FeedbackPattern::calculate("crane", "toast");
    solver.apply_feedback("crane", &pattern).unwrap();

    assert!(solver.remaining_count() < get_test_words().len());

    solver.reset();
    assert_eq!(solver.remaining_count(), get_test_words().len());
}

#[test]
fn test_parallel_prune_config() {
    let config = SolverConfig::default().parallel_prune(true);
    let mut parallel = WordleSolver::from_words(get_test_words(), config);
    let mut sequential = test_solver();

    let pattern = FeedbackPattern::calculate("slate", "roast");
    parallel.apply_feedback("slate", &pattern).unwrap();
    sequential.apply_feedback("slate", &pattern).unwrap();

    assert_eq!(parallel.possible_answers(), sequential.possible_answers());
}

#[test]
fn test_empty_possible_answers() {
    let mut solver = test_solver();

    // Filter to empty by applying impossible constraints
    let report = solver
        .apply_feedback("zzzzz", &FeedbackPattern::all_correct(5))
        .unwrap();

    assert!(report.is_exhausted());
    assert!(solver.find_best_guess().is_none());
    assert!(solver.ranked_guesses(5).is_empty());
}

#[test]
fn test_conflicting_feedback_is_rejected() {
    let mut solver = test_solver();
    let constraints = wordle_trie::Constraints::new().exact('c', 0).exact('t', 0);

    assert!(matches!(
        solver.apply_constraints(&constraints),
        Err(SolverError::ConflictingExactPosition { .. })
    ));
    assert_eq!(solver.remaining_count(), get_test_words().len());
}

#[test]
fn test_benchmark_on_small_list() {
    let solver = test_solver();

    let distribution = solver.benchmark_guess_distribution().unwrap();
    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    assert_eq!(total, get_test_words().len());
    assert!(distribution.iter().all(|(g, _)| (1..=6).contains(g)));

    let average = solver.benchmark_average_guesses().unwrap();
    assert!(average >= 1.0 && average <= 6.0);
}

#[test]
fn test_with_full_dictionary() {
    let mut solver = WordleSolver::new(load_dictionary());

    let guesses = solver.solve_for_target("crane").unwrap();

    assert!(!guesses.is_empty());

    let (final_guess, final_pattern) = guesses.last().unwrap();
    assert!(final_pattern.is_win());
    assert_eq!(final_guess, "crane");
}
