//! Wordle Trie CLI
//!
//! Interactive command-line interface for the prefix-tree Wordle solver.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::debug;
use wordle_trie::{
    dictionary_for_length, FeedbackPattern, SolverConfig, Trie, WordleSolver, WORD_LENGTH,
};

const BANNER_TEXT: &str = include_str!("text/banner.txt");

#[derive(Parser, Debug)]
#[clap(name = "wordle-trie", version, about = "Prefix-tree Wordle solver")]
struct Cli {
    /// Word list, one word per line. Defaults to the built-in dictionary.
    #[clap(long, env = "WORD_PATH")]
    words: Option<PathBuf>,

    /// Opening guess. Defaults to the best-scoring word.
    #[clap(long, env = "FIRST_WORD")]
    first_word: Option<String>,

    /// Length of the words in the word list. The built-in dictionary only
    /// has 5-letter words, so other lengths need --words.
    #[clap(long, default_value_t = WORD_LENGTH)]
    length: usize,

    /// Guesses allowed per game.
    #[clap(long, default_value_t = wordle_trie::config::MAX_GUESSES)]
    max_guesses: usize,

    /// Prune the tree's top-level branches in parallel.
    #[clap(long)]
    parallel: bool,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the best opening guess.
    Suggest,
    /// Play a game against a known answer.
    Solve { target: String },
    /// Play every word in the list and report the guess distribution.
    Benchmark,
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn print_banner() {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("{}", BANNER_TEXT);
}

fn print_game(guesses: &[(String, FeedbackPattern)]) {
    for (i, (guess, pattern)) in guesses.iter().enumerate() {
        println!("Guess {}: {} → {}", i + 1, guess.to_uppercase(), pattern);
    }
    println!();
    match guesses.last() {
        Some((_, pattern)) if pattern.is_win() => {
            println!("✓ Solved in {} guesses!", guesses.len());
        }
        _ => println!("✗ Failed to solve."),
    }
}

fn build_solver(cli: &Cli) -> wordle_trie::Result<WordleSolver> {
    let trie = match &cli.words {
        Some(path) => Trie::from_path(cli.length, path)?,
        None => dictionary_for_length(cli.length)?,
    };
    debug!("{} candidate words", trie.len());

    let mut config = SolverConfig::new()
        .max_guesses(cli.max_guesses)
        .parallel_prune(cli.parallel);
    if let Some(word) = &cli.first_word {
        config = config.first_word(word.to_lowercase());
    }
    Ok(WordleSolver::with_config(trie, config))
}

fn run_interactive(mut solver: WordleSolver) -> wordle_trie::Result<()> {
    print_banner();
    println!("Loaded {} words.", solver.remaining_count());
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => {
                print_help();
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "best" => match solver.find_best_guess() {
                Some(best) => {
                    println!();
                    println!("Best guess: {}", best.word.to_uppercase());
                    println!("  Score: {:.3}", best.score);
                    println!("Remaining possibilities: {}", solver.remaining_count());
                    println!();
                }
                None => {
                    println!("No possible words remaining. Use 'reset' to start over.");
                }
            },
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                let top = solver.ranked_guesses(n);

                if top.is_empty() {
                    println!("No possible words remaining.");
                } else {
                    println!();
                    println!("Top {} guesses:", top.len());
                    println!("{:>4} {:>8} {:>8}", "#", "Word", "Score");
                    println!("{}", "-".repeat(22));
                    for (i, guess) in top.iter().enumerate() {
                        println!(
                            "{:>4} {:>8} {:>8.3}",
                            i + 1,
                            guess.word.to_uppercase(),
                            guess.score
                        );
                    }
                    println!();
                }
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <word> <pattern>");
                    println!("Example: feedback crane gybbb");
                    continue;
                }

                let word = parts[1].to_lowercase();
                let pattern: FeedbackPattern = match parts[2].parse() {
                    Ok(pattern) => pattern,
                    Err(err) => {
                        println!("{}", err);
                        println!("Use g=green, y=yellow, b=black");
                        continue;
                    }
                };

                match solver.apply_feedback(&word, &pattern) {
                    Ok(report) => {
                        println!();
                        println!("Guess: {}", word.to_uppercase());
                        println!("Feedback: {}", pattern);
                        println!(
                            "Eliminated {} words ({} → {})",
                            report.eliminated(),
                            report.before,
                            report.after
                        );

                        if pattern.is_win() {
                            println!();
                            println!("🎉 Congratulations! You solved it!");
                        } else if report.is_exhausted() {
                            println!();
                            println!("⚠️  No words match this feedback pattern!");
                            println!("This might indicate an error. Use 'reset' to start over.");
                        } else if report.after <= 10 {
                            println!();
                            println!(
                                "Remaining words: {:?}",
                                solver
                                    .possible_answers()
                                    .iter()
                                    .map(|s| s.to_uppercase())
                                    .collect::<Vec<_>>()
                            );
                        }
                        println!();
                    }
                    Err(err) => println!("{}", err),
                }
            }
            "remaining" | "r" | "left" => {
                let remaining = solver.possible_answers();
                println!();
                println!("Remaining possibilities: {}", remaining.len());
                if remaining.len() <= 20 {
                    for (i, word) in remaining.iter().enumerate() {
                        if i > 0 && i % 10 == 0 {
                            println!();
                        }
                        print!("{:>8}", word.to_uppercase());
                    }
                    println!();
                }
                println!();
            }
            "solve" => {
                if parts.len() < 2 {
                    println!("Usage: solve <target_word>");
                    continue;
                }

                let target = parts[1].to_lowercase();
                println!();
                println!("Solving for: {}", target.to_uppercase());
                println!();

                solver.reset();
                match solver.solve_for_target(&target) {
                    Ok(guesses) => print_game(&guesses),
                    Err(err) => println!("{}", err),
                }
                println!();
                solver.reset();
            }
            "reset" => {
                solver.reset();
                println!(
                    "Reset to initial state. {} words available.",
                    solver.remaining_count()
                );
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }

    Ok(())
}

fn run(cli: Cli) -> wordle_trie::Result<()> {
    let mut solver = build_solver(&cli)?;

    match &cli.command {
        None => run_interactive(solver)?,
        Some(Command::Suggest) => match solver.find_best_guess() {
            Some(best) => {
                println!("Best opening guess: {}", best.word.to_uppercase());
                println!("Score: {:.3}", best.score);
            }
            None => eprintln!("No words available."),
        },
        Some(Command::Solve { target }) => {
            let target = target.to_lowercase();
            println!("Solving for: {}", target.to_uppercase());
            println!();
            let guesses = solver.solve_for_target(&target)?;
            print_game(&guesses);
        }
        Some(Command::Benchmark) => {
            println!("Running benchmark on all {} words...", solver.remaining_count());

            let spinner = Spinner::new("Computing...");
            let start = std::time::Instant::now();
            let distribution = solver.benchmark_guess_distribution();
            let elapsed = start.elapsed();
            spinner.stop();
            let distribution = distribution?;

            let total: usize = distribution.iter().map(|(_, c)| c).sum();
            if total == 0 {
                eprintln!("No words available.");
                return Ok(());
            }
            let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
            let average = total_guesses as f64 / total as f64;

            println!("Guess distribution:");
            for (guesses, count) in &distribution {
                let pct = *count as f64 / total as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total).max(1));
                println!("  {} guesses: {:>5} ({:>5.1}%) {}", guesses, count, pct, bar);
            }
            println!();
            println!("Average guesses: {:.3}", average);
            println!("Time elapsed: {:.2?}", elapsed);

            let failures: usize = distribution
                .iter()
                .filter(|(g, _)| *g > solver.config().max_guesses)
                .map(|(_, c)| c)
                .sum();
            if failures > 0 {
                println!(
                    "Words not solved in {} guesses: {}",
                    solver.config().max_guesses,
                    failures
                );
            } else {
                println!(
                    "✓ All words solved within {} guesses!",
                    solver.config().max_guesses
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
