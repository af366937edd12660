use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use log::{info, warn};
use puzzle_bank::clock::{Clock, SystemClock};
use puzzle_bank::config::Config;
use puzzle_bank::progress::DAILY_SET_GOAL;
use puzzle_bank::session::{format_elapsed, parse_choice, AnswerSink, QuizMode, QuizSession};
use puzzle_bank::store::{JsonFileStore, LearnerData};
use puzzle_bank::{select_questions, shared_bank, Bank};

type HostResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const TRAINING_CHOICE: &str = "1";
const MOCK_TEST_CHOICE: &str = "2";
const STATS_CHOICE: &str = "s";
const RESET_CHOICE: &str = "r";
const QUIT_CHOICE: &str = "q";

fn main() -> HostResult {
    // A missing .env is fine.
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    info!("Starting puzzle bank...");

    let config = Config::from_env();

    println!("Building the question bank...");
    let bank = shared_bank()?;
    println!("{} questions ready", bank.len());

    let mut store = JsonFileStore::open(&config.data_dir)?;
    let mut data = LearnerData::load(&store);
    let clock = SystemClock;
    data.progress.roll_over(clock.today());

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!(
            "Today: {} / {} sets ({}%)",
            data.progress.daily_sets_completed,
            DAILY_SET_GOAL,
            data.progress.daily_progress_percent()
        );
        println!(
            "[{}] Training  [{}] Mock test  [{}] Stats  [{}] Reset  [{}] Quit",
            TRAINING_CHOICE, MOCK_TEST_CHOICE, STATS_CHOICE, RESET_CHOICE, QUIT_CHOICE
        );

        let Some(line) = prompt_line(&mut input, "> ")? else {
            break;
        };
        match line.as_str() {
            TRAINING_CHOICE | MOCK_TEST_CHOICE => {
                let mode = if line == TRAINING_CHOICE {
                    QuizMode::Training
                } else {
                    QuizMode::MockTest
                };
                run_session(mode, bank, &config, &mut store, &mut data, &clock, &mut input)?;
            }
            STATS_CHOICE => print_stats(&data),
            RESET_CHOICE => {
                let answer = prompt_line(&mut input, "Do you want to clear all your progress? [y/N] ")?;
                if matches!(answer.as_deref(), Some("y") | Some("Y")) {
                    data = LearnerData::default();
                    data.save_all(&mut store)?;
                    println!("Progress cleared.");
                }
            }
            QUIT_CHOICE => break,
            _ => println!("Please pick one of the options"),
        }
    }

    info!("Bye!");
    Ok(())
}

fn prompt_line(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn run_session(
    mode: QuizMode,
    bank: &Bank,
    config: &Config,
    store: &mut JsonFileStore,
    data: &mut LearnerData,
    clock: &impl Clock,
    input: &mut impl BufRead,
) -> HostResult {
    let seed = config.next_session_seed();
    let picked = select_questions(
        bank,
        config.session_size,
        data.seen.as_slice(),
        &data.stats,
        seed,
        clock.now_ms(),
    );
    info!("{:?} session with {} questions (seed {})", mode, picked.len(), seed);

    let diagram_path = store.dir().join("diagram.svg");
    let mut session = QuizSession::new(mode, picked, clock.now_ms());

    while let Some(q) = session.current() {
        println!();
        println!(
            "Question {}/{}  {} • {} Points  [{}]",
            session.position(),
            session.len(),
            q.category,
            q.points,
            format_elapsed(session.elapsed_secs(clock.now_ms()))
        );
        println!("{}", q.prompt);
        if let Some(svg) = &q.diagram_markup {
            show_diagram(&diagram_path, svg);
        }
        for (i, choice) in q.choices.iter().enumerate() {
            println!("  {}) {}", i + 1, choice);
        }

        let started = Instant::now();
        let choice = loop {
            let Some(line) = prompt_line(input, "Your answer: ")? else {
                // Input closed: keep what was answered so far.
                data.save_all(&mut *store)?;
                return Ok(());
            };
            match parse_choice(&line) {
                Some(c) => break c,
                None => println!("Please answer with 1-4 or A-D"),
            }
        };
        let time_sec = started.elapsed().as_secs_f64();

        let sink = AnswerSink {
            stats: &mut data.stats,
            seen: &mut data.seen,
            progress: &mut data.progress,
        };
        let Some(outcome) = session.answer(choice, time_sec, clock.now_ms(), sink) else {
            break;
        };
        // Write-through so an abrupt exit loses nothing.
        data.save_answers(&mut *store)?;

        if outcome.correct {
            println!("Correct!");
        } else {
            println!("Not quite, the answer was {}", q.choices[outcome.correct_index]);
        }
    }

    let mut summary = session.summary(clock.now_ms());
    data.progress.finish_session(&mut summary, clock.today());
    data.save_progress(&mut *store)?;

    println!();
    println!("{}", summary.verdict.title());
    println!("{} / {} in {}", summary.score, summary.total, format_elapsed(summary.elapsed_secs));
    println!("{}", summary.verdict.message());
    if summary.goal_reached {
        println!("🎉 You finished all {} sets for today! 🎉", DAILY_SET_GOAL);
    }
    Ok(())
}

fn show_diagram(path: &Path, svg: &str) {
    match fs::write(path, svg) {
        Ok(()) => println!("(open {} to see the picture)", path.display()),
        Err(e) => warn!("could not write diagram to {}: {}", path.display(), e),
    }
}

fn print_stats(data: &LearnerData) {
    let p = &data.progress;
    println!();
    println!("Total solved: {}", p.total_solved);
    println!("Accuracy: {}%", p.accuracy_percent());
    println!("Best score: {}", p.best_score);
    println!("Day streak: {} Days", p.streak);
    println!("Questions tried: {}", data.stats.len());
}
