//! Interactive timed drill in the terminal.
//!
//! Run with: `cargo run --example drill -- [operation] [name]`
//!
//! `operation` is one of the snake_case kind names (`multiplication`,
//! `add_sub`, `square_root`, ...); the default is `add_sub`. Type an answer and
//! press Enter to submit it; an empty line just redraws the screen. Type `q`
//! to quit.
//!
//! The session runs in real time: the loop sleeps until the machine's next
//! timer deadline or until a line arrives on stdin, whichever comes first,
//! and advances the virtual clock by the time that actually passed.
//!
//! Set `RUST_LOG=mental_drill_gen=debug` to watch the engine's transitions.

use std::time::Duration;

use mental_drill_gen::{
    OperationKind, Phase, Rejection, SessionConfig, SessionMachine, SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep, Instant};

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_kind(arg: Option<String>) -> OperationKind {
    arg.and_then(|name| serde_json::from_value(serde_json::Value::String(name)).ok())
        .unwrap_or(OperationKind::AddSub)
}

/// One-line rendering of what the player should see right now.
fn screen(machine: &SessionMachine) -> Option<String> {
    let snap = machine.snapshot();
    match snap.phase {
        Phase::Idle | Phase::Finished => None,
        Phase::Countdown { remaining } => Some(format!("Starting in {remaining}...")),
        Phase::RowReveal => Some(format!(
            "[{}/{}]  {}",
            snap.question_number.unwrap_or(0),
            snap.total_questions,
            snap.display_text
        )),
        Phase::AnswerPending => Some(format!(
            "[{}/{}]  {} = ?   ({}s)",
            snap.question_number.unwrap_or(0),
            snap.total_questions,
            snap.display_text,
            snap.time_remaining.unwrap_or(0)
        )),
    }
}

fn print_summary(machine: &SessionMachine) {
    let Some(summary) = machine.summary() else { return };
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {}", summary.heading());
    println!("  {}/{}  {}  {}", summary.score, summary.total, summary.percent_label(), summary.tier);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in summary.lines() {
        let mark = if line.is_correct { "+" } else { "x" };
        println!(
            "  [{mark}] {:<28} yours: {:<10} correct: {}",
            line.question, line.your_answer, line.correct_answer
        );
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let mut args = std::env::args().skip(1);
    let kind = parse_kind(args.next());
    let name = args.next().unwrap_or_else(|| "Player".to_string());

    let config = SessionConfig { question_count: 5, ..SessionConfig::new(kind) };
    let mut machine = SessionMachine::new();
    if let Err(err) = machine.start(config, &name) {
        eprintln!("cannot start: {err}");
        return;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();
    let mut last_screen = None;

    while !matches!(machine.phase(), Phase::Finished | Phase::Idle) {
        let current = screen(&machine);
        if current != last_screen {
            if let Some(text) = &current {
                println!("{text}");
            }
            last_screen = current;
        }

        let wait = machine.next_deadline().unwrap_or(Duration::from_secs(1));
        tokio::select! {
            _ = sleep(wait) => {}
            line = lines.next_line() => {
                let Ok(Some(line)) = line else {
                    machine.exit();
                    break;
                };
                let now = Instant::now();
                machine.advance(now - last_tick);
                last_tick = now;

                let text = line.trim();
                if text.eq_ignore_ascii_case("q") {
                    machine.exit();
                    break;
                }
                if text.is_empty() {
                    last_screen = None;
                    continue;
                }
                machine.set_answer(text);
                match machine.submit() {
                    SubmitOutcome::Accepted { entry, .. } => {
                        println!("  {}", if entry.is_correct { "correct" } else { "wrong" });
                    }
                    SubmitOutcome::Rejected(Rejection::RevealInProgress) => {
                        println!("  wait for the last row");
                    }
                    SubmitOutcome::Rejected(Rejection::NotANumber) => println!("  not a number"),
                    SubmitOutcome::Rejected(_) => {}
                }
                continue;
            }
        }

        let now = Instant::now();
        machine.advance(now - last_tick);
        last_tick = now;
    }

    print_summary(&machine);
}
