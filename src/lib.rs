//! # mental_drill_gen
//!
//! An offline, deterministic mental-arithmetic practice engine.
//!
//! The library generates batches of arithmetic questions across eleven
//! operation kinds (multiplication, exact division, running-total
//! addition/subtraction, decimal multiplication and division, LCM, GCD, square
//! and cube roots, percentages) and runs them as a timed practice session:
//! a 3-2-1 countdown, row-by-row reveal for running totals, a per-question
//! answer window, and a scored summary at the end.
//!
//! ## How it works
//!
//! 1. Build a [`SessionConfig`] with the operation parameters, question count,
//!    time limit, row interval, and an optional RNG seed.
//! 2. Call [`SessionMachine::start`]. The whole batch is generated up front;
//!    configurations that can never yield a valid question are rejected here.
//! 3. Drive the machine with [`SessionMachine::advance`] (virtual time) or by
//!    sleeping until [`SessionMachine::next_deadline`]. Feed typed text with
//!    [`SessionMachine::set_answer`] and [`SessionMachine::submit`].
//! 4. Read [`SessionMachine::snapshot`] for rendering and
//!    [`SessionMachine::summary`] once the session has finished.
//!
//! ## Key features
//!
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the exact same batch.
//! - **Exact answers**: operands are integers or fixed-point decimals; answers
//!   are compared with a tolerance of `0.01`.
//! - **No stale timers**: every timer carries the question it was armed for, so
//!   a late reveal or tick never touches the next question.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use mental_drill_gen::{
//!     generate_questions, GenerationRequest, OperationKind, OperationParams, Phase,
//!     SessionConfig, SessionMachine, SubmitOutcome,
//! };
//!
//! // Just the questions:
//! let batch = generate_questions(GenerationRequest::new(OperationKind::Gcd).with_seed(7)).unwrap();
//! println!("{}: {} = {}", batch.batch_id, batch.questions[0].prompt(), batch.questions[0].answer());
//!
//! // A full session:
//! let config = SessionConfig {
//!     operation: OperationParams::Multiplication { multiplicand_digits: 2, multiplier_digits: 1 },
//!     question_count: 1,
//!     rng_seed: Some(42),
//!     ..SessionConfig::default()
//! };
//! let mut session = SessionMachine::new();
//! session.start(config, "Ada").unwrap();
//! session.advance(Duration::from_secs(3));
//! assert_eq!(session.phase(), Phase::AnswerPending);
//!
//! let answer = session.current_question().unwrap().answer();
//! session.set_answer(&answer.to_string());
//! assert!(matches!(session.submit(), SubmitOutcome::Accepted { finished: true, .. }));
//! println!("{}", session.summary().unwrap().tier);
//! ```

pub mod practice_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `mental_drill_gen::SessionMachine`
// directly without reaching into `practice_engine::`.
pub use practice_engine::{
    generate_any, generate_questions, Fixed, GenerationRequest, OperationKind, OperationParams,
    PerformanceTier, Phase, PracticeError, Question, QuestionBatch, QuestionBody, Rejection,
    ResultEntry, ResultLine, RowOp, SessionConfig, SessionMachine, SessionSnapshot,
    SubmitOutcome, Summary,
};

#[cfg(test)]
mod tests;
