//! Unit tests for the `mental_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical batch; different seeds → varied operands |
//! | Structural | Count honoured; 1-based ids; stored answer equals the recomputed one; kinds match |
//! | Per-kind | Digit widths, exact division, non-negative running totals, inexact decimal division, perfect powers, percent range |
//! | Configuration | Bounds rejected before generation; JSON defaults; infeasible parameters |
//! | Session flow | Countdown, answer window, reveal timing, submission, expiry, exit |
//! | Timers | Stale events are no-ops; no duplicate results; nothing fires after exit |
//! | Scoring | Tolerance boundary; tiers; summary text |

use std::time::Duration;

use crate::practice_engine::{
    arithmetic,
    clock::TimerSlot,
    config::{OperationParams, SessionConfig},
    generate_questions,
    helpers::format_number,
    models::{GenerationRequest, OperationKind, QuestionBatch, QuestionBody},
    results::{PerformanceTier, ResultEntry, Summary},
    sampler::DigitRange,
    session::{Phase, Rejection, SessionMachine, SubmitOutcome},
    PracticeError,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Deterministic batch of `count` questions for `params`.
fn batch(params: impl Into<OperationParams>, count: u32, seed: u64) -> QuestionBatch {
    generate_questions(GenerationRequest::new(params).with_count(count).with_seed(seed))
        .expect("feasible parameters must generate")
}

/// Session config with a fixed seed and short timings.
fn session_config(params: OperationParams, count: u32) -> SessionConfig {
    SessionConfig {
        operation: params,
        question_count: count,
        time_limit_secs: 10,
        row_interval_ms: 1000,
        rng_seed: Some(2024),
    }
}

/// A machine that has already left the countdown.
fn started(params: OperationParams, count: u32) -> SessionMachine {
    let mut machine = SessionMachine::new();
    machine.start(session_config(params, count), "Ada").unwrap();
    machine.advance(Duration::from_secs(3));
    machine
}

fn type_correct_answer(machine: &mut SessionMachine) {
    let answer = format_number(machine.current_question().unwrap().answer());
    assert!(machine.set_answer(&answer));
}

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

const SEC: Duration = Duration::from_secs(1);

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_batch() {
    for kind in OperationKind::ALL {
        let a = batch(kind, 10, 12345);
        let b = batch(kind, 10, 12345);
        assert_eq!(a.batch_id, b.batch_id, "batch_id mismatch for {kind:?}");
        assert_eq!(a.questions, b.questions, "questions mismatch for {kind:?}");
    }
}

#[test]
fn different_seeds_produce_varied_questions() {
    let mut same_count = 0usize;
    let pairs = 40u64;
    for seed in 0..pairs {
        let a = batch(OperationKind::Multiplication, 5, seed);
        let b = batch(OperationKind::Multiplication, 5, seed + 500);
        if a.questions == b.questions {
            same_count += 1;
        }
    }
    assert!(same_count < pairs as usize / 4, "too many identical batches ({same_count}/{pairs})");
}

#[test]
fn entropy_seed_produces_a_valid_batch() {
    let batch = generate_questions(GenerationRequest::new(OperationKind::AddSub).with_count(5)).unwrap();
    assert_eq!(batch.len(), 5);
    assert!(batch.batch_id.starts_with("AS-"));
}

// ── structural ───────────────────────────────────────────────────────────────

#[test]
fn every_batch_has_requested_count_and_sequential_ids() {
    for kind in OperationKind::ALL {
        for seed in SEEDS {
            let b = batch(kind, 12, seed);
            assert_eq!(b.len(), 12);
            for (idx, q) in b.questions.iter().enumerate() {
                assert_eq!(q.id(), idx as u32 + 1);
                assert_eq!(q.kind(), kind);
            }
        }
    }
}

#[test]
fn stored_answer_matches_recomputation() {
    for kind in OperationKind::ALL {
        for seed in SEEDS {
            for q in batch(kind, 20, seed).questions {
                assert_eq!(q.answer(), q.body().evaluate(), "{kind:?}: {}", q.prompt());
                assert!(q.answer().is_finite());
            }
        }
    }
}

#[test]
fn every_prompt_is_non_empty() {
    for kind in OperationKind::ALL {
        for q in batch(kind, 5, 3).questions {
            assert!(!q.prompt().is_empty(), "empty prompt for {kind:?}");
        }
    }
}

// ── per-kind ─────────────────────────────────────────────────────────────────

#[test]
fn multiplication_respects_digit_widths() {
    let params = OperationParams::Multiplication { multiplicand_digits: 2, multiplier_digits: 1 };
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let QuestionBody::Multiplication { multiplicand, multiplier } = *q.body() else {
                panic!("wrong body {:?}", q.body());
            };
            assert!((10..=99).contains(&multiplicand));
            assert!((1..=9).contains(&multiplier));
            assert_eq!(q.answer(), (multiplicand * multiplier) as f64);
        }
    }
}

#[test]
fn division_is_always_exact() {
    let params = OperationParams::Division { dividend_digits: 2, divisor_digits: 1 };
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let QuestionBody::Division { dividend, divisor } = *q.body() else {
                panic!("wrong body {:?}", q.body());
            };
            assert!((10..=99).contains(&dividend));
            assert!((1..=9).contains(&divisor));
            assert_eq!(dividend % divisor, 0, "{dividend} ÷ {divisor}");
            assert_eq!(q.answer(), (dividend / divisor) as f64);
        }
    }
}

#[test]
fn add_sub_prefix_totals_never_go_negative() {
    let params = OperationParams::AddSub { digits: 1, rows: 3 };
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let (numbers, operators) = q.body().rows().unwrap();
            assert_eq!(numbers.len(), 3);
            assert_eq!(operators.len(), 2);
            assert!(numbers.iter().all(|n| (1..=9).contains(n)));
            let totals = arithmetic::prefix_totals(numbers, operators);
            assert!(totals.iter().all(|t| *t >= 0), "{}: {totals:?}", q.prompt());
            assert_eq!(q.answer(), *totals.last().unwrap() as f64);
        }
    }
}

#[test]
fn integer_add_sub_may_go_negative_but_adds_up() {
    let params = OperationParams::IntegerAddSub { digits: 2, rows: 6 };
    let mut saw_negative = false;
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let (numbers, operators) = q.body().rows().unwrap();
            assert_eq!(numbers.len(), 6);
            let total = arithmetic::running_total(numbers, operators);
            saw_negative |= total < 0;
            assert_eq!(q.answer(), total as f64);
        }
    }
    assert!(saw_negative, "signed running totals should sometimes end below zero");
}

#[test]
fn decimal_division_is_inexact_and_rounded() {
    let params = OperationParams::DecimalDivision { dividend_digits: 3, divisor_digits: 2 };
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let QuestionBody::DecimalDivision { dividend, divisor } = *q.body() else {
                panic!("wrong body {:?}", q.body());
            };
            assert_ne!(dividend % divisor, 0, "{dividend} ÷ {divisor}");
            let exact = dividend as f64 / divisor as f64;
            assert!((q.answer() - exact).abs() <= 0.005 + 1e-9);
            assert_eq!(q.answer(), arithmetic::round_to_hundredths(q.answer()));
        }
    }
}

#[test]
fn decimal_multiplication_is_exact_in_hundredths() {
    let q = crate::Question::new(
        1,
        QuestionBody::DecimalMultiplication {
            multiplicand: crate::Fixed::tenths(12, 3),
            multiplier: crate::Fixed::tenths(4, 5),
        },
    );
    assert_eq!(q.prompt(), "12.3 × 4.5");
    assert_eq!(q.answer(), 55.35);
}

#[test]
fn number_theory_answers_divide_correctly() {
    for seed in SEEDS {
        for q in batch(OperationKind::Lcm, 20, seed).questions {
            let QuestionBody::Lcm { first, second } = *q.body() else { unreachable!() };
            let lcm = q.answer() as u128;
            assert_eq!(lcm % first, 0);
            assert_eq!(lcm % second, 0);
        }
        for q in batch(OperationKind::Gcd, 20, seed).questions {
            let QuestionBody::Gcd { first, second } = *q.body() else { unreachable!() };
            let gcd = q.answer() as u128;
            assert_eq!(first % gcd, 0);
            assert_eq!(second % gcd, 0);
        }
    }
}

#[test]
fn roots_are_perfect_powers_of_requested_width() {
    let width = DigitRange::for_digits(4);
    for seed in SEEDS {
        for q in batch(OperationParams::SquareRoot { digits: 4 }, 20, seed).questions {
            let QuestionBody::SquareRoot { number } = *q.body() else { unreachable!() };
            let root = q.answer() as u128;
            assert_eq!(root * root, number);
            assert!(width.contains(number));
        }
        for q in batch(OperationParams::CubeRoot { digits: 4 }, 20, seed).questions {
            let QuestionBody::CubeRoot { number } = *q.body() else { unreachable!() };
            let root = q.answer() as u128;
            assert_eq!(root.pow(3), number);
            assert!(width.contains(number));
        }
    }
}

#[test]
fn percentages_stay_within_bounds() {
    let params = OperationParams::Percentage { min_percent: 10, max_percent: 20, number_digits: 3 };
    for seed in SEEDS {
        for q in batch(params, 20, seed).questions {
            let QuestionBody::Percentage { number, percentage } = *q.body() else { unreachable!() };
            assert!((10..=20).contains(&percentage));
            assert!((100..=999).contains(&number));
            assert!(q.prompt().starts_with(&format!("{percentage}% of ")));
        }
    }
}

// ── configuration ────────────────────────────────────────────────────────────

#[test]
fn out_of_range_parameters_are_rejected() {
    let too_many = SessionConfig { question_count: 51, ..SessionConfig::default() };
    assert!(matches!(too_many.validate(), Err(PracticeError::ParameterOutOfRange { .. })));

    let too_fast = SessionConfig { row_interval_ms: 50, ..SessionConfig::default() };
    assert!(matches!(too_fast.validate(), Err(PracticeError::ParameterOutOfRange { .. })));

    let rows = SessionConfig::new(OperationParams::AddSub { digits: 1, rows: 1 });
    assert!(matches!(rows.validate(), Err(PracticeError::ParameterOutOfRange { .. })));

    let inverted = SessionConfig::new(OperationParams::Percentage {
        min_percent: 50,
        max_percent: 10,
        number_digits: 2,
    });
    assert!(matches!(inverted.validate(), Err(PracticeError::InvalidConfig(_))));
}

#[test]
fn malformed_json_is_an_invalid_config() {
    assert!(matches!(SessionConfig::from_json("{ nope"), Err(PracticeError::InvalidConfig(_))));
    let config = SessionConfig::from_json("{}").unwrap();
    assert_eq!(config, SessionConfig::default());
}

#[test]
fn divisor_wider_than_dividend_is_infeasible() {
    let mut machine = SessionMachine::new();
    let params = OperationParams::Division { dividend_digits: 2, divisor_digits: 3 };
    let err = machine.start(session_config(params, 5), "Ada").unwrap_err();
    assert!(matches!(err, PracticeError::ConfigurationInfeasible { kind: OperationKind::Division, .. }));
    assert_eq!(machine.phase(), Phase::Idle);
}

// ── session flow ─────────────────────────────────────────────────────────────

#[test]
fn countdown_requires_a_name() {
    let mut machine = SessionMachine::new();
    let err = machine.start(SessionConfig::default(), "").unwrap_err();
    assert_eq!(err.to_string(), "Name is required");
    assert_eq!(machine.phase(), Phase::Idle);
}

#[test]
fn questions_are_generated_before_the_countdown() {
    let mut machine = SessionMachine::new();
    machine.start(session_config(OperationKind::Gcd.into(), 4), "Ada").unwrap();
    assert_eq!(machine.phase(), Phase::Countdown { remaining: 3 });
    assert_eq!(machine.questions().len(), 4);
    assert!(machine.current_question().is_none());
}

#[test]
fn perfect_run_scores_every_question() {
    let params = OperationParams::Multiplication { multiplicand_digits: 2, multiplier_digits: 1 };
    let mut machine = started(params, 5);
    for n in 1..=5 {
        assert_eq!(machine.snapshot().question_number, Some(n));
        type_correct_answer(&mut machine);
        let SubmitOutcome::Accepted { entry, finished } = machine.submit() else {
            panic!("submission {n} rejected");
        };
        assert!(entry.is_correct);
        assert_eq!(finished, n == 5);
    }
    let summary = machine.summary().unwrap();
    assert_eq!(summary.score, 5);
    assert_eq!(summary.tier, PerformanceTier::Perfect);
    assert_eq!(summary.percent_label(), "100% Correct");
    assert_eq!(machine.submit(), SubmitOutcome::Rejected(Rejection::NoActiveQuestion));
}

#[test]
fn division_session_accepts_the_quotient() {
    let params = OperationParams::Division { dividend_digits: 2, divisor_digits: 1 };
    let mut machine = started(params, 1);
    let QuestionBody::Division { dividend, divisor } = *machine.current_question().unwrap().body() else {
        panic!("division session must deliver division questions");
    };
    machine.set_answer(&(dividend / divisor).to_string());
    assert!(matches!(machine.submit(), SubmitOutcome::Accepted { entry, .. } if entry.is_correct));
}

#[test]
fn add_sub_reveals_three_rows_then_opens_ten_second_window() {
    let mut machine = started(OperationParams::AddSub { digits: 1, rows: 3 }, 1);
    let question = machine.current_question().unwrap().clone();
    let (numbers, _) = question.body().rows().unwrap();

    assert_eq!(machine.snapshot().display_text, numbers[0].to_string());
    machine.advance(SEC);
    assert_eq!(machine.snapshot().rows.unwrap().shown, 2);
    machine.advance(SEC);
    assert_eq!(machine.snapshot().rows.unwrap().shown, 3);
    assert_eq!(machine.phase(), Phase::RowReveal);
    machine.advance(SEC);
    assert_eq!(machine.phase(), Phase::AnswerPending);
    assert_eq!(machine.snapshot().time_remaining, Some(10));

    type_correct_answer(&mut machine);
    assert!(matches!(machine.submit(), SubmitOutcome::Accepted { finished: true, .. }));
}

#[test]
fn expiry_with_empty_buffer_records_no_answer() {
    let params = OperationParams::Lcm { first_digits: 1, second_digits: 1 };
    let mut machine = started(params, 2);
    machine.advance(10 * SEC);

    let snap = machine.snapshot();
    assert_eq!(snap.results.len(), 1);
    assert_eq!(snap.results[0].user_answer, None);
    assert!(!snap.results[0].is_correct);
    assert_eq!(snap.question_number, Some(2));
    assert_eq!(snap.time_remaining, Some(10));
    assert_eq!(snap.results[0].render().your_answer, "No answer");
}

#[test]
fn expiry_treats_unparsable_text_as_no_answer() {
    let params = OperationParams::Gcd { first_digits: 2, second_digits: 2 };
    let mut machine = started(params, 1);
    machine.set_answer("twelve");
    machine.advance(10 * SEC);
    let summary = machine.summary().unwrap();
    assert_eq!(summary.entries[0].user_answer, None);
}

#[test]
fn single_question_progress_reaches_one_hundred_percent() {
    let mut machine = started(OperationKind::CubeRoot.into(), 1);
    assert_eq!(machine.snapshot().progress_percent, 100.0);
    machine.advance(10 * SEC);
    assert_eq!(machine.phase(), Phase::Finished);
    assert_eq!(machine.snapshot().progress_percent, 100.0);
}

// ── timers ───────────────────────────────────────────────────────────────────

#[test]
fn stale_reveal_event_produces_no_duplicate_result() {
    let mut machine = started(OperationParams::AddSub { digits: 1, rows: 4 }, 3);
    let stale = machine.pending_timers()[0];
    assert_eq!(stale.slot, TimerSlot::Reveal);

    // Let the first question run out entirely.
    machine.advance(14 * SEC);
    assert_eq!(machine.snapshot().answered, 1);
    assert_eq!(machine.snapshot().question_number, Some(2));

    let before = machine.snapshot();
    assert!(!machine.fire(stale));
    assert_eq!(machine.snapshot(), before);
}

#[test]
fn stale_ticker_event_does_not_shorten_the_next_question() {
    let mut machine = started(OperationKind::Percentage.into(), 2);
    let stale = machine.pending_timers()[0];
    assert_eq!(stale.slot, TimerSlot::Ticker);
    assert_eq!(stale.question, Some(0));

    type_correct_answer(&mut machine);
    machine.submit();
    assert!(!machine.fire(stale));
    assert_eq!(machine.snapshot().time_remaining, Some(10));
}

#[test]
fn live_events_can_be_fired_manually() {
    let mut machine = SessionMachine::new();
    machine.start(session_config(OperationKind::Multiplication.into(), 1), "Ada").unwrap();
    for expected in [2, 1] {
        let tick = machine.pending_timers()[0];
        assert!(machine.fire(tick));
        assert_eq!(machine.phase(), Phase::Countdown { remaining: expected });
    }
    let tick = machine.pending_timers()[0];
    assert!(machine.fire(tick));
    assert_eq!(machine.phase(), Phase::AnswerPending);
    assert!(!machine.fire(tick), "an event fires at most once");
}

#[test]
fn exit_mid_question_cancels_all_timers() {
    let mut machine = started(OperationParams::AddSub { digits: 2, rows: 5 }, 3);
    machine.advance(SEC);
    assert!(machine.next_deadline().is_some());

    machine.exit();
    assert_eq!(machine.phase(), Phase::Idle);
    assert!(machine.pending_timers().is_empty());
    assert_eq!(machine.next_deadline(), None);
    machine.advance(120 * SEC);
    assert_eq!(machine.snapshot().answered, 0);
}

#[test]
fn next_deadline_is_relative_to_now() {
    let mut machine = started(OperationParams::AddSub { digits: 1, rows: 3 }, 1);
    assert_eq!(machine.next_deadline(), Some(SEC));
    machine.advance(Duration::from_millis(400));
    assert_eq!(machine.next_deadline(), Some(Duration::from_millis(600)));
}

// ── scoring ──────────────────────────────────────────────────────────────────

#[test]
fn tolerance_boundary() {
    let q = crate::Question::new(1, QuestionBody::Multiplication { multiplicand: 6, multiplier: 7 });
    assert!(ResultEntry::score(q.clone(), Some(42.004)).is_correct);
    assert!(!ResultEntry::score(q, Some(42.02)).is_correct);
}

#[test]
fn summary_text_for_a_partial_run() {
    let params = OperationParams::Multiplication { multiplicand_digits: 1, multiplier_digits: 1 };
    let mut machine = started(params, 5);
    for n in 0..5 {
        if n < 4 {
            type_correct_answer(&mut machine);
        } else {
            machine.set_answer("-1");
        }
        machine.submit();
    }
    let summary: Summary = machine.summary().unwrap();
    assert_eq!(summary.score, 4);
    assert_eq!(summary.percentage, 80.0);
    assert_eq!(summary.tier, PerformanceTier::Excellent);
    assert_eq!(summary.tier.to_string(), "Excellent!");
    assert_eq!(summary.heading(), "Ada's Results");
    assert_eq!(summary.lines()[4].your_answer, "-1");
}
