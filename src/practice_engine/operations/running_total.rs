//! Running-total questions: a column of numbers joined by `+`/`-`, revealed
//! row by row during a session.
//!
//! The non-negative variant forces `+` whenever subtracting the next number
//! would take the total below zero, so every prefix total stays `>= 0`.

use rand::Rng;

use crate::practice_engine::{
    arithmetic,
    models::{QuestionBody, RowOp},
    operations::Draw,
    sampler::DigitRange,
};

fn random_op<R: Rng>(rng: &mut R) -> RowOp {
    if rng.gen_bool(0.5) { RowOp::Plus } else { RowOp::Minus }
}

/// Rows whose running total never drops below zero.
pub fn draw_non_negative<R: Rng>(rng: &mut R, range: DigitRange, rows: u32) -> Draw {
    let first = range.sample(rng);
    let mut numbers = vec![first];
    let mut operators = Vec::with_capacity(rows.saturating_sub(1) as usize);
    let mut total = first as i128;

    for _ in 1..rows {
        let n = range.sample(rng);
        let op = if total < n as i128 { RowOp::Plus } else { random_op(rng) };
        let mut next = op.apply(total, n);
        operators.push(op);
        numbers.push(n);
        if next < 0 {
            // Coerce the row we just added to `+` and recompute from scratch.
            if let Some(last) = operators.last_mut() {
                *last = RowOp::Plus;
            }
            next = arithmetic::running_total(&numbers, &operators);
        }
        total = next;
    }

    if total < 0 {
        return Draw::Retry("negative running total");
    }
    QuestionBody::AddSub { numbers, operators }.into()
}

/// Rows with uniformly random operators; the total may go negative.
pub fn draw_signed<R: Rng>(rng: &mut R, range: DigitRange, rows: u32) -> Draw {
    let numbers: Vec<u128> = (0..rows.max(1)).map(|_| range.sample(rng)).collect();
    let operators = (1..numbers.len()).map(|_| random_op(rng)).collect();
    QuestionBody::IntegerAddSub { numbers, operators }.into()
}
