//! Exact integer arithmetic behind every answer: GCD/LCM, integer roots,
//! running totals and two-decimal rounding.

use crate::practice_engine::models::{Fixed, RowOp};

/// Answers within this absolute distance of the expected value are correct.
pub const ANSWER_TOLERANCE: f64 = 0.01;

/// Euclidean GCD; `gcd(a, 0) == a`.
pub fn gcd(a: u128, b: u128) -> u128 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// `a * b / gcd(a, b)`, dividing first to keep the intermediate small.
pub fn lcm(a: u128, b: u128) -> u128 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Largest `r` with `r^power <= n`.
pub fn floor_root(n: u128, power: u32) -> u128 {
    if n < 2 || power < 2 {
        return n;
    }
    // The float estimate is within a few units; correct it exactly.
    let mut r = (n as f64).powf(1.0 / power as f64) as u128;
    while r > 0 && r.checked_pow(power).map_or(true, |p| p > n) {
        r -= 1;
    }
    while (r + 1).checked_pow(power).map_or(false, |p| p <= n) {
        r += 1;
    }
    r
}

/// Smallest `r` with `r^power >= n`.
pub fn ceil_root(n: u128, power: u32) -> u128 {
    let r = floor_root(n, power);
    if r.checked_pow(power).map_or(false, |p| p < n) { r + 1 } else { r }
}

/// Left-to-right application of `operators` over `numbers`.
pub fn running_total(numbers: &[u128], operators: &[RowOp]) -> i128 {
    prefix_totals(numbers, operators).last().copied().unwrap_or(0)
}

/// Total after each row; `result[k]` is the value once `numbers[..=k]` are applied.
pub fn prefix_totals(numbers: &[u128], operators: &[RowOp]) -> Vec<i128> {
    let mut totals = Vec::with_capacity(numbers.len());
    let mut iter = numbers.iter();
    let Some(&first) = iter.next() else {
        return totals;
    };
    let mut total = first as i128;
    totals.push(total);
    for (&n, &op) in iter.zip(operators) {
        total = op.apply(total, n);
        totals.push(total);
    }
    totals
}

/// `dividend / divisor` in hundredths, rounded half away from zero.
pub fn divide_to_hundredths(dividend: u128, divisor: u128) -> u128 {
    (dividend * 200 + divisor) / (divisor * 2)
}

/// Product of two fixed-point operands rounded to two decimals.
pub fn fixed_product(a: Fixed, b: Fixed) -> f64 {
    // Both operands carry at most one decimal, so the exact product fits in hundredths.
    let scale = 10u128.pow(u32::from(2u8.saturating_sub(a.decimals + b.decimals)));
    match a.scaled.checked_mul(b.scaled).and_then(|p| p.checked_mul(scale)) {
        Some(hundredths) => hundredths as f64 / 100.0,
        None => round_to_hundredths(a.as_f64() * b.as_f64()),
    }
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Correctness rule for a submitted answer.
pub fn is_within_tolerance(submitted: f64, expected: f64) -> bool {
    (submitted - expected).abs() < ANSWER_TOLERANCE
}
