//! Shared text builders used by question prompts, the row reveal and result
//! rendering.

use crate::practice_engine::models::RowOp;

/// The first `shown` rows of a running-total question, e.g. `"12 + 5 - 3"`.
///
/// `shown` is clamped to the number of rows.
pub fn rows_text(numbers: &[u128], operators: &[RowOp], shown: usize) -> String {
    let mut text = String::new();
    for (idx, n) in numbers.iter().take(shown).enumerate() {
        if idx == 0 {
            text.push_str(&n.to_string());
        } else {
            let op = operators.get(idx - 1).copied().unwrap_or(RowOp::Plus);
            text.push_str(&format!(" {op} {n}"));
        }
    }
    text
}

/// Shortest decimal form of an answer: `42`, `3.33`, `-7`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Parse a free-text answer; `None` for blank or non-numeric input.
pub fn parse_answer(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
