//! Question generators, one module per problem family.
//!
//! Every generator draws the operands of a single question from the shared
//! RNG and returns a [`Draw`]:
//!
//! ```ignore
//! pub fn draw<R: Rng>(rng: &mut R, /* kind-specific ranges */) -> Draw
//! ```
//!
//! `Draw::Retry` is an internal condition (a running total went negative, a
//! quotient range came out empty). The generator re-draws under a bounded
//! budget and never surfaces it unless the budget is exhausted.

use crate::practice_engine::models::QuestionBody;

/// Multiplication (MU-)
pub mod multiplication;
/// Exact division (DV-)
pub mod division;
/// Row-by-row addition/subtraction, non-negative (AS-) and signed (IS-)
pub mod running_total;
/// Decimal multiplication (DM-) and decimal division (DD-)
pub mod decimal;
/// LCM (LC-) and GCD (GC-)
pub mod number_theory;
/// Square root (SR-) and cube root (CR-)
pub mod roots;
/// Percentage of a number (PC-)
pub mod percentage;

/// Result of drawing one candidate question.
#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Ready(QuestionBody),
    /// The draw violated a generation invariant; try again with fresh samples.
    Retry(&'static str),
}

impl From<QuestionBody> for Draw {
    fn from(body: QuestionBody) -> Self {
        Draw::Ready(body)
    }
}
