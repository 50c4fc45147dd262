use std::fmt;
use serde::{Deserialize, Serialize};

use crate::practice_engine::{arithmetic, config::OperationParams};

// ---------------------------------------------------------------------------
// Operation kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Multiplication,
    Division,
    AddSub,
    DecimalMultiplication,
    DecimalDivision,
    IntegerAddSub,
    Lcm,
    Gcd,
    SquareRoot,
    CubeRoot,
    Percentage,
}

impl OperationKind {
    /// Every kind in setup-form order.
    pub const ALL: [OperationKind; 11] = [
        OperationKind::Multiplication,
        OperationKind::Division,
        OperationKind::AddSub,
        OperationKind::DecimalMultiplication,
        OperationKind::DecimalDivision,
        OperationKind::IntegerAddSub,
        OperationKind::Lcm,
        OperationKind::Gcd,
        OperationKind::SquareRoot,
        OperationKind::CubeRoot,
        OperationKind::Percentage,
    ];

    /// Running-total kinds are revealed row by row before the answer window opens.
    pub fn is_running_total(self) -> bool {
        matches!(self, OperationKind::AddSub | OperationKind::IntegerAddSub)
    }

    /// Two-letter prefix used in batch ids.
    pub fn batch_prefix(self) -> &'static str {
        match self {
            OperationKind::Multiplication        => "MU",
            OperationKind::Division              => "DV",
            OperationKind::AddSub                => "AS",
            OperationKind::DecimalMultiplication => "DM",
            OperationKind::DecimalDivision       => "DD",
            OperationKind::IntegerAddSub         => "IS",
            OperationKind::Lcm                   => "LC",
            OperationKind::Gcd                   => "GC",
            OperationKind::SquareRoot            => "SR",
            OperationKind::CubeRoot              => "CR",
            OperationKind::Percentage            => "PC",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Multiplication        => "Multiplication",
            OperationKind::Division              => "Division",
            OperationKind::AddSub                => "Addition & Subtraction",
            OperationKind::DecimalMultiplication => "Decimal Multiplication",
            OperationKind::DecimalDivision       => "Decimal Division",
            OperationKind::IntegerAddSub         => "Integer Addition & Subtraction",
            OperationKind::Lcm                   => "LCM",
            OperationKind::Gcd                   => "GCD",
            OperationKind::SquareRoot            => "Square Root",
            OperationKind::CubeRoot              => "Cube Root",
            OperationKind::Percentage            => "Percentage",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Operand primitives
// ---------------------------------------------------------------------------

/// Operator between two rows of a running-total question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOp {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl RowOp {
    pub fn apply(self, total: i128, value: u128) -> i128 {
        match self {
            RowOp::Plus  => total + value as i128,
            RowOp::Minus => total - value as i128,
        }
    }
}

impl fmt::Display for RowOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowOp::Plus  => write!(f, "+"),
            RowOp::Minus => write!(f, "-"),
        }
    }
}

/// A non-negative fixed-point operand: `scaled / 10^decimals`.
///
/// Only zero or one fractional digit is ever generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixed {
    pub scaled: u128,
    pub decimals: u8,
}

impl Fixed {
    pub fn whole(value: u128) -> Self {
        Fixed { scaled: value, decimals: 0 }
    }

    /// `whole.digit`, e.g. `tenths(12, 3)` is 12.3.
    pub fn tenths(whole: u128, digit: u8) -> Self {
        Fixed { scaled: whole * 10 + u128::from(digit % 10), decimals: 1 }
    }

    pub fn as_f64(self) -> f64 {
        self.scaled as f64 / 10f64.powi(i32::from(self.decimals))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decimals {
            0 => write!(f, "{}", self.scaled),
            _ => write!(f, "{}.{}", self.scaled / 10, self.scaled % 10),
        }
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Variant-specific operands of a question. One variant per [`OperationKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionBody {
    Multiplication { multiplicand: u128, multiplier: u128 },
    Division { dividend: u128, divisor: u128 },
    /// Every prefix total stays non-negative.
    AddSub { numbers: Vec<u128>, operators: Vec<RowOp> },
    DecimalMultiplication { multiplicand: Fixed, multiplier: Fixed },
    /// Whole-number operands; the dividend is usually not a multiple of the divisor.
    DecimalDivision { dividend: u128, divisor: u128 },
    IntegerAddSub { numbers: Vec<u128>, operators: Vec<RowOp> },
    Lcm { first: u128, second: u128 },
    Gcd { first: u128, second: u128 },
    SquareRoot { number: u128 },
    CubeRoot { number: u128 },
    Percentage { number: u128, percentage: u32 },
}

impl QuestionBody {
    pub fn kind(&self) -> OperationKind {
        match self {
            QuestionBody::Multiplication { .. }        => OperationKind::Multiplication,
            QuestionBody::Division { .. }              => OperationKind::Division,
            QuestionBody::AddSub { .. }                => OperationKind::AddSub,
            QuestionBody::DecimalMultiplication { .. } => OperationKind::DecimalMultiplication,
            QuestionBody::DecimalDivision { .. }       => OperationKind::DecimalDivision,
            QuestionBody::IntegerAddSub { .. }         => OperationKind::IntegerAddSub,
            QuestionBody::Lcm { .. }                   => OperationKind::Lcm,
            QuestionBody::Gcd { .. }                   => OperationKind::Gcd,
            QuestionBody::SquareRoot { .. }            => OperationKind::SquareRoot,
            QuestionBody::CubeRoot { .. }              => OperationKind::CubeRoot,
            QuestionBody::Percentage { .. }            => OperationKind::Percentage,
        }
    }

    /// The exact answer for these operands, rounded to two decimals where the
    /// result is not an integer.
    pub fn evaluate(&self) -> f64 {
        match self {
            QuestionBody::Multiplication { multiplicand, multiplier } => {
                (multiplicand * multiplier) as f64
            }
            QuestionBody::Division { dividend, divisor } => (dividend / divisor) as f64,
            QuestionBody::AddSub { numbers, operators }
            | QuestionBody::IntegerAddSub { numbers, operators } => {
                arithmetic::running_total(numbers, operators) as f64
            }
            QuestionBody::DecimalMultiplication { multiplicand, multiplier } => {
                arithmetic::fixed_product(*multiplicand, *multiplier)
            }
            QuestionBody::DecimalDivision { dividend, divisor } => {
                arithmetic::divide_to_hundredths(*dividend, *divisor) as f64 / 100.0
            }
            QuestionBody::Lcm { first, second } => arithmetic::lcm(*first, *second) as f64,
            QuestionBody::Gcd { first, second } => arithmetic::gcd(*first, *second) as f64,
            QuestionBody::SquareRoot { number } => arithmetic::floor_root(*number, 2) as f64,
            QuestionBody::CubeRoot { number } => arithmetic::floor_root(*number, 3) as f64,
            QuestionBody::Percentage { number, percentage } => {
                // number * percentage is already in hundredths
                (number * u128::from(*percentage)) as f64 / 100.0
            }
        }
    }

    /// Rows of a running-total question, `None` for every other kind.
    pub fn rows(&self) -> Option<(&[u128], &[RowOp])> {
        match self {
            QuestionBody::AddSub { numbers, operators }
            | QuestionBody::IntegerAddSub { numbers, operators } => Some((numbers, operators)),
            _ => None,
        }
    }
}

/// One generated question. Immutable once built; the answer is computed from
/// the operands at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: u32,
    body: QuestionBody,
    answer: f64,
}

impl Question {
    pub fn new(id: u32, body: QuestionBody) -> Self {
        let answer = body.evaluate();
        Question { id, body, answer }
    }

    /// 1-based position within its batch.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.body.kind()
    }

    pub fn body(&self) -> &QuestionBody {
        &self.body
    }

    pub fn answer(&self) -> f64 {
        self.answer
    }

    /// Question text without the trailing `= ?`, e.g. `"12 × 7"` or `"√1764"`.
    pub fn prompt(&self) -> String {
        match &self.body {
            QuestionBody::Multiplication { multiplicand, multiplier } => {
                format!("{multiplicand} × {multiplier}")
            }
            QuestionBody::Division { dividend, divisor }
            | QuestionBody::DecimalDivision { dividend, divisor } => {
                format!("{dividend} ÷ {divisor}")
            }
            QuestionBody::AddSub { numbers, operators }
            | QuestionBody::IntegerAddSub { numbers, operators } => {
                crate::practice_engine::helpers::rows_text(numbers, operators, numbers.len())
            }
            QuestionBody::DecimalMultiplication { multiplicand, multiplier } => {
                format!("{multiplicand} × {multiplier}")
            }
            QuestionBody::Lcm { first, second } => format!("LCM({first}, {second})"),
            QuestionBody::Gcd { first, second } => format!("GCD({first}, {second})"),
            QuestionBody::SquareRoot { number } => format!("√{number}"),
            QuestionBody::CubeRoot { number } => format!("∛{number}"),
            QuestionBody::Percentage { number, percentage } => {
                format!("{percentage}% of {number}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Generation request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub params: OperationParams,
    pub count: u32,
    pub rng_seed: Option<u64>,
}

impl GenerationRequest {
    /// Ten questions from an entropy-seeded RNG.
    pub fn new(params: impl Into<OperationParams>) -> Self {
        GenerationRequest { params: params.into(), count: 10, rng_seed: None }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBatch {
    /// `"<PREFIX>-<8 hex digits>"`, e.g. `"MU-1A2B3C4D"`.
    pub batch_id: String,
    pub kind: OperationKind,
    pub questions: Vec<Question>,
}

impl QuestionBatch {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
