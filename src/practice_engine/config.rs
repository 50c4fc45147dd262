//! Session configuration: which operation to drill, its digit/range
//! parameters, and the timing of the session.
//!
//! Values normally arrive already validated from setup-form widgets; the
//! bounds here are checked once more before any question is generated.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::practice_engine::{
    error::{PracticeError, Result},
    models::OperationKind,
};

/// Answer window after the last row of a running-total question, regardless of
/// the configured per-question time limit.
pub const RUNNING_TOTAL_ANSWER_SECS: u32 = 10;

/// Ticks shown before the first question.
pub const COUNTDOWN_SECS: u32 = 3;

/// Inclusive bounds for one numeric parameter.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub name: &'static str,
    pub min: u64,
    pub max: u64,
}

impl Bounds {
    const fn new(name: &'static str, min: u64, max: u64) -> Self {
        Bounds { name, min, max }
    }

    pub fn check(&self, value: u64) -> Result<()> {
        if value < self.min || value > self.max {
            return Err(PracticeError::ParameterOutOfRange {
                name: self.name,
                value: value as f64,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

pub const QUESTION_COUNT: Bounds = Bounds::new("question count", 1, 50);
pub const TIME_LIMIT_SECS: Bounds = Bounds::new("time limit", 5, 300);
pub const ROW_INTERVAL_MS: Bounds = Bounds::new("row interval", 100, 10_000);
const OPERAND_DIGITS: Bounds = Bounds::new("operand digits", 1, 10);
const ROWS: Bounds = Bounds::new("rows", 2, 20);
const DECIMAL_DIGITS: Bounds = Bounds::new("decimal operand digits", 1, 20);
const DECIMAL_MULTIPLIER_DIGITS: Bounds = Bounds::new("decimal multiplier digits", 0, 20);
const ROOT_DIGITS: Bounds = Bounds::new("root digits", 1, 30);
const PERCENT: Bounds = Bounds::new("percentage", 1, 100);

/// Per-kind generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationParams {
    Multiplication { multiplicand_digits: u32, multiplier_digits: u32 },
    Division { dividend_digits: u32, divisor_digits: u32 },
    AddSub { digits: u32, rows: u32 },
    /// `multiplier_digits == 0` draws a whole-number multiplier in `1..=99`.
    DecimalMultiplication { multiplicand_digits: u32, multiplier_digits: u32 },
    DecimalDivision { dividend_digits: u32, divisor_digits: u32 },
    IntegerAddSub { digits: u32, rows: u32 },
    Lcm { first_digits: u32, second_digits: u32 },
    Gcd { first_digits: u32, second_digits: u32 },
    /// Digit count of the perfect square shown, not of its root.
    SquareRoot { digits: u32 },
    CubeRoot { digits: u32 },
    Percentage { min_percent: u32, max_percent: u32, number_digits: u32 },
}

impl OperationParams {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationParams::Multiplication { .. }        => OperationKind::Multiplication,
            OperationParams::Division { .. }              => OperationKind::Division,
            OperationParams::AddSub { .. }                => OperationKind::AddSub,
            OperationParams::DecimalMultiplication { .. } => OperationKind::DecimalMultiplication,
            OperationParams::DecimalDivision { .. }       => OperationKind::DecimalDivision,
            OperationParams::IntegerAddSub { .. }         => OperationKind::IntegerAddSub,
            OperationParams::Lcm { .. }                   => OperationKind::Lcm,
            OperationParams::Gcd { .. }                   => OperationKind::Gcd,
            OperationParams::SquareRoot { .. }            => OperationKind::SquareRoot,
            OperationParams::CubeRoot { .. }              => OperationKind::CubeRoot,
            OperationParams::Percentage { .. }            => OperationKind::Percentage,
        }
    }

    /// The values a fresh setup form starts with.
    pub fn defaults(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Multiplication =>
                OperationParams::Multiplication { multiplicand_digits: 2, multiplier_digits: 1 },
            OperationKind::Division =>
                OperationParams::Division { dividend_digits: 2, divisor_digits: 1 },
            OperationKind::AddSub =>
                OperationParams::AddSub { digits: 2, rows: 3 },
            OperationKind::DecimalMultiplication =>
                OperationParams::DecimalMultiplication { multiplicand_digits: 2, multiplier_digits: 1 },
            OperationKind::DecimalDivision =>
                OperationParams::DecimalDivision { dividend_digits: 2, divisor_digits: 1 },
            OperationKind::IntegerAddSub =>
                OperationParams::IntegerAddSub { digits: 2, rows: 3 },
            OperationKind::Lcm =>
                OperationParams::Lcm { first_digits: 2, second_digits: 2 },
            OperationKind::Gcd =>
                OperationParams::Gcd { first_digits: 2, second_digits: 2 },
            OperationKind::SquareRoot =>
                OperationParams::SquareRoot { digits: 4 },
            OperationKind::CubeRoot =>
                OperationParams::CubeRoot { digits: 4 },
            OperationKind::Percentage =>
                OperationParams::Percentage { min_percent: 1, max_percent: 100, number_digits: 4 },
        }
    }

    /// Check every parameter against its documented bounds.
    pub fn validate(&self) -> Result<()> {
        let d = |v: u32| u64::from(v);
        match *self {
            OperationParams::Multiplication { multiplicand_digits: a, multiplier_digits: b }
            | OperationParams::Division { dividend_digits: a, divisor_digits: b }
            | OperationParams::Lcm { first_digits: a, second_digits: b }
            | OperationParams::Gcd { first_digits: a, second_digits: b } => {
                OPERAND_DIGITS.check(d(a))?;
                OPERAND_DIGITS.check(d(b))
            }
            OperationParams::AddSub { digits, rows }
            | OperationParams::IntegerAddSub { digits, rows } => {
                OPERAND_DIGITS.check(d(digits))?;
                ROWS.check(d(rows))
            }
            OperationParams::DecimalMultiplication { multiplicand_digits, multiplier_digits } => {
                DECIMAL_DIGITS.check(d(multiplicand_digits))?;
                DECIMAL_MULTIPLIER_DIGITS.check(d(multiplier_digits))
            }
            OperationParams::DecimalDivision { dividend_digits, divisor_digits } => {
                DECIMAL_DIGITS.check(d(dividend_digits))?;
                DECIMAL_DIGITS.check(d(divisor_digits))
            }
            OperationParams::SquareRoot { digits } | OperationParams::CubeRoot { digits } => {
                ROOT_DIGITS.check(d(digits))
            }
            OperationParams::Percentage { min_percent, max_percent, number_digits } => {
                PERCENT.check(d(min_percent))?;
                PERCENT.check(d(max_percent))?;
                OPERAND_DIGITS.check(d(number_digits))?;
                if min_percent > max_percent {
                    return Err(PracticeError::InvalidConfig(format!(
                        "minimum percentage {min_percent} exceeds maximum {max_percent}"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl From<OperationKind> for OperationParams {
    fn from(kind: OperationKind) -> Self {
        OperationParams::defaults(kind)
    }
}

/// Immutable snapshot of everything a session needs, taken at start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub operation: OperationParams,
    pub question_count: u32,
    /// Per-question answer time for every kind except the running-total ones.
    pub time_limit_secs: u32,
    /// Delay between row reveals of a running-total question.
    pub row_interval_ms: u64,
    /// Fixed seed for reproducible batches; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            operation: OperationParams::defaults(OperationKind::AddSub),
            question_count: 10,
            time_limit_secs: 30,
            row_interval_ms: 1000,
            rng_seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(operation: impl Into<OperationParams>) -> Self {
        SessionConfig { operation: operation.into(), ..SessionConfig::default() }
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }

    pub fn row_interval(&self) -> Duration {
        Duration::from_millis(self.row_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        QUESTION_COUNT.check(u64::from(self.question_count))?;
        TIME_LIMIT_SECS.check(u64::from(self.time_limit_secs))?;
        ROW_INTERVAL_MS.check(self.row_interval_ms)?;
        self.operation.validate()
    }

    /// Parse and validate a JSON snapshot; omitted fields take their defaults.
    ///
    /// ```
    /// use mental_drill_gen::{OperationKind, SessionConfig};
    ///
    /// let config = SessionConfig::from_json(
    ///     r#"{ "operation": { "kind": "gcd", "first_digits": 3, "second_digits": 2 },
    ///          "question_count": 5 }"#,
    /// ).unwrap();
    /// assert_eq!(config.kind(), OperationKind::Gcd);
    /// assert_eq!(config.time_limit_secs, 30);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_for_every_kind() {
        for kind in OperationKind::ALL {
            let params = OperationParams::defaults(kind);
            assert_eq!(params.kind(), kind);
            params.validate().unwrap_or_else(|e| panic!("{kind:?}: {e}"));
        }
        SessionConfig::default().validate().unwrap();
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let err = OperationParams::AddSub { digits: 2, rows: 1 }.validate().unwrap_err();
        assert!(matches!(err, PracticeError::ParameterOutOfRange { name: "rows", .. }));

        let err = OperationParams::SquareRoot { digits: 31 }.validate().unwrap_err();
        assert!(matches!(err, PracticeError::ParameterOutOfRange { name: "root digits", .. }));

        OperationParams::DecimalMultiplication { multiplicand_digits: 3, multiplier_digits: 0 }
            .validate()
            .unwrap();

        let config = SessionConfig { question_count: 51, ..SessionConfig::default() };
        assert!(config.validate().is_err());
        let config = SessionConfig { row_interval_ms: 50, ..SessionConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_percentage_range_is_invalid() {
        let err = OperationParams::Percentage { min_percent: 60, max_percent: 40, number_digits: 3 }
            .validate()
            .unwrap_err();
        assert!(matches!(err, PracticeError::InvalidConfig(_)));
    }

    #[test]
    fn json_snapshot_fills_defaults() {
        let config = SessionConfig::from_json(
            r#"{ "operation": { "kind": "percentage", "min_percent": 5, "max_percent": 50, "number_digits": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.kind(), OperationKind::Percentage);
        assert_eq!(config.question_count, 10);
        assert_eq!(config.row_interval(), Duration::from_secs(1));

        assert!(matches!(
            SessionConfig::from_json(r#"{ "operation": { "kind": "nope" } }"#),
            Err(PracticeError::InvalidConfig(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "time_limit_secs": 1 }"#),
            Err(PracticeError::ParameterOutOfRange { .. })
        ));
    }
}
