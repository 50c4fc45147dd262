//! Exact division: the dividend is built as `divisor × quotient`, so the
//! answer is always a whole number and the dividend keeps its digit width.

use rand::Rng;

use crate::practice_engine::{
    models::QuestionBody,
    operations::Draw,
    sampler::DigitRange,
};

/// Quotients that keep `divisor × q` inside the dividend range.
pub fn quotient_range(dividend: DigitRange, divisor: u128) -> DigitRange {
    DigitRange::new(dividend.lo.div_ceil(divisor), dividend.hi / divisor)
}

/// Reject ranges where no divisor can ever fit into a dividend.
pub fn check_feasible(dividend: DigitRange, divisor: DigitRange) -> Result<(), String> {
    if divisor.lo > dividend.hi {
        return Err(format!(
            "the smallest divisor ({}) is larger than the largest dividend ({})",
            divisor.lo, dividend.hi
        ));
    }
    Ok(())
}

pub fn draw<R: Rng>(rng: &mut R, dividend: DigitRange, divisor: DigitRange) -> Draw {
    let d = divisor.sample(rng);
    let quotients = quotient_range(dividend, d);
    if quotients.is_empty() {
        return Draw::Retry("empty quotient range");
    }
    let quotient = quotients.sample(rng);
    QuestionBody::Division { dividend: d * quotient, divisor: d }.into()
}
