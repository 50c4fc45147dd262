use rand::Rng;
use tracing::warn;

use crate::practice_engine::{
    models::{Fixed, QuestionBody},
    operations::Draw,
    sampler::{decimal_digit, DigitRange},
};

/// Resampling budget for a dividend that is not a multiple of the divisor.
pub const INEXACT_DIVIDEND_ATTEMPTS: u32 = 100;

/// Range of the whole-number multiplier used when its digit count is zero.
const WHOLE_MULTIPLIER: DigitRange = DigitRange { lo: 1, hi: 99 };

fn one_decimal<R: Rng>(rng: &mut R, whole: DigitRange) -> Fixed {
    let w = whole.sample(rng);
    Fixed::tenths(w, decimal_digit(rng))
}

/// `multiplier_digits == 0` yields a whole-number multiplier.
pub fn draw_multiplication<R: Rng>(
    rng: &mut R,
    multiplicand_digits: u32,
    multiplier_digits: u32,
) -> Draw {
    let multiplicand = one_decimal(rng, DigitRange::for_digits(multiplicand_digits));
    let multiplier = match multiplier_digits {
        0 => Fixed::whole(WHOLE_MULTIPLIER.sample(rng)),
        d => one_decimal(rng, DigitRange::for_digits(d)),
    };
    QuestionBody::DecimalMultiplication { multiplicand, multiplier }.into()
}

/// Whole-number operands whose quotient is (almost always) not an integer.
pub fn draw_division<R: Rng>(rng: &mut R, dividend: DigitRange, divisor: DigitRange) -> Draw {
    let d = divisor.sample(rng);
    let mut n = dividend.sample(rng);
    let mut attempts = 1;
    while n % d == 0 && attempts < INEXACT_DIVIDEND_ATTEMPTS {
        n = dividend.sample(rng);
        attempts += 1;
    }
    if n % d == 0 {
        warn!(dividend = %n, divisor = %d, "no inexact dividend found, keeping exact division");
    }
    QuestionBody::DecimalDivision { dividend: n, divisor: d }.into()
}
