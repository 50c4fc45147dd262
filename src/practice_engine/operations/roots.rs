//! Perfect squares and cubes of a requested digit width.

use rand::Rng;

use crate::practice_engine::{
    arithmetic::{ceil_root, floor_root},
    models::QuestionBody,
    operations::Draw,
    sampler::DigitRange,
};

/// Integer roots whose `power`-th power has exactly `digits` digits.
pub fn root_range(digits: u32, power: u32) -> Result<DigitRange, String> {
    let target = DigitRange::for_digits(digits);
    let roots = DigitRange::new(ceil_root(target.lo, power), floor_root(target.hi, power));
    if roots.is_empty() {
        return Err(format!(
            "no perfect power of {power} lies between {} and {}",
            target.lo, target.hi
        ));
    }
    Ok(roots)
}

pub fn draw_square<R: Rng>(rng: &mut R, roots: DigitRange) -> Draw {
    let root = roots.sample(rng);
    QuestionBody::SquareRoot { number: root * root }.into()
}

pub fn draw_cube<R: Rng>(rng: &mut R, roots: DigitRange) -> Draw {
    let root = roots.sample(rng);
    QuestionBody::CubeRoot { number: root * root * root }.into()
}
