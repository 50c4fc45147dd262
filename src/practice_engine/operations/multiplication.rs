use rand::Rng;

use crate::practice_engine::{
    models::QuestionBody,
    operations::Draw,
    sampler::DigitRange,
};

pub fn draw<R: Rng>(rng: &mut R, multiplicand: DigitRange, multiplier: DigitRange) -> Draw {
    QuestionBody::Multiplication {
        multiplicand: multiplicand.sample(rng),
        multiplier: multiplier.sample(rng),
    }
    .into()
}
