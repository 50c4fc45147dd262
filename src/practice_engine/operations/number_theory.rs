use rand::Rng;

use crate::practice_engine::{models::QuestionBody, operations::Draw, sampler::DigitRange};

pub fn draw_lcm<R: Rng>(rng: &mut R, first: DigitRange, second: DigitRange) -> Draw {
    QuestionBody::Lcm { first: first.sample(rng), second: second.sample(rng) }.into()
}

pub fn draw_gcd<R: Rng>(rng: &mut R, first: DigitRange, second: DigitRange) -> Draw {
    QuestionBody::Gcd { first: first.sample(rng), second: second.sample(rng) }.into()
}
