use rand::Rng;

use crate::practice_engine::{models::QuestionBody, operations::Draw, sampler::DigitRange};

pub fn draw<R: Rng>(rng: &mut R, min_percent: u32, max_percent: u32, number: DigitRange) -> Draw {
    let percentage = rng.gen_range(min_percent..=max_percent);
    QuestionBody::Percentage { number: number.sample(rng), percentage }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn percentage_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let Draw::Ready(QuestionBody::Percentage { number, percentage }) =
                draw(&mut rng, 10, 25, DigitRange::for_digits(3))
            else {
                unreachable!();
            };
            assert!((10..=25).contains(&percentage));
            assert!((100..=999).contains(&number));
        }
    }
}
