use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::practice_engine::{
    config::{OperationParams, QUESTION_COUNT},
    error::{PracticeError, Result},
    models::{GenerationRequest, OperationKind, Question, QuestionBatch, QuestionBody},
    operations::{self, decimal, division, number_theory, percentage, roots, running_total, Draw},
    sampler::DigitRange,
};

/// Draws allowed per question before the configuration is declared infeasible.
pub const MAX_DRAW_ATTEMPTS: u32 = 1000;

/// Generate a batch id from kind + RNG.
fn make_batch_id(kind: OperationKind, rng: &mut impl RngCore) -> String {
    format!("{}-{:08X}", kind.batch_prefix(), rng.next_u32())
}

/// A per-question draw function, fixed once the parameters are checked.
type Drawer = Box<dyn Fn(&mut StdRng) -> Draw>;

/// Validate `params` and bind them into a drawer.
///
/// Feasibility problems that no amount of re-drawing can fix (an empty root
/// range, a divisor that can never fit) are reported here, before any
/// question is drawn.
fn drawer_for(params: OperationParams) -> Result<Drawer> {
    params.validate()?;
    let kind = params.kind();
    let infeasible = |reason: String| PracticeError::ConfigurationInfeasible { kind, reason };
    let digits = DigitRange::for_digits;

    let drawer: Drawer = match params {
        OperationParams::Multiplication { multiplicand_digits, multiplier_digits } => {
            let (a, b) = (digits(multiplicand_digits), digits(multiplier_digits));
            Box::new(move |rng: &mut StdRng| operations::multiplication::draw(rng, a, b))
        }
        OperationParams::Division { dividend_digits, divisor_digits } => {
            let (dividend, divisor) = (digits(dividend_digits), digits(divisor_digits));
            division::check_feasible(dividend, divisor).map_err(infeasible)?;
            Box::new(move |rng: &mut StdRng| division::draw(rng, dividend, divisor))
        }
        OperationParams::AddSub { digits: d, rows } => {
            let range = digits(d);
            Box::new(move |rng: &mut StdRng| running_total::draw_non_negative(rng, range, rows))
        }
        OperationParams::IntegerAddSub { digits: d, rows } => {
            let range = digits(d);
            Box::new(move |rng: &mut StdRng| running_total::draw_signed(rng, range, rows))
        }
        OperationParams::DecimalMultiplication { multiplicand_digits, multiplier_digits } => {
            Box::new(move |rng: &mut StdRng| {
                decimal::draw_multiplication(rng, multiplicand_digits, multiplier_digits)
            })
        }
        OperationParams::DecimalDivision { dividend_digits, divisor_digits } => {
            let (dividend, divisor) = (digits(dividend_digits), digits(divisor_digits));
            Box::new(move |rng: &mut StdRng| decimal::draw_division(rng, dividend, divisor))
        }
        OperationParams::Lcm { first_digits, second_digits } => {
            let (a, b) = (digits(first_digits), digits(second_digits));
            Box::new(move |rng: &mut StdRng| number_theory::draw_lcm(rng, a, b))
        }
        OperationParams::Gcd { first_digits, second_digits } => {
            let (a, b) = (digits(first_digits), digits(second_digits));
            Box::new(move |rng: &mut StdRng| number_theory::draw_gcd(rng, a, b))
        }
        OperationParams::SquareRoot { digits: d } => {
            let range = roots::root_range(d, 2).map_err(infeasible)?;
            Box::new(move |rng: &mut StdRng| roots::draw_square(rng, range))
        }
        OperationParams::CubeRoot { digits: d } => {
            let range = roots::root_range(d, 3).map_err(infeasible)?;
            Box::new(move |rng: &mut StdRng| roots::draw_cube(rng, range))
        }
        OperationParams::Percentage { min_percent, max_percent, number_digits } => {
            let number = digits(number_digits);
            Box::new(move |rng: &mut StdRng| percentage::draw(rng, min_percent, max_percent, number))
        }
    };
    Ok(drawer)
}

/// Generate `request.count` questions with ids `1..=count`.
///
/// Invalid draws are retried internally; a question that still fails after
/// [`MAX_DRAW_ATTEMPTS`] draws makes the whole request
/// [`PracticeError::ConfigurationInfeasible`].
pub fn generate_questions(request: GenerationRequest) -> Result<QuestionBatch> {
    QUESTION_COUNT.check(u64::from(request.count))?;
    let kind = request.params.kind();
    let draw = drawer_for(request.params)?;

    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let batch_id = make_batch_id(kind, &mut rng);

    let mut questions = Vec::with_capacity(request.count as usize);
    for id in 1..=request.count {
        let body = draw_until_ready(&draw, &mut rng, kind)?;
        questions.push(Question::new(id, body));
    }

    debug!(%batch_id, %kind, count = questions.len(), "generated question batch");
    Ok(QuestionBatch { batch_id, kind, questions })
}

fn draw_until_ready(draw: &Drawer, rng: &mut StdRng, kind: OperationKind) -> Result<QuestionBody> {
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        match draw(rng) {
            Draw::Ready(body) => return Ok(body),
            Draw::Retry(reason) => debug!(%kind, attempt, reason, "redrawing question"),
        }
    }
    Err(PracticeError::ConfigurationInfeasible {
        kind,
        reason: format!("no valid question after {MAX_DRAW_ATTEMPTS} attempts"),
    })
}

/// Convenience: a seeded draw of a single random kind with default parameters.
pub fn generate_any(count: u32, rng_seed: Option<u64>) -> Result<QuestionBatch> {
    let mut rng: StdRng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    let kind = OperationKind::ALL[rng.gen_range(0..OperationKind::ALL.len())];
    generate_questions(GenerationRequest {
        params: kind.into(),
        count,
        rng_seed: Some(rng.next_u64()),
    })
}
