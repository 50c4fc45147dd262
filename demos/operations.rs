//! One seeded batch per operation kind.
//!
//! Run with: `cargo run --example operations`
//!
//! Every kind is generated with its default parameters and a fixed seed, so
//! the output is deterministic and reproducible. Each line shows the prompt
//! and the exact answer a session would accept (within ±0.01).

use mental_drill_gen::{
    generate_questions, view_adapter, GenerationRequest, OperationKind, OperationParams,
    SessionConfig, SessionMachine,
};

fn print_batch(params: OperationParams, seed: u64) {
    let batch = match generate_questions(GenerationRequest::new(params).with_count(4).with_seed(seed)) {
        Ok(batch) => batch,
        Err(err) => {
            println!("  {}: {err}", params.kind());
            return;
        }
    };
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]  ID: {}", batch.kind, batch.batch_id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for q in &batch.questions {
        println!("  {:>2}. {} = {}", q.id(), q.prompt(), q.answer());
    }
    println!();
}

fn main() {
    for (i, kind) in OperationKind::ALL.into_iter().enumerate() {
        print_batch(kind.into(), 100 + i as u64);
    }

    // Wider operands.
    print_batch(OperationParams::Multiplication { multiplicand_digits: 4, multiplier_digits: 3 }, 1);
    print_batch(OperationParams::DecimalMultiplication { multiplicand_digits: 3, multiplier_digits: 0 }, 2);
    print_batch(OperationParams::IntegerAddSub { digits: 3, rows: 8 }, 3);

    // Rejected before any question is drawn.
    print_batch(OperationParams::Division { dividend_digits: 2, divisor_digits: 4 }, 4);

    // The view state a web client would receive right after start.
    let mut machine = SessionMachine::new();
    let config = SessionConfig { rng_seed: Some(5), ..SessionConfig::new(OperationKind::Lcm) };
    if machine.start(config, "Ada").is_ok() {
        let view = view_adapter::to_view_state(&machine.snapshot());
        match serde_json::to_string_pretty(&view) {
            Ok(text) => println!("{text}"),
            Err(err) => println!("cannot render view state: {err}"),
        }
    }
}
