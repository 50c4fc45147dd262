//! Core practice engine: question generation, the timed session and scoring.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: operation kinds, operands, questions, generation requests |
//! | `config`     | Per-kind parameters and the session configuration, with bounds checks |
//! | `error`      | `PracticeError` and the crate `Result` alias |
//! | `arithmetic` | Exact answer computation, GCD/LCM, integer roots, answer tolerance |
//! | `sampler`    | Inclusive digit-count ranges and uniform draws |
//! | `helpers`    | Shared text builders: row text, number formatting, answer parsing |
//! | `operations` | One generator per problem family |
//! | `generator`  | Single entry point `generate_questions()`, bounded retries |
//! | `clock`      | Virtual-time timer slots with stale-event detection |
//! | `session`    | The session state machine: countdown, reveal, answer window, scoring |
//! | `results`    | Result entries, performance tiers, the final summary |

pub mod arithmetic;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod operations;
pub mod results;
pub mod sampler;
pub mod session;

pub use config::{OperationParams, SessionConfig};
pub use error::{PracticeError, Result};
pub use generator::{generate_any, generate_questions};
pub use models::{
    Fixed, GenerationRequest, OperationKind, Question, QuestionBatch, QuestionBody, RowOp,
};
pub use results::{PerformanceTier, ResultEntry, ResultLine, Summary};
pub use session::{Phase, Rejection, SessionMachine, SessionSnapshot, SubmitOutcome};
