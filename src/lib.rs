//! Offline question bank and adaptive practice scheduler for young learners.
//!
//! - [`quiz::bank`] builds a fixed, reproducible catalog of multiple-choice
//!   questions from six puzzle generators driven by one seeded stream.
//! - [`quiz::selector`] ranks the catalog against a learner's history and
//!   picks the next session's questions.
//!
//! Storage, clocks and the user interface are collaborators behind small
//! traits ([`store::KeyValueStore`], [`clock::Clock`]).

pub mod clock;
pub mod config;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod stats;
pub mod store;

pub use error::{GenerateError, StoreError};
pub use quiz::bank::{build_bank, shared_bank, Bank, BankConfig};
pub use quiz::selector::{select_questions, SelectionRequest, SelectionWeights, Selector};
pub use quiz::{Archetype, Category, QuestionItem};
pub use stats::{QuestionStats, SeenList, StatsBook};
