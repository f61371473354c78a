//! # Mintbatch Planner
//!
//! Builds atomic swap-then-mint call batches from mint intents.

pub mod builder;
pub mod services;

pub use builder::BatchBuilder;
pub use services::{MintPlanner, MintRequest, QuoteRequest, QuoteService};
