//! # Mintbatch Core
//!
//! Core primitives for assembling atomic swap-then-mint call batches.
//!
//! This crate provides the fundamental building blocks:
//! - [`Call`] and [`Batch`] - What a batched-execution wallet receives
//! - [`SwapPlan`] and [`MintPlan`] - What the upstream services return
//! - [`MintIntent`] - One user request
//! - [`CalldataCodec`] - ABI encoding of call descriptions
//! - [`BatchError`] - Error taxonomy

pub mod amount;
pub mod approval;
pub mod codec;
pub mod config;
pub mod error;
pub mod intent;
pub mod types;

// Re-exports for convenience
pub use approval::{AllowanceGrant, TokenApproval};
pub use codec::{AbiCodec, CalldataCodec, DecodedCall};
pub use config::BatchConfig;
pub use error::{BatchError, Result};
pub use intent::{MintIntent, MintIntentBuilder};
pub use types::*;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::codec::{AbiCodec, CalldataCodec};
    pub use crate::config::BatchConfig;
    pub use crate::error::{BatchError, Result};
    pub use crate::intent::{MintIntent, MintIntentBuilder};
    pub use crate::types::{AmountReference, Batch, Call, MintPlan, Quote, SwapPlan, Token};
}
