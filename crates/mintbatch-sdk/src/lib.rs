//! # Mintbatch SDK
//!
//! Client-side adapters around the batch builder: a JSON-RPC quote service
//! and the `wallet_sendCalls` payload handed to batched-execution wallets.

pub mod client;
pub mod submit;

pub use client::{JsonRpcQuoteService, QuoteClientConfig};
pub use submit::{prepare_send_calls, SendCallsRequest};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::client::{JsonRpcQuoteService, QuoteClientConfig};
    pub use crate::submit::{prepare_send_calls, SendCallsRequest};
    pub use mintbatch_core::prelude::*;
    pub use mintbatch_planner::{BatchBuilder, MintPlanner, QuoteService};
}
