//! Upstream services the batch builder consumes.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use mintbatch_core::{AmountReference, MintPlan, Result, SwapPlan, Token};
use serde::{Deserialize, Serialize};

/// Request for a mint call plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    /// The edition contract.
    pub contract_address: Address,

    /// Number of editions to mint.
    pub quantity: u64,

    /// Account that mints and receives the editions.
    pub minter: Address,

    /// Token id of the edition.
    pub token_id: U256,
}

/// Request for an executable swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Account the swap is executed from.
    pub taker: Address,

    /// Token to spend.
    pub spend_token: Token,

    /// Token to receive.
    pub receive_token: Token,

    /// Amount of the fixed side, in its smallest unit.
    pub amount: U256,

    /// Which side `amount` refers to.
    pub amount_reference: AmountReference,

    /// Allow routing through an aggregator.
    pub use_aggregator: bool,
}

/// Plans mint calls against the edition contract.
///
/// Implementations simulate the call before returning it and report any
/// rejection (sold out, revert) as `MintUnavailable`.
#[async_trait]
pub trait MintPlanner: Send + Sync {
    async fn plan(&self, request: &MintRequest) -> Result<MintPlan>;
}

/// Prices and builds swaps.
///
/// Implementations report every failure as `QuoteUnavailable`.
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<SwapPlan>;
}
