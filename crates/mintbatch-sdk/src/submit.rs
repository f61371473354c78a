//! `wallet_sendCalls` payloads for batched-execution wallets (EIP-5792).

use alloy_primitives::Address;
use mintbatch_core::{Batch, Call, Result};
use mintbatch_planner::BatchBuilder;
use serde::Serialize;

/// JSON-RPC method wallets expose for atomic call batches.
pub const SEND_CALLS_METHOD: &str = "wallet_sendCalls";

/// Parameters of a `wallet_sendCalls` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCallsRequest {
    pub version: String,

    /// Chain id as a `0x`-prefixed hex quantity.
    pub chain_id: String,

    /// Account that executes the batch.
    pub from: Address,

    /// Calls in execution order.
    pub calls: Vec<Call>,

    #[serde(skip_serializing_if = "Capabilities::is_empty")]
    pub capabilities: Capabilities,
}

/// Wallet capabilities requested alongside the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paymaster_service: Option<PaymasterService>,
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        self.paymaster_service.is_none()
    }
}

/// Fee-sponsorship endpoint for the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymasterService {
    pub url: String,
}

impl SendCallsRequest {
    /// Wrap a built batch for submission from `from` on `chain_id`.
    pub fn new(batch: Batch, from: Address, chain_id: u64) -> Self {
        let capabilities = Capabilities {
            paymaster_service: batch.paymaster_url.clone().map(|url| PaymasterService { url }),
        };

        Self {
            version: "1.0".to_string(),
            chain_id: format!("{chain_id:#x}"),
            from,
            calls: batch.into_calls(),
            capabilities,
        }
    }

    /// The full JSON-RPC request body.
    pub fn to_rpc(&self, id: u64) -> serde_json::Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": SEND_CALLS_METHOD,
            "params": [self],
        })
    }
}

/// Build the batch for `quantity` editions and wrap it for submission.
pub async fn prepare_send_calls(
    builder: &BatchBuilder,
    wallet: Address,
    quantity: u64,
) -> Result<SendCallsRequest> {
    let batch = builder.build_batch(wallet, quantity).await?;
    Ok(SendCallsRequest::new(batch, wallet, builder.config().chain_id))
}
