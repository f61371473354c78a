//! Batch builder: turns a mint intent into an ordered, atomically executable
//! list of calls.
//!
//! The produced order is load-bearing:
//!
//! 1. ERC-20 `approve` of the spend token (only if the quote asks for one)
//! 2. Permit2 `approve` granting the router that allowance (only after 1)
//! 3. the swap, which leaves the wallet holding the native mint price
//! 4. the mint, which spends it

use std::sync::Arc;

use alloy_primitives::{hex, Address, U256};
use mintbatch_core::amount::{apply_buffer, buffer, required_native_amount};
use mintbatch_core::{
    AbiCodec, AllowanceGrant, AmountReference, Batch, BatchConfig, BatchError, CalldataCodec,
    Call, MintIntent, MintPlan, Quote, Result, TokenApproval,
};
use tracing::{debug, error, info, warn};

use crate::services::{MintPlanner, MintRequest, QuoteRequest, QuoteService};

/// Builds swap-then-mint batches.
///
/// Holds no per-request state, so one builder can serve any number of
/// concurrent builds.
#[derive(Clone)]
pub struct BatchBuilder {
    config: BatchConfig,
    quotes: Arc<dyn QuoteService>,
    mints: Arc<dyn MintPlanner>,
    codec: Arc<dyn CalldataCodec>,
}

impl BatchBuilder {
    /// Create a new builder with the default configuration.
    pub fn new(quotes: Arc<dyn QuoteService>, mints: Arc<dyn MintPlanner>) -> Self {
        Self::with_config(BatchConfig::default(), quotes, mints)
    }

    /// Create a new builder with a custom configuration.
    pub fn with_config(
        config: BatchConfig,
        quotes: Arc<dyn QuoteService>,
        mints: Arc<dyn MintPlanner>,
    ) -> Self {
        Self {
            config,
            quotes,
            mints,
            codec: Arc::new(AbiCodec::new()),
        }
    }

    /// Replace the calldata codec.
    pub fn with_codec(mut self, codec: Arc<dyn CalldataCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// Get the builder configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Build the batch for `quantity` editions minted by `wallet`.
    pub async fn build_batch(&self, wallet: Address, quantity: u64) -> Result<Batch> {
        self.build(&MintIntent { wallet, quantity }).await
    }

    /// Build the batch for a mint intent.
    ///
    /// Either every call is assembled or an error is returned; there is no
    /// partial batch.
    pub async fn build(&self, intent: &MintIntent) -> Result<Batch> {
        intent.validate()?;
        self.config.validate()?;

        let required = required_native_amount(self.config.unit_price_wei, intent.quantity)?;
        info!(
            "Building mint batch for {} x{} (needs {} wei)",
            intent.wallet, intent.quantity, required
        );

        // The planner is asked first so that a sold-out edition never costs a
        // quote request.
        let mint_plan = self
            .mints
            .plan(&MintRequest {
                contract_address: self.config.mint_contract,
                quantity: intent.quantity,
                minter: intent.wallet,
                token_id: self.config.token_id,
            })
            .await
            .map_err(|e| {
                error!(
                    "Mint planning failed for {} ({}): {}",
                    intent.wallet,
                    e.kind(),
                    e
                );
                into_mint_unavailable(e)
            })?;

        let swap_plan = self
            .quotes
            .quote(&QuoteRequest {
                taker: intent.wallet,
                spend_token: self.config.spend_token.clone(),
                receive_token: self.config.receive_token.clone(),
                amount: required,
                amount_reference: AmountReference::To,
                use_aggregator: self.config.use_aggregator,
            })
            .await
            .map_err(|e| {
                error!("Quote failed for {} ({}): {}", intent.wallet, e.kind(), e);
                into_quote_unavailable(e)
            })?;

        debug!(
            "Quote: {} {} -> {} {} (approval required: {})",
            swap_plan.quote.from_amount,
            swap_plan.quote.from_token.symbol,
            swap_plan.quote.to_amount,
            swap_plan.quote.to_token.symbol,
            swap_plan.requires_approval()
        );

        let mut calls = Vec::with_capacity(4);

        if let Some(approve_tx) = &swap_plan.approve_transaction {
            let [approve, grant] = self.allowance_calls(approve_tx, &swap_plan.quote)?;
            calls.push(approve);
            calls.push(grant);
        }

        calls.push(swap_plan.transaction.clone());
        calls.push(self.mint_call(&mint_plan)?);

        let batch = Batch::new(calls).with_paymaster_url(self.config.paymaster_url.clone());
        info!(
            "Built batch {} with {} calls for {} (value {} wei)",
            batch.id,
            batch.len(),
            intent.wallet,
            batch.total_value()
        );

        Ok(batch)
    }

    /// Resize the upstream approval by the allowance buffer and pair it with
    /// the Permit2 grant for the router.
    fn allowance_calls(&self, approve_tx: &Call, quote: &Quote) -> Result<[Call; 2]> {
        let approval = TokenApproval::decode(&approve_tx.data).inspect_err(|e| {
            warn!(
                "Rejecting approval transaction to {} (selector {:?}, {}): {}",
                approve_tx.to,
                approve_tx.selector().map(hex::encode),
                e.kind(),
                e
            );
        })?;

        let percent = self.config.allowance_buffer_percent;
        let final_amount = apply_buffer(approval.amount, quote.from_amount, percent)?;

        // The router pulls from_amount through both allowances.
        if final_amount < quote.from_amount {
            let err = BatchError::malformed_approval(format!(
                "approval of {} cannot cover quoted spend of {}",
                final_amount, quote.from_amount
            ));
            warn!(
                "Rejecting approval transaction to {} ({}): {}",
                approve_tx.to,
                err.kind(),
                err
            );
            return Err(err);
        }
        debug!(
            "Approval for {}: {} + {} buffer = {}",
            approval.spender,
            approval.amount,
            buffer(quote.from_amount, percent),
            final_amount
        );

        let approve = Call::new(
            approve_tx.to,
            approval.with_amount(final_amount).encode(),
            approve_tx.value,
        );

        let grant = AllowanceGrant::new(
            quote.from_token.address,
            self.config.router,
            final_amount,
            self.config.allowance_expiration,
        )?;
        let grant = Call::new(self.config.allowance_bridge, grant.encode(), U256::ZERO);

        Ok([approve, grant])
    }

    fn mint_call(&self, plan: &MintPlan) -> Result<Call> {
        if plan.call.address != plan.contract_address {
            warn!(
                "Mint plan describes a call to {} but targets {}",
                plan.call.address, plan.contract_address
            );
        }
        // Payment is expected to arrive through the swap; a non-zero value
        // means the planner changed how funds reach the mint contract.
        if !plan.value.is_zero() {
            warn!("Mint plan attaches {} wei to the mint call", plan.value);
        }

        let data = self
            .codec
            .encode(&plan.call.abi, &plan.call.function_name, &plan.call.args)?;

        Ok(Call::new(plan.contract_address, data, plan.value))
    }
}

fn into_mint_unavailable(err: BatchError) -> BatchError {
    match err {
        BatchError::MintUnavailable { .. } => err,
        other => BatchError::mint_unavailable(other.to_string()),
    }
}

fn into_quote_unavailable(err: BatchError) -> BatchError {
    match err {
        BatchError::QuoteUnavailable { .. } => err,
        other => BatchError::quote_unavailable(other.to_string()),
    }
}
