//! Mint intent and its builder.
//!
//! A MintIntent is what a single user action asks for: "mint `quantity`
//! editions to `wallet`, paying in the spend token".

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};

/// A request to mint editions for a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintIntent {
    /// The wallet that pays, receives the editions and submits the batch.
    pub wallet: Address,

    /// Number of editions to mint.
    pub quantity: u64,
}

/// Builder for creating MintIntents with a fluent API.
#[derive(Debug, Default)]
pub struct MintIntentBuilder {
    wallet: Option<Address>,
    quantity: Option<u64>,
}

impl MintIntentBuilder {
    /// Create a new MintIntentBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minting wallet.
    pub fn wallet(mut self, wallet: Address) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Set the number of editions. Defaults to one.
    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Build and validate the MintIntent.
    pub fn build(self) -> Result<MintIntent> {
        let wallet = self
            .wallet
            .ok_or_else(|| BatchError::invalid_intent("wallet address is required"))?;

        let intent = MintIntent {
            wallet,
            quantity: self.quantity.unwrap_or(1),
        };
        intent.validate()?;
        Ok(intent)
    }
}

impl MintIntent {
    /// Create a new MintIntentBuilder.
    pub fn builder() -> MintIntentBuilder {
        MintIntentBuilder::new()
    }

    /// Validate the intent.
    pub fn validate(&self) -> Result<()> {
        if self.wallet.is_zero() {
            return Err(BatchError::invalid_intent("wallet address cannot be zero"));
        }

        if self.quantity == 0 {
            return Err(BatchError::invalid_intent("quantity must be at least 1"));
        }

        Ok(())
    }
}
