//! Deployment configuration for batch construction.

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use crate::amount::DEFAULT_BUFFER_PERCENT;
use crate::error::{BatchError, Result};
use crate::types::Token;

/// Base mainnet chain id.
pub const BASE_CHAIN_ID: u64 = 8453;

/// USDC on Base.
pub const BASE_USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// Uniswap Universal Router on Base.
pub const UNIVERSAL_ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");

/// Permit2, deployed at the same address on every chain.
pub const PERMIT2: Address = address!("000000000022D473030F116dDEE9F6B43aC78BA3");

/// Permit2 allowance expiration far enough out to never lapse in a session.
pub const FAR_FUTURE_EXPIRATION: u64 = 20_000_000_000_000;

/// Configuration for the batch builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Chain the batch is executed on.
    pub chain_id: u64,

    /// The edition contract to mint from.
    pub mint_contract: Address,

    /// Token id of the edition.
    pub token_id: U256,

    /// Protocol-fixed mint price per edition, in wei.
    pub unit_price_wei: U256,

    /// Token the user pays with.
    pub spend_token: Token,

    /// Token the swap produces (the chain's native asset).
    pub receive_token: Token,

    /// Router that executes the swap and pulls the spend token.
    pub router: Address,

    /// Allowance-transfer contract the router draws through.
    pub allowance_bridge: Address,

    /// Expiration written into the allowance grant.
    pub allowance_expiration: u64,

    /// Margin added to the quoted spend amount, in percent.
    pub allowance_buffer_percent: u64,

    /// Let the quote service route through an aggregator.
    pub use_aggregator: bool,

    /// Fee-sponsorship endpoint forwarded with the batch.
    pub paymaster_url: Option<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chain_id: BASE_CHAIN_ID,
            mint_contract: address!("973EfB3D59C2d46FbF1128eE147b737179C4b4C1"),
            token_id: U256::from(3u64),
            unit_price_wei: U256::from(111_000_000_000_000u64),
            spend_token: Token::erc20(BASE_USDC, 6, "USDC"),
            receive_token: Token::native(18, "ETH"),
            router: UNIVERSAL_ROUTER,
            allowance_bridge: PERMIT2,
            allowance_expiration: FAR_FUTURE_EXPIRATION,
            allowance_buffer_percent: DEFAULT_BUFFER_PERCENT,
            use_aggregator: false,
            paymaster_url: None,
        }
    }
}

impl BatchConfig {
    /// Set the fee-sponsorship endpoint.
    pub fn with_paymaster_url(mut self, url: impl Into<String>) -> Self {
        self.paymaster_url = Some(url.into());
        self
    }

    /// Check the configuration for values that can never produce a valid batch.
    pub fn validate(&self) -> Result<()> {
        if self.unit_price_wei.is_zero() {
            return Err(BatchError::invalid_config("unit price must be positive"));
        }
        if self.mint_contract.is_zero() {
            return Err(BatchError::invalid_config("mint contract must be set"));
        }
        if self.spend_token.is_native() {
            return Err(BatchError::invalid_config("spend token must be an ERC-20"));
        }
        if self.allowance_expiration >> 48 != 0 {
            return Err(BatchError::invalid_config(format!(
                "allowance expiration {} does not fit in uint48",
                self.allowance_expiration
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.allowance_buffer_percent, 15);
        assert_eq!(config.spend_token.decimals, 6);
        assert!(config.receive_token.is_native());
    }

    #[test]
    fn test_zero_price_rejected() {
        let config = BatchConfig {
            unit_price_wei: U256::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BatchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_zero_mint_contract_rejected() {
        let config = BatchConfig {
            mint_contract: Address::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BatchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_native_spend_token_rejected() {
        let config = BatchConfig {
            spend_token: Token::native(18, "ETH"),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BatchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_wide_expiration_rejected() {
        let config = BatchConfig {
            allowance_expiration: 1 << 48,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BatchError::InvalidConfig { .. })));
    }

    #[test]
    fn test_config_serde() {
        let config = BatchConfig::default().with_paymaster_url("https://paymaster.example/rpc");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
