//! Typed models of the two allowance calls a swap batch may need.
//!
//! [`TokenApproval`] is the standard ERC-20 `approve(address,uint256)` that a
//! quote service hands back when the spend token lacks an allowance.
//! [`AllowanceGrant`] is the Permit2 `approve` that lets a router draw on that
//! allowance without a per-transaction signature.

use alloy_primitives::aliases::{U160, U48};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::{BatchError, Result};

sol! {
    /// ERC-20 approval, as defined by EIP-20.
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    /// Permit2 allowance transfer approval.
    interface IAllowanceTransfer {
        function approve(address token, address spender, uint160 amount, uint48 expiration) external;
    }
}

/// An ERC-20 `approve(spender, amount)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenApproval {
    pub spender: Address,
    pub amount: U256,
}

impl TokenApproval {
    /// Selector of `approve(address,uint256)`.
    pub const SELECTOR: [u8; 4] = IERC20::approveCall::SELECTOR;

    pub fn new(spender: Address, amount: U256) -> Self {
        Self { spender, amount }
    }

    /// Decode calldata that must be a standard token approval.
    ///
    /// Anything else, including non-canonical encodings, is rejected.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let call = IERC20::approveCall::abi_decode_validate(data).map_err(|e| {
            BatchError::malformed_approval(format!("not an ERC-20 approve call: {e}"))
        })?;

        Ok(Self {
            spender: call.spender,
            amount: call.amount,
        })
    }

    /// Same spender, different amount.
    pub fn with_amount(self, amount: U256) -> Self {
        Self { amount, ..self }
    }

    pub fn encode(&self) -> Bytes {
        IERC20::approveCall {
            spender: self.spender,
            amount: self.amount,
        }
        .abi_encode()
        .into()
    }
}

/// A Permit2 `approve(token, spender, amount, expiration)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceGrant {
    pub token: Address,
    pub spender: Address,
    pub amount: U160,
    pub expiration: U48,
}

impl AllowanceGrant {
    /// Build a grant, narrowing the amount to uint160 and the expiration to
    /// uint48.
    pub fn new(token: Address, spender: Address, amount: U256, expiration: u64) -> Result<Self> {
        if amount.bit_len() > 160 {
            return Err(BatchError::malformed_approval(format!(
                "allowance {amount} does not fit in uint160"
            )));
        }
        if expiration >> 48 != 0 {
            return Err(BatchError::malformed_approval(format!(
                "expiration {expiration} does not fit in uint48"
            )));
        }

        let amount_bytes = amount.to_be_bytes::<32>();
        let expiration_bytes = expiration.to_be_bytes();

        Ok(Self {
            token,
            spender,
            amount: U160::from_be_slice(&amount_bytes[12..]),
            expiration: U48::from_be_slice(&expiration_bytes[2..]),
        })
    }

    pub fn encode(&self) -> Bytes {
        IAllowanceTransfer::approveCall {
            token: self.token,
            spender: self.spender,
            amount: self.amount,
            expiration: self.expiration,
        }
        .abi_encode()
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};

    const ROUTER: Address = address!("3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD");
    const USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

    #[test]
    fn test_approval_selector() {
        assert_eq!(TokenApproval::SELECTOR, hex!("095ea7b3"));
    }

    #[test]
    fn test_approval_reencode_keeps_spender() {
        let original = TokenApproval::new(ROUTER, U256::from(3_000_000u64));
        let decoded = TokenApproval::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);

        let bumped = decoded.with_amount(U256::from(3_450_000u64));
        let redecoded = TokenApproval::decode(&bumped.encode()).unwrap();
        assert_eq!(redecoded.spender, ROUTER);
        assert_eq!(redecoded.amount, U256::from(3_450_000u64));
    }

    #[test]
    fn test_approval_roundtrip_extremes() {
        for amount in [U256::ZERO, U256::from(1u64), U256::MAX] {
            let approval = TokenApproval::new(ROUTER, amount);
            assert_eq!(TokenApproval::decode(&approval.encode()).unwrap().amount, amount);
        }
    }

    #[test]
    fn test_decode_rejects_other_calls() {
        let grant = AllowanceGrant::new(USDC, ROUTER, U256::from(1u64), 1).unwrap();
        let result = TokenApproval::decode(&grant.encode());
        assert!(matches!(result, Err(BatchError::MalformedApproval { .. })));

        let result = TokenApproval::decode(&[]);
        assert!(matches!(result, Err(BatchError::MalformedApproval { .. })));
    }

    #[test]
    fn test_decode_rejects_truncated_calldata() {
        let encoded = TokenApproval::new(ROUTER, U256::from(10u64)).encode();
        let result = TokenApproval::decode(&encoded[..40]);
        assert!(matches!(result, Err(BatchError::MalformedApproval { .. })));
    }

    #[test]
    fn test_allowance_grant_encoding() {
        let grant =
            AllowanceGrant::new(USDC, ROUTER, U256::from(3_450_000u64), 20_000_000_000_000)
                .unwrap();
        let encoded = grant.encode();

        assert_eq!(&encoded[..4], IAllowanceTransfer::approveCall::SELECTOR.as_slice());
        let decoded = IAllowanceTransfer::approveCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.token, USDC);
        assert_eq!(decoded.spender, ROUTER);
        assert_eq!(decoded.amount, U160::from(3_450_000u64));
        assert_eq!(decoded.expiration, U48::from(20_000_000_000_000u64));
    }

    #[test]
    fn test_allowance_grant_rejects_wide_amount() {
        let amount = U256::from(1u64) << 160;
        let result = AllowanceGrant::new(USDC, ROUTER, amount, 1);
        assert!(matches!(result, Err(BatchError::MalformedApproval { .. })));

        let max = (U256::from(1u64) << 160) - U256::from(1u64);
        assert!(AllowanceGrant::new(USDC, ROUTER, max, 1).is_ok());
    }

    #[test]
    fn test_allowance_grant_rejects_wide_expiration() {
        let result = AllowanceGrant::new(USDC, ROUTER, U256::from(1u64), 1 << 48);
        assert!(matches!(result, Err(BatchError::MalformedApproval { .. })));
    }
}
