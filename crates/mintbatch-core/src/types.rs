//! Common types used across mint batch construction.

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One on-chain contract invocation prepared for inclusion in a batch.
///
/// Serializes in the wallet call format (`0x`-prefixed hex fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Target contract.
    pub to: Address,

    /// Raw calldata.
    pub data: Bytes,

    /// Native value attached to the call, in wei.
    pub value: U256,
}

impl Call {
    /// Create a new call.
    pub fn new(to: Address, data: impl Into<Bytes>, value: U256) -> Self {
        Self {
            to,
            data: data.into(),
            value,
        }
    }

    /// The 4-byte function selector, if the calldata carries one.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// A token that can be spent or received in a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Contract address; the zero address denotes the native asset.
    pub address: Address,

    /// Number of decimals of the smallest unit.
    pub decimals: u8,

    /// Ticker symbol.
    pub symbol: String,
}

impl Token {
    /// Create a new ERC-20 token.
    pub fn erc20(address: Address, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Create the native asset of the chain.
    pub fn native(decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address: Address::ZERO,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Returns true if this is the chain's native asset.
    pub fn is_native(&self) -> bool {
        self.address.is_zero()
    }
}

/// Which side of a swap is held fixed when pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountReference {
    /// The spend amount is fixed; solve for the receive amount.
    From,
    /// The receive amount is fixed; solve for the spend amount.
    To,
}

impl AmountReference {
    /// Wire label used by swap-pricing APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountReference::From => "from",
            AmountReference::To => "to",
        }
    }
}

/// A priced exchange-rate snapshot used to size a swap call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Amount of `from_token` to be spent, in its smallest unit.
    pub from_amount: U256,

    /// Amount of `to_token` to be received, in its smallest unit.
    pub to_amount: U256,

    /// Token being spent.
    pub from_token: Token,

    /// Token being received.
    pub to_token: Token,
}

/// An executable swap returned by the quote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    /// Allowance grant required before the swap, if any.
    pub approve_transaction: Option<Call>,

    /// The swap execution itself.
    pub transaction: Call,

    /// The quote the swap was sized from.
    pub quote: Quote,
}

impl SwapPlan {
    /// Returns true if the spend token needs a prior allowance grant.
    pub fn requires_approval(&self) -> bool {
        self.approve_transaction.is_some()
    }
}

/// A contract call described by interface, function name and arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    /// Contract the call is addressed to.
    pub address: Address,

    /// Interface of the contract.
    pub abi: JsonAbi,

    /// Name of the function to invoke.
    pub function_name: String,

    /// Arguments, in declaration order.
    pub args: Vec<DynSolValue>,
}

/// Parameters for a mint call, pre-simulated against the mint contract.
#[derive(Debug, Clone, PartialEq)]
pub struct MintPlan {
    /// The mint contract.
    pub contract_address: Address,

    /// Description of the mint call.
    pub call: ContractCall,

    /// Native value to attach to the mint call.
    pub value: U256,
}

/// An ordered list of calls intended for atomic execution by a capable wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Identifier used to correlate logs for this build.
    pub id: Uuid,

    /// Calls in execution order.
    pub calls: Vec<Call>,

    /// Fee-sponsorship endpoint passed alongside the batch, uninterpreted.
    pub paymaster_url: Option<String>,
}

impl Batch {
    /// Create a batch from calls in execution order.
    pub fn new(calls: Vec<Call>) -> Self {
        Self {
            id: Uuid::new_v4(),
            calls,
            paymaster_url: None,
        }
    }

    /// Attach a fee-sponsorship endpoint.
    pub fn with_paymaster_url(mut self, url: Option<String>) -> Self {
        self.paymaster_url = url;
        self
    }

    /// Number of calls in the batch.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns true if the batch has no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Total native value carried by all calls.
    pub fn total_value(&self) -> U256 {
        self.calls
            .iter()
            .fold(U256::ZERO, |acc, call| acc.saturating_add(call.value))
    }

    /// Consume the batch and return its calls.
    pub fn into_calls(self) -> Vec<Call> {
        self.calls
    }
}
