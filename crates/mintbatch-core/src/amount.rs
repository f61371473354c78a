//! Integer amount arithmetic for swap sizing and allowance buffers.
//!
//! Everything here works on [`U256`] in the token's smallest unit. There is no
//! floating-point step anywhere, so the same inputs always yield the same
//! calldata.

use alloy_primitives::U256;

use crate::error::{BatchError, Result};

/// Default allowance margin applied to the quoted spend amount, in percent.
pub const DEFAULT_BUFFER_PERCENT: u64 = 15;

/// `floor(amount * percent / 100)`.
///
/// Computed as `(amount / 100) * percent + (amount % 100) * percent / 100`,
/// which equals the naive formula for every input but never needs more than
/// 256 bits for `percent <= 100`. Larger percentages saturate at `U256::MAX`.
pub fn buffer(amount: U256, percent: u64) -> U256 {
    let hundred = U256::from(100u64);
    let percent = U256::from(percent);

    let whole = (amount / hundred).saturating_mul(percent);
    let rest = (amount % hundred) * percent / hundred;

    whole.saturating_add(rest)
}

/// `base + buffer(quote_amount, percent)`.
///
/// Overflow means the upstream approval amount was nonsensical, so it is
/// reported as a malformed approval.
pub fn apply_buffer(base: U256, quote_amount: U256, percent: u64) -> Result<U256> {
    base.checked_add(buffer(quote_amount, percent)).ok_or_else(|| {
        BatchError::malformed_approval(format!(
            "approved amount {base} plus {percent}% buffer overflows uint256"
        ))
    })
}

/// Native amount needed to mint `quantity` editions at a fixed unit price.
pub fn required_native_amount(unit_price: U256, quantity: u64) -> Result<U256> {
    unit_price.checked_mul(U256::from(quantity)).ok_or_else(|| {
        BatchError::invalid_intent(format!(
            "quantity {quantity} at unit price {unit_price} overflows uint256"
        ))
    })
}
