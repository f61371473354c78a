//! Calldata codec over JSON ABI descriptions.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;

use crate::error::{BatchError, Result};

/// A function call recovered from raw calldata.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// Name of the matched function.
    pub function_name: String,

    /// Decoded arguments, in declaration order.
    pub args: Vec<DynSolValue>,
}

/// Encodes and decodes ABI-described function calls.
pub trait CalldataCodec: Send + Sync {
    /// Encode `function_name(args)` against `abi`, selector included.
    fn encode(&self, abi: &JsonAbi, function_name: &str, args: &[DynSolValue]) -> Result<Bytes>;

    /// Decode raw calldata against `abi` by matching its selector.
    fn decode(&self, abi: &JsonAbi, data: &[u8]) -> Result<DecodedCall>;
}

/// [`CalldataCodec`] backed by `alloy-dyn-abi`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiCodec;

impl AbiCodec {
    /// Create a new codec.
    pub fn new() -> Self {
        Self
    }
}

impl CalldataCodec for AbiCodec {
    fn encode(&self, abi: &JsonAbi, function_name: &str, args: &[DynSolValue]) -> Result<Bytes> {
        let overloads = abi.function(function_name).ok_or_else(|| {
            BatchError::Codec(format!("function {function_name} not found in ABI"))
        })?;

        let mut last_error = None;
        for function in overloads.iter().filter(|f| f.inputs.len() == args.len()) {
            match function.abi_encode_input(args) {
                Ok(calldata) => return Ok(calldata.into()),
                Err(e) => last_error = Some(e.to_string()),
            }
        }

        Err(BatchError::Codec(match last_error {
            Some(e) => format!("arguments do not match {function_name}: {e}"),
            None => format!(
                "no overload of {function_name} takes {} arguments",
                args.len()
            ),
        }))
    }

    fn decode(&self, abi: &JsonAbi, data: &[u8]) -> Result<DecodedCall> {
        if data.len() < 4 {
            return Err(BatchError::Codec(format!(
                "calldata too short for a selector: {} bytes",
                data.len()
            )));
        }
        let (selector, payload) = data.split_at(4);

        let function = abi
            .functions()
            .find(|f| f.selector().as_slice() == selector)
            .ok_or_else(|| {
                BatchError::Codec(format!(
                    "selector 0x{} not found in ABI",
                    alloy_primitives::hex::encode(selector)
                ))
            })?;

        let args = function
            .abi_decode_input(payload)
            .map_err(|e| BatchError::Codec(format!("failed to decode {}: {e}", function.name)))?;

        Ok(DecodedCall {
            function_name: function.name.clone(),
            args,
        })
    }
}

/// Build an ABI from human-readable signatures such as
/// `"function approve(address spender, uint256 amount) returns (bool)"`.
pub fn parse_abi<'a, I>(signatures: I) -> Result<JsonAbi>
where
    I: IntoIterator<Item = &'a str>,
{
    JsonAbi::parse(signatures).map_err(|e| BatchError::Codec(format!("invalid ABI signature: {e}")))
}

/// Build an ABI from its JSON description.
pub fn abi_from_json(json: &str) -> Result<JsonAbi> {
    Ok(serde_json::from_str(json)?)
}
