//! JSON-RPC quote service client.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use mintbatch_core::{BatchError, Call, Quote, Result, SwapPlan, Token};
use mintbatch_planner::{QuoteRequest, QuoteService};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// JSON-RPC method that prices and builds a swap.
pub const SWAP_TRADE_METHOD: &str = "cdp_getSwapTrade";

/// Configuration for [`JsonRpcQuoteService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteClientConfig {
    /// Full URL of the JSON-RPC endpoint, API key included.
    pub endpoint: String,
}

impl QuoteClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

/// [`QuoteService`] backed by a swap-trade JSON-RPC endpoint.
#[derive(Clone)]
pub struct JsonRpcQuoteService {
    /// JSON-RPC endpoint.
    endpoint: String,

    /// HTTP client.
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: [P; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapTradeParams {
    from_address: Address,
    from: String,
    to: String,
    amount: String,
    amount_reference: &'static str,
    v2_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Swap trade as returned by the endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapTrade {
    approve_tx: Option<RawTransaction>,
    tx: RawTransaction,
    quote: RawQuote,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    to: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    from: RawToken,
    to: RawToken,
    from_amount: String,
    to_amount: String,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    address: String,
    decimals: u8,
    symbol: String,
}

impl JsonRpcQuoteService {
    /// Create a client for the configured endpoint.
    pub fn new(config: QuoteClientConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_client(config: QuoteClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: config.endpoint,
            http_client,
        }
    }
}

#[async_trait]
impl QuoteService for JsonRpcQuoteService {
    async fn quote(&self, request: &QuoteRequest) -> Result<SwapPlan> {
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: SWAP_TRADE_METHOD,
            params: [swap_trade_params(request)],
        };
        debug!(
            "Requesting swap {} -> {} for {} ({})",
            request.spend_token.symbol,
            request.receive_token.symbol,
            request.amount,
            request.amount_reference.as_str()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| BatchError::quote_unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Quote endpoint returned {}: {}", status, error_text);
            return Err(BatchError::quote_unavailable(format!(
                "quote endpoint returned {status}: {error_text}"
            )));
        }

        let response: JsonRpcResponse<SwapTrade> = response
            .json()
            .await
            .map_err(|e| BatchError::quote_unavailable(format!("invalid response body: {e}")))?;

        parse_response(response)
    }
}

fn swap_trade_params(request: &QuoteRequest) -> SwapTradeParams {
    SwapTradeParams {
        from_address: request.taker,
        from: token_address(&request.spend_token),
        to: token_address(&request.receive_token),
        amount: request.amount.to_string(),
        amount_reference: request.amount_reference.as_str(),
        v2_enabled: !request.use_aggregator,
    }
}

/// The endpoint denotes the native asset with an empty address.
fn token_address(token: &Token) -> String {
    if token.is_native() {
        String::new()
    } else {
        token.address.to_string()
    }
}

fn parse_response(response: JsonRpcResponse<SwapTrade>) -> Result<SwapPlan> {
    if let Some(error) = response.error {
        warn!("Quote endpoint error {}: {}", error.code, error.message);
        return Err(BatchError::quote_unavailable(format!(
            "{} (code {})",
            error.message, error.code
        )));
    }

    let trade = response
        .result
        .ok_or_else(|| BatchError::quote_unavailable("response has neither result nor error"))?;

    into_swap_plan(trade)
}

fn into_swap_plan(trade: SwapTrade) -> Result<SwapPlan> {
    let approve_transaction = match trade.approve_tx {
        Some(tx) if !is_empty_hex(&tx.data) => Some(into_call(tx)?),
        _ => None,
    };

    Ok(SwapPlan {
        approve_transaction,
        transaction: into_call(trade.tx)?,
        quote: Quote {
            from_amount: parse_amount(&trade.quote.from_amount)?,
            to_amount: parse_amount(&trade.quote.to_amount)?,
            from_token: into_token(trade.quote.from)?,
            to_token: into_token(trade.quote.to)?,
        },
    })
}

fn into_call(tx: RawTransaction) -> Result<Call> {
    let to = parse_address(&tx.to)?;
    let data = if is_empty_hex(&tx.data) {
        Bytes::new()
    } else {
        Bytes::from_str(&tx.data)
            .map_err(|e| BatchError::quote_unavailable(format!("invalid calldata: {e}")))?
    };
    Ok(Call::new(to, data, parse_amount(&tx.value)?))
}

fn into_token(token: RawToken) -> Result<Token> {
    Ok(Token {
        address: parse_address(&token.address)?,
        decimals: token.decimals,
        symbol: token.symbol,
    })
}

fn parse_address(value: &str) -> Result<Address> {
    if value.is_empty() {
        return Ok(Address::ZERO);
    }
    Address::from_str(value)
        .map_err(|e| BatchError::quote_unavailable(format!("invalid address {value:?}: {e}")))
}

/// Accepts decimal or `0x`-prefixed hex; empty means zero.
fn parse_amount(value: &str) -> Result<U256> {
    if value.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str(value)
        .map_err(|e| BatchError::quote_unavailable(format!("invalid amount {value:?}: {e}")))
}

fn is_empty_hex(value: &str) -> bool {
    value.is_empty() || value == "0x"
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use mintbatch_core::{AmountReference, BatchConfig, TokenApproval};
    use serde_json::json;

    const WALLET: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

    fn trade_json(approve_tx: serde_json::Value) -> serde_json::Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "approveTx": approve_tx,
                "chainId": "8453",
                "tx": {
                    "data": "0x3593564c0001",
                    "from": "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
                    "gas": "210000",
                    "gasPrice": "1000000",
                    "to": "0x6fF5693b99212Da76ad316178A184AB56D299b43",
                    "value": "0"
                },
                "quote": {
                    "amountReference": "to",
                    "from": {
                        "address": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913",
                        "chainId": 8453,
                        "decimals": 6,
                        "image": "",
                        "name": "USDC",
                        "symbol": "USDC"
                    },
                    "to": {
                        "address": "",
                        "chainId": 8453,
                        "decimals": 18,
                        "image": "",
                        "name": "ETH",
                        "symbol": "ETH"
                    },
                    "fromAmount": "3000000",
                    "toAmount": "111000000000000",
                    "slippage": "3"
                }
            }
        })
    }

    fn parse(value: serde_json::Value) -> Result<SwapPlan> {
        parse_response(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_parse_trade_with_approval() {
        let approval = TokenApproval::new(
            address!("000000000022D473030F116dDEE9F6B43aC78BA3"),
            U256::from(3_000_000u64),
        );
        let plan = parse(trade_json(json!({
            "data": format!("0x{}", alloy_primitives::hex::encode(approval.encode())),
            "to": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913",
            "value": "0"
        })))
        .unwrap();

        let approve = plan.approve_transaction.unwrap();
        assert_eq!(TokenApproval::decode(&approve.data).unwrap(), approval);
        assert_eq!(plan.quote.from_amount, U256::from(3_000_000u64));
        assert_eq!(plan.quote.to_amount, U256::from(111_000_000_000_000u64));
        assert!(plan.quote.to_token.is_native());
        assert_eq!(plan.quote.from_token.decimals, 6);
        assert_eq!(
            plan.transaction.to,
            address!("6fF5693b99212Da76ad316178A184AB56D299b43")
        );
        assert_eq!(plan.transaction.value, U256::ZERO);
    }

    #[test]
    fn test_parse_trade_without_approval() {
        let plan = parse(trade_json(serde_json::Value::Null)).unwrap();
        assert!(plan.approve_transaction.is_none());
    }

    #[test]
    fn test_empty_approval_data_is_no_approval() {
        let plan = parse(trade_json(json!({
            "data": "0x",
            "to": "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913",
            "value": "0"
        })))
        .unwrap();
        assert!(plan.approve_transaction.is_none());
    }

    #[test]
    fn test_parse_rpc_error() {
        let result = parse(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "insufficient liquidity" }
        }));

        match result {
            Err(BatchError::QuoteUnavailable { message }) => {
                assert!(message.contains("insufficient liquidity"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_response() {
        let result = parse(json!({ "jsonrpc": "2.0", "id": 1 }));
        assert!(matches!(result, Err(BatchError::QuoteUnavailable { .. })));
    }

    #[test]
    fn test_parse_bad_amount() {
        let mut body = trade_json(serde_json::Value::Null);
        body["result"]["quote"]["fromAmount"] = json!("three million");
        assert!(matches!(parse(body), Err(BatchError::QuoteUnavailable { .. })));
    }

    #[test]
    fn test_request_params() {
        let config = BatchConfig::default();
        let request = QuoteRequest {
            taker: WALLET,
            spend_token: config.spend_token.clone(),
            receive_token: config.receive_token.clone(),
            amount: U256::from(111_000_000_000_000u64),
            amount_reference: AmountReference::To,
            use_aggregator: false,
        };

        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: SWAP_TRADE_METHOD,
            params: [swap_trade_params(&request)],
        };
        let json = serde_json::to_value(&body).unwrap();
        let params = &json["params"][0];

        assert_eq!(json["method"], "cdp_getSwapTrade");
        assert_eq!(params["to"], "");
        assert_eq!(params["amount"], "111000000000000");
        assert_eq!(params["amountReference"], "to");
        assert_eq!(params["v2Enabled"], true);
        assert_eq!(
            params["from"].as_str().unwrap().to_lowercase(),
            "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
        );
    }
}
