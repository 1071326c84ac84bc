//! JSON-RPC 2.0 wire types for the Solana methods used by the quoter

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `{ context: { slot }, value }` envelope returned by most account methods
#[derive(Debug, Deserialize)]
pub struct RpcContextResult<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

/// Account as returned with `encoding: "base64"`; `data` is `[payload, encoding]`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiAccount {
    pub data: Vec<String>,
    #[serde(default)]
    pub lamports: u64,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub executable: bool,
}

/// `value` of `getTokenAccountBalance`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiTokenAmount {
    pub amount: String,
    pub decimals: u8,
    #[serde(default)]
    pub ui_amount_string: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_account_info() {
        let raw = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "context": { "slot": 341197053 },
                "value": {
                    "data": ["AQID", "base64"],
                    "executable": false,
                    "lamports": 6124800,
                    "owner": "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8",
                    "rentEpoch": 18446744073709551615u64,
                    "space": 3
                }
            }
        });

        let response: RpcResponse<RpcContextResult<Option<UiAccount>>> =
            serde_json::from_value(raw).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result.context.slot, 341197053);
        let account = result.value.unwrap();
        assert_eq!(account.data, vec!["AQID".to_string(), "base64".to_string()]);
        assert_eq!(account.lamports, 6124800);
    }

    #[test]
    fn test_deserialize_error() {
        let raw = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param: could not find account" }
        });

        let response: RpcResponse<Value> = serde_json::from_value(raw).unwrap();
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
    }

    #[test]
    fn test_deserialize_token_amount() {
        let raw = json!({
            "context": { "slot": 1 },
            "value": {
                "amount": "9864",
                "decimals": 2,
                "uiAmount": 98.64,
                "uiAmountString": "98.64"
            }
        });

        let result: RpcContextResult<UiTokenAmount> = serde_json::from_value(raw).unwrap();
        assert_eq!(result.value.amount, "9864");
        assert_eq!(result.value.ui_amount_string.as_deref(), Some("98.64"));
    }
}
