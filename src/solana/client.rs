use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{QuoteError, Result};
use crate::solana::types::{
    RpcContextResult, RpcRequest, RpcResponse, UiAccount, UiTokenAmount, JSONRPC_VERSION,
};

/// Mainnet-beta public RPC endpoint
pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Minimal JSON-RPC 2.0 client over HTTP POST.
///
/// One request per call: no retries, no batching.
pub struct SolanaClient {
    rpc_url: String,
    http: Client,
    next_id: AtomicU64,
}

impl SolanaClient {
    /// Create a new Solana client with the given RPC URL
    pub fn new(rpc_url: &str) -> Self {
        Self::with_http_client(rpc_url, Client::new())
    }

    /// Create a client whose requests time out after `timeout`
    pub fn with_timeout(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::transport(rpc_url, e))?;
        Ok(Self::with_http_client(rpc_url, http))
    }

    fn with_http_client(rpc_url: &str, http: Client) -> Self {
        let rpc_url = if rpc_url.is_empty() { DEFAULT_RPC_URL } else { rpc_url };
        Self {
            rpc_url: rpc_url.to_string(),
            http,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// `getAccountInfo` with base64 encoding; `None` when the account does not exist
    pub async fn get_account_info(&self, address: &str) -> Result<Option<UiAccount>> {
        let result: RpcContextResult<Option<UiAccount>> = self
            .send("getAccountInfo", json!([address, { "encoding": "base64" }]))
            .await?;
        Ok(result.value)
    }

    /// `getMultipleAccounts` with base64 encoding, in request order
    pub async fn get_multiple_accounts(&self, addresses: &[String]) -> Result<Vec<Option<UiAccount>>> {
        let result: RpcContextResult<Vec<Option<UiAccount>>> = self
            .send("getMultipleAccounts", json!([addresses, { "encoding": "base64" }]))
            .await?;

        if result.value.len() != addresses.len() {
            return Err(QuoteError::malformed(
                &self.rpc_url,
                format!(
                    "getMultipleAccounts returned {} accounts for {} addresses",
                    result.value.len(),
                    addresses.len()
                ),
            ));
        }
        Ok(result.value)
    }

    /// `getTokenAccountBalance` for an SPL token account
    pub async fn get_token_account_balance(&self, address: &str) -> Result<UiTokenAmount> {
        let result: RpcContextResult<UiTokenAmount> = self
            .send("getTokenAccountBalance", json!([address]))
            .await?;
        Ok(result.value)
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!("RPC {} -> {} (id {})", method, self.rpc_url, request.id);

        let response = self
            .http
            .post(&self.rpc_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| QuoteError::transport(&self.rpc_url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::transport(&self.rpc_url, e))?;

        if !status.is_success() {
            return Err(QuoteError::HttpStatus {
                endpoint: self.rpc_url.clone(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let parsed: RpcResponse<T> = serde_json::from_slice(&body)
            .map_err(|e| QuoteError::malformed(&self.rpc_url, format!("{} response: {}", method, e)))?;

        if let Some(error) = parsed.error {
            return Err(QuoteError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        parsed.result.ok_or_else(|| {
            QuoteError::malformed(
                &self.rpc_url,
                format!("{} response missing both result and error fields", method),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_account_info_sends_jsonrpc_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "jsonrpc": "2.0",
                "method": "getAccountInfo",
                "params": ["Pool1111", { "encoding": "base64" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "context": { "slot": 7 },
                    "value": { "data": ["AQID", "base64"], "lamports": 1, "owner": "x", "executable": false }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        let account = client.get_account_info("Pool1111").await.unwrap().unwrap();
        assert_eq!(account.data[0], "AQID");
    }

    #[tokio::test]
    async fn test_null_value_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 7 }, "value": null }
            })))
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        assert!(client.get_account_info("Missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rpc_error_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32602, "message": "Invalid param: not a Token account" }
            })))
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        let err = client.get_token_account_balance("Vault").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rpc);
        assert!(err.to_string().contains("not a Token account"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        let err = client.get_account_info("Pool").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(err, QuoteError::HttpStatus { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        let err = client.get_account_info("Pool").await.unwrap_err();
        assert!(matches!(err, QuoteError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        // Nothing listens on port 9 of localhost in the test environment
        let client = SolanaClient::new("http://127.0.0.1:9");
        let err = client.get_account_info("Pool").await.unwrap_err();
        assert!(matches!(err, QuoteError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_multiple_accounts_length_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": { "context": { "slot": 7 }, "value": [null] }
            })))
            .mount(&server)
            .await;

        let client = SolanaClient::new(&server.uri());
        let err = client
            .get_multiple_accounts(&["A".to_string(), "B".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
