/*
 *  httprpc.rs
 *
 *  PixSync - worth the squeeze
 *	(c) 2026 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */
use serde::{Serialize, Deserialize};
use serde_json::{json, Value, Error as SerdeJsonError};
use reqwest::{Client, header, Error as ReqwestError};
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::constants::VERSION;

const SLIM_REQUEST: &str = "slim.request";

/// Custom error type for SlimInfoClient operations.
#[derive(Debug)]
pub enum SlimInfoClientError {
    /// Error during HTTP request (e.g., network issues, invalid URL).
    HttpRequestError(ReqwestError),
    /// Error serializing the request payload to JSON.
    SerializationError(SerdeJsonError),
    /// Error deserializing the response payload from JSON.
    DeserializationError(SerdeJsonError),
    /// The LMS Server response contained an error object.
    RpcError(RpcError),
    /// The LMS Server response was missing the 'result' field when expected.
    MissingResult,
    /// Mismatched ID between request and response.
    IdMismatch { expected: u32, received: Option<u32> },
}

impl Display for SlimInfoClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SlimInfoClientError::HttpRequestError(e) => write!(f, "HTTP request error: {}", e),
            SlimInfoClientError::SerializationError(e) => write!(f, "JSON serialization error: {}", e),
            SlimInfoClientError::DeserializationError(e) => write!(f, "JSON deserialization error: {}", e),
            SlimInfoClientError::RpcError(e) => write!(f, "LMS Server error {}: {}", e.code, e.message),
            SlimInfoClientError::MissingResult => write!(f, "LMS Server response missing 'result' field"),
            SlimInfoClientError::IdMismatch { expected, received } => {
                write!(f, "LMS Server ID mismatch: expected {}, received {:?}", expected, received)
            }
        }
    }
}

impl std::error::Error for SlimInfoClientError {}

impl From<ReqwestError> for SlimInfoClientError {
    fn from(err: ReqwestError) -> Self {
        SlimInfoClientError::HttpRequestError(err)
    }
}

/// Represents the custom SlimInfo request payload.
#[derive(Debug, Serialize)]
pub struct SlimRequest {
    pub id: u32,
    pub method: &'static str,
    pub params: Vec<Value>, // (player MAC, [command, param,...])
}

/// Represents a standard LMS Server error object.
#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[allow(dead_code)]
    pub data: Option<Value>,
}

/// Represents a standard LMS Server response structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    pub id: Option<u32>,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
}

/// A client for the LMS JSON-RPC endpoint.
#[derive(Debug)]
pub struct SlimInfoClient {
    base_url: String,
    id: AtomicU32,
    client: Client,
}

impl SlimInfoClient {
    /// Creates a new `SlimInfoClient` with populated headers and timeout.
    pub fn new(host: &str, port: u16, timeout: Duration) -> Result<Self, SlimInfoClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("User-Agent", header::HeaderValue::from_static(VERSION));
        headers.insert("Content-Type", header::HeaderValue::from_static("application/json"));
        headers.insert("Accept", header::HeaderValue::from_static("application/json"));
        headers.insert("Connection", header::HeaderValue::from_static("close"));

        let client = Client::builder()
            .http1_only()
            .connect_timeout(Duration::from_millis(500))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(SlimInfoClient {
            base_url: format!("http://{}:{}", host, port),
            id: AtomicU32::new(1),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wraps a player and command into the slim.request envelope.
    pub fn build_request(id: u32, player_mac: &str, command: &str, inner_params: Vec<Value>) -> SlimRequest {
        let mut command_and_params = vec![json!(command)];
        command_and_params.extend(inner_params);
        SlimRequest {
            id,
            method: SLIM_REQUEST,
            params: vec![Value::String(player_mac.to_string()), Value::Array(command_and_params)],
        }
    }

    /// Checks id and error fields and hands back `result`.
    pub fn parse_response(expected: u32, body: &str) -> Result<Value, SlimInfoClientError> {
        let rpc_response: JsonRpcResponse = serde_json::from_str(body)
            .map_err(SlimInfoClientError::DeserializationError)?;

        // LMS omits the id on some builds, only a wrong one is fatal
        if rpc_response.id.is_some() && rpc_response.id != Some(expected) {
            return Err(SlimInfoClientError::IdMismatch {
                expected,
                received: rpc_response.id,
            });
        }
        if let Some(error) = rpc_response.error {
            return Err(SlimInfoClientError::RpcError(error));
        }
        rpc_response.result.ok_or(SlimInfoClientError::MissingResult)
    }

    /// Sends a slim.request for `player_mac` ("-" when not player specific).
    pub async fn send_slim_request(
        &self,
        player_mac: &str,
        command: &str,
        inner_params: Vec<Value>,
    ) -> Result<Value, SlimInfoClientError> {
        let current_request_id = self.id.fetch_add(1, Ordering::Relaxed);
        let url = format!("{}/jsonrpc.js", self.base_url);

        let slim_request = Self::build_request(current_request_id, player_mac, command, inner_params);
        let request_body = serde_json::to_string(&slim_request)
            .map_err(SlimInfoClientError::SerializationError)?;

        let response = self.client
            .post(&url)
            .body(request_body)
            .send()
            .await?;
        response.error_for_status_ref()?;

        let response_text = response.text().await?;
        Self::parse_response(current_request_id, &response_text)
    }

    /// Raw GET against the server, used for cover art.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, SlimInfoClientError> {
        let response = self.client
            .get(url)
            .header(header::ACCEPT, "image/*")
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope() {
        let req = SlimInfoClient::build_request(7, "aa:bb:cc:dd:ee:ff", "status", vec![json!("-"), json!(1), json!("tags:aAdlKc")]);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["method"], "slim.request");
        assert_eq!(v["params"][0], "aa:bb:cc:dd:ee:ff");
        assert_eq!(v["params"][1], json!(["status", "-", 1, "tags:aAdlKc"]));
    }

    #[test]
    fn test_response_checks() {
        let ok = r#"{"id":3,"method":"slim.request","result":{"mode":"play"}}"#;
        assert_eq!(SlimInfoClient::parse_response(3, ok).unwrap()["mode"], "play");

        let no_id = r#"{"result":{"mode":"stop"}}"#;
        assert!(SlimInfoClient::parse_response(3, no_id).is_ok());

        assert!(matches!(
            SlimInfoClient::parse_response(4, ok),
            Err(SlimInfoClientError::IdMismatch { expected: 4, received: Some(3) })
        ));
        let err = r#"{"id":3,"error":{"code":-32601,"message":"Method not found"}}"#;
        assert!(matches!(SlimInfoClient::parse_response(3, err), Err(SlimInfoClientError::RpcError(_))));
        assert!(matches!(
            SlimInfoClient::parse_response(3, r#"{"id":3}"#),
            Err(SlimInfoClientError::MissingResult)
        ));
    }
}
