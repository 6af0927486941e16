// src/services/client.rs

//! Product Advertising API client.
//!
//! Thin transport wrapper: sign the request body, POST it, hand the raw
//! JSON response back. No retries and no rate-limit negotiation happen
//! here; pacing between calls is the pipeline's concern.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, Credentials, SearchItemsRequest};
use crate::utils::sigv4::{self, SigningRequest};

/// Operation target header for `SearchItems`.
const SEARCH_ITEMS_TARGET: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.SearchItems";

/// Request path for `SearchItems`.
const SEARCH_ITEMS_PATH: &str = "/paapi5/searchitems";

/// Seam for the outbound search call, so the pipeline can run against
/// test doubles and alternative transports.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Execute a `SearchItems` call, returning the raw response payload.
    async fn search_items(&self, request: &SearchItemsRequest) -> Result<Value>;
}

/// HTTPS client for the Product Advertising API.
pub struct PaapiClient {
    credentials: Credentials,
    region: String,
    base_url: String,
    http: reqwest::Client,
}

impl PaapiClient {
    /// Create a client for the credential's marketplace.
    pub fn new(credentials: Credentials, config: &ClientConfig) -> Result<Self> {
        let endpoint = credentials.endpoint()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            credentials,
            region: endpoint.region.to_string(),
            base_url: format!("https://{}", endpoint.host),
            http,
        })
    }

    /// Point the client at a different base URL (sandbox or test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Host component used for signing; must match what the transport
    /// sends in the Host header.
    fn signing_host(&self) -> &str {
        self.base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
    }
}

#[async_trait]
impl SearchClient for PaapiClient {
    async fn search_items(&self, request: &SearchItemsRequest) -> Result<Value> {
        let payload = serde_json::to_string(request)?;
        let headers = sigv4::sign(&SigningRequest {
            access_key: &self.credentials.access_key,
            secret_key: &self.credentials.secret_key,
            region: &self.region,
            host: self.signing_host(),
            path: SEARCH_ITEMS_PATH,
            target: SEARCH_ITEMS_TARGET,
            payload: &payload,
        })?;

        log::debug!(
            "POST {}{} ({} bytes)",
            self.base_url,
            SEARCH_ITEMS_PATH,
            payload.len()
        );

        let response = self
            .http
            .post(format!("{}{}", self.base_url, SEARCH_ITEMS_PATH))
            .header("content-type", sigv4::CONTENT_TYPE)
            .header("content-encoding", sigv4::CONTENT_ENCODING)
            .header("x-amz-date", &headers.amz_date)
            .header("x-amz-target", &headers.target)
            .header("authorization", &headers.authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(translate_failure(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "Errors", default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "Code", default)]
    code: String,

    #[serde(rename = "Message", default)]
    message: String,
}

/// Map a non-2xx response onto an error, keeping the API's own message
/// when the body carries one.
fn translate_failure(status: reqwest::StatusCode, body: &str) -> AppError {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(first) = parsed.errors.first() {
            if !first.message.is_empty() {
                return AppError::api(&first.code, &first.message);
            }
        }
    }
    AppError::unknown(format!("Search request failed with status {status}"))
}
