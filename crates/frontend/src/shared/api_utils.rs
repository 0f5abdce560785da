//! HTTP plumbing between the dashboard core and the KPI REST service.
//!
//! Core operations never talk to `gloo-net` directly; they go through
//! [`KpiTransport`] so the request lifecycle can be driven by an in-memory
//! transport in tests.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::shared::error::KpiError;

/// Versioned API prefix shared by every endpoint
pub const API_PREFIX: &str = "/api/v1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One outgoing request: method, path with query string, bearer credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub token: String,
}

impl ApiRequest {
    /// Build an authorized request.
    ///
    /// A missing or blank token is a precondition failure: no request is built.
    pub fn authorized(
        method: HttpMethod,
        path: String,
        token: Option<&str>,
    ) -> Result<Self, KpiError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(KpiError::missing_token)?;

        Ok(Self {
            method,
            path,
            token: token.to_string(),
        })
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, classified error otherwise
    pub fn into_body(self) -> Result<String, KpiError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(KpiError::from_status(self.status, &self.body))
        }
    }
}

/// Issues exactly one request per call; no retry, no caching
#[async_trait(?Send)]
pub trait KpiTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, KpiError>;
}

/// Browser transport backed by `fetch`
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl KpiTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, KpiError> {
        let url = self.url(&request.path);
        let authorization = request.authorization_header();

        let builder = match request.method {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
        };

        log::debug!("{:?} {}", request.method, url);

        let response = builder
            .header("Authorization", &authorization)
            .send()
            .await
            .map_err(|e| KpiError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KpiError::Network(format!("Failed to read response: {}", e)))?;

        if !(200..300).contains(&status) {
            log::warn!("{:?} {} -> HTTP {}", request.method, url, status);
        }

        Ok(ApiResponse { status, body })
    }
}
