//! # HTTP transport for the FHIR API
//!
//! [`HttpResourceClient`] implements the core [`ResourceClient`] seam on top of
//! `reqwest`. Content negotiation and the optional bearer token are installed as
//! default headers once; each request only adds its `If-None-Exist` condition.
//! Redirects are returned to the caller as-is, never followed.

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE,
};
use reqwest::redirect::Policy;

use igloader_core::contract::{ConditionalPut, ResourceClient, ServerResponse};
use igloader_core::error::TransportError;

pub const FHIR_JSON: &str = "application/fhir+json";
pub const FHIR_JSON_UTF8: &str = "application/fhir+json; charset=utf-8";
pub const IF_NONE_EXIST: &str = "If-None-Exist";

/// Headers sent with every request.
pub fn request_headers(access_token: Option<&str>) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FHIR_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FHIR_JSON_UTF8));
    if let Some(token) = access_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

pub struct HttpResourceClient {
    http: reqwest::Client,
}

impl HttpResourceClient {
    pub fn new(access_token: Option<&str>) -> Result<Self, TransportError> {
        let headers = request_headers(access_token).map_err(|e| {
            tracing::error!(error = %e, "ACCESS_TOKEN is not a valid header value");
            e
        })?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .build()?;
        tracing::info!(
            bearer_auth = access_token.is_some(),
            "Initialized FHIR client"
        );
        Ok(Self { http })
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn conditional_put(&self, req: ConditionalPut) -> Result<ServerResponse, TransportError> {
        let response = self
            .http
            .put(&req.endpoint)
            .header(IF_NONE_EXIST, format!("_id={}", req.id))
            .body(req.body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(endpoint = %req.endpoint, status, "PUT answered");
        Ok(ServerResponse { status, body })
    }
}
