//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from backing store APIs.
//! These are shared utilities, not ports.

use lbstats_domain::error::{Error, Result, SourceKind};
use reqwest::Response;
use tracing::{error, warn};

use crate::constants::ERROR_MSG_REQUEST_TIMEOUT;

/// Format error message for a backing store client
fn backing_error(kind: SourceKind, provider: &str, context: &str, details: &str) -> Error {
    Error::backing_store(kind, format!("{provider} {context}: {details}"))
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// Client errors (4xx) and server errors (5xx) are logged differently
    /// but both come back as [`Error::BackingStore`].
    pub async fn check_and_parse(
        response: Response,
        kind: SourceKind,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 | 403 => {
                    warn!(provider = provider_name, code, "Backing store rejected credentials");
                    backing_error(kind, provider_name, "authentication failed", &error_text)
                }
                429 => {
                    warn!(provider = provider_name, code, "Backing store rate limited request");
                    backing_error(kind, provider_name, "rate limit exceeded", &error_text)
                }
                400..=499 => {
                    warn!(provider = provider_name, code, body = %error_text, "Backing store client error");
                    backing_error(
                        kind,
                        provider_name,
                        &format!("client error ({code})"),
                        &error_text,
                    )
                }
                500..=599 => {
                    error!(provider = provider_name, code, body = %error_text, "Backing store server error");
                    backing_error(
                        kind,
                        provider_name,
                        &format!("server error ({code})"),
                        &error_text,
                    )
                }
                _ => backing_error(
                    kind,
                    provider_name,
                    &format!("request failed ({code})"),
                    &error_text,
                ),
            });
        }

        response.json().await.map_err(|e| {
            backing_error(kind, provider_name, "response parse failed", &e.to_string())
        })
    }

    /// Map a transport-level reqwest failure
    pub fn send_error(
        kind: SourceKind,
        provider_name: &str,
        timeout: std::time::Duration,
        err: reqwest::Error,
    ) -> Error {
        if err.is_timeout() {
            Error::backing_store(
                kind,
                format!("{provider_name} {ERROR_MSG_REQUEST_TIMEOUT} {timeout:?}"),
            )
        } else {
            Error::backing_store_with_source(
                kind,
                format!("{provider_name} HTTP request failed"),
                err,
            )
        }
    }
}
