//! Correlation IDs echoed between the caller, the logs and the response.

use std::fmt;

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// The caller's `x-request-id` when it has one, otherwise a fresh v7 UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    pub(super) fn from_header(value: Option<String>) -> Self {
        Self(
            value
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| Uuid::now_v7().to_string()),
        )
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    /// Echo the ID back to the caller; IDs that are not valid header text are only logged.
    pub(super) fn write_to(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self, "request id is not a valid header value: {source}");
            }
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
