use thiserror::Error;

/// Client-side error for every call that leaves the browser.
/// The UI treats all variants the same way (log and move on), the split only
/// exists so logs and tests can tell them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error on {endpoint}: {status}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    // ── Payload errors ───────────────────────────────────────────────────────
    #[error("Parse error on {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialize error: {0}")]
    Encode(#[source] serde_json::Error),

    // ── Session errors ───────────────────────────────────────────────────────
    #[error("Token storage failed: {0}")]
    Storage(String),

    #[error("Authentication response did not contain a token")]
    MissingToken,

    // ── Identity widget errors ───────────────────────────────────────────────
    #[error("Identity widget unavailable: {0}")]
    IdentityUnavailable(String),
}

impl ApiError {
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        ApiError::Decode { endpoint: endpoint.into(), source }
    }
}
