/// Errors from the Forge REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ForgeApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Forge returned a status code other than the expected one.
    #[error("Forge API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A request URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ForgeApiError {
    /// The service answered, but refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}
