//! Error types for wrb-waapi.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaapiError {
    /// No transport could be established: Wwise is closed, WAAPI is
    /// disabled, or the port is wrong.
    #[error("cannot connect to WAAPI at {url}: {detail}")]
    Connection { url: String, detail: String },

    /// Wwise answered, but the call itself failed.
    #[error("WAAPI call {uri} failed: {message}")]
    Call { uri: String, message: String },

    /// The answer did not have the shape the call promises.
    #[error("unexpected WAAPI response to {uri}: {detail}")]
    UnexpectedResponse { uri: String, detail: String },
}

impl WaapiError {
    pub fn is_connection(&self) -> bool {
        matches!(self, WaapiError::Connection { .. })
    }
}
