use thiserror::Error;

/// Top-level error type shared by every crate in the workspace.
#[derive(Debug, Error)]
pub enum VaasError {
    #[error("config error: {0}")]
    Config(String),

    /// Connection refused, DNS failure, timeout, broken body stream.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed payload from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl VaasError {
    /// `true` for failures that the next poll tick may recover from.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

pub type Result<T, E = VaasError> = std::result::Result<T, E>;
