// src/infra/errors.rs — Error types for taskdeck

use thiserror::Error;

/// Uniform failure shape returned by the request gateway.
///
/// Every gateway call resolves to either success data (`Ok`) or an
/// `ApiError`; the gateway never panics and never leaks a raw transport
/// error across its public boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// An authenticated call was attempted without a credential. Local
    /// short-circuit: the network is never contacted.
    #[error("Authentication required")]
    AuthRequired,

    /// The remote API rejected the request (non-2xx). The message is
    /// extracted from the response error envelope.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport failure or malformed response body. Distinguished from
    /// `Api` by `status()` returning `None`.
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    /// Transport status code, or `None` when no response was received.
    /// `AuthRequired` reports 401 even though it never reaches the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRequired => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }

    /// Whether the caller should tear down the session (clear credential,
    /// send the user back to login).
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
