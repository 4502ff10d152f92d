use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("user '{0}' not found in identity service")]
    UserNotFound(String),

    #[error("identity service returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("identity service request failed: {0}")]
    Transport(String),

    #[error("identity service returned an unreadable payload: {0}")]
    InvalidPayload(String),

    #[error("invalid identity service base URL: {0}")]
    InvalidBaseUrl(String),
}
