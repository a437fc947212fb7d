/// Error type for mail delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The provider answered, but refused the message.
    #[error("Mail provider rejected the request with HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The sender or recipient address could not be parsed.
    #[error("Invalid email address {0}")]
    InvalidAddress(String),

    /// The HTTP request to the provider failed (network, DNS, timeout, etc.).
    #[error("Mail provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}
