#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),
    /// Carries the ciphertext only. Plaintext never leaves the codec on failure.
    #[error("ciphered text '{cipher_text}' could not be decrypted")]
    DecryptionFailed { cipher_text: String },
    #[error("cannot parse client registration data: {0}")]
    ClientRegistrationParseFailed(String),
    #[error("cannot serialize registration request: {0}")]
    SerializationFailed(#[source] serde_json::Error),
    #[error("software statement request failed: {0}")]
    StatementRequestFailed(String),
    #[error("client is not registered")]
    NotRegistered,
    #[error("no authorization flow in progress")]
    NoActiveFlow,
    #[error("authorization failed: {0}")]
    AuthorizationFailed(String),
    #[error("remote call failed: {0}")]
    RemoteCallFailed(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::RemoteCallFailed(e.to_string())
    }
}
