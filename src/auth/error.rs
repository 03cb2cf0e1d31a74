#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse<K> {
    #[serde(rename = "error")]
    pub kind: K,
    #[serde(rename = "error_description")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "error_uri")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    DecryptionFailed,
    ClientRegistrationParseFailed,
    SerializationFailed,
    StatementRequestFailed,
    NotRegistered,
    NoActiveFlow,
    AuthorizationFailed,
    RemoteCallFailed,
}

/// Error body returned by the OAuth2 token endpoint (RFC 6749, section 5.2).
pub type TokenErrorResponse = ErrorResponse<String>;
