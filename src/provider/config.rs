use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

use crate::core::types::SecretKey;

/// Everything the client needs from its environment, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Value of the `x-api-key` header, issued by the developer portal.
    pub api_key: String,
    pub client_registration_uri: Url,
    pub software_statement_uri: Url,
    pub adaa_uri: Url,
    pub authorization_uri: Url,
    pub access_token_uri: Url,
    /// Key the registration service seals client credentials with.
    pub secret: SecretKey,
    pub keystore: Option<Keystore>,
    /// Public base URI of this application, used to build callbacks.
    pub base_uri: Url,
    pub listen_addr: SocketAddr,
}

/// PKCS#12 archive holding the mutual-TLS client certificate and key.
#[derive(Clone)]
pub struct Keystore {
    pub location: PathBuf,
    pub password: String,
}

impl std::fmt::Debug for Keystore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keystore {{ location: {:?}, .. }}", self.location)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("{0} must not be empty")]
    MissingValue(&'static str),
    #[error("secret must be Base64 encoding of at least 32 bytes")]
    InvalidSecret,
    #[error("cannot read keystore {path:?}: {source}")]
    KeystoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot load client certificate: {0}")]
    Identity(#[source] reqwest::Error),
    #[error("cannot build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
