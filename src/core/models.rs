use url::Url;

use super::types::*;

/// Client identity issued by the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Deserialize)]
pub struct CredentialPair {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

impl CredentialPair {
    pub fn new(client_id: ClientId, client_secret: ClientSecret) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}

/// An authorization code grant between consent redirect and callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowHandle {
    pub authorization_uri: Url,
    pub token_uri: Url,
    pub redirect_uri: RedirectUri,
    pub scope: Scope,
    pub credentials: CredentialPair,
    pub state: State,
}

/// Payload of the registration callback.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize)]
pub struct EncryptedCredentialEnvelope {
    pub salt: String,
    #[serde(rename = "encryptedData")]
    pub encrypted_data: String,
}
