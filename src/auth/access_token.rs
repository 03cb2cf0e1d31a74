use crate::core::types::{AuthCode, ClientId, ClientSecret, GrantType, RedirectUri};

#[derive(Debug)]
#[derive(serde::Serialize)]
pub struct ClientCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

/// Form body of the authorization code exchange, credentials sent as
/// `client_secret_post`.
#[derive(Debug)]
#[derive(serde::Serialize)]
pub struct TokenRequest {
    pub grant_type: GrantType,
    pub code: AuthCode,
    pub redirect_uri: RedirectUri,
    #[serde(flatten)]
    pub credentials: ClientCredentials,
}

#[derive(serde::Deserialize, Debug)]
pub struct AccessTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}
