use crate::core::types::{ClientId, RedirectUri, ResponseType, Scope, State};

/// Query parameters of the consent page redirect.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct AuthorizationRequest {
    pub response_type: ResponseType,
    pub client_id: ClientId,
    pub redirect_uri: RedirectUri,
    pub scope: Scope,
    pub state: State,
}

/// Query of `GET /authorize/oauth2`. Presence is checked by the orchestrator.
#[derive(Debug, Default)]
#[derive(serde::Deserialize)]
pub struct AuthorizationCallback {
    pub code: Option<String>,
    pub state: Option<String>,
}
