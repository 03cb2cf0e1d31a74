use tracing::{info, warn};

use super::error::Error;
use super::{OpenBankingProvider, AUTHORIZATION_OAUTH2_PATH};
use crate::auth::{
    AuthorizationRequest, ClientCredentials, MaybeRedirect, Redirect, TokenRequest,
};
use crate::core::models::FlowHandle;
use crate::core::types::{
    AccessToken, AuthCode, GrantType, RedirectUri, ResponseType, Scope, State,
};
use crate::util::random::FromRandom;

impl OpenBankingProvider {
    /// Starts an authorization code grant and returns the consent redirect.
    ///
    /// Any flow started earlier is superseded; its callback will fail.
    pub fn start_authorization(
        &self,
        base_uri: &str,
    ) -> Result<Redirect<AuthorizationRequest>, Error> {
        let credentials = self.store.credentials().ok_or(Error::NotRegistered)?;
        let redirect_uri = RedirectUri::from_base(base_uri, AUTHORIZATION_OAUTH2_PATH)?;
        let authorization_uri = self.config.authorization_uri.clone();

        let handle = FlowHandle {
            authorization_uri: authorization_uri.clone(),
            token_uri: self.config.access_token_uri.clone(),
            redirect_uri: redirect_uri.clone(),
            scope: Scope::adaa(),
            credentials,
            state: State::from_random(),
        };

        let consent = Redirect::new(
            RedirectUri::new(authorization_uri.as_str())?,
            AuthorizationRequest {
                response_type: ResponseType::Code,
                client_id: handle.credentials.client_id.clone(),
                redirect_uri,
                scope: handle.scope.clone(),
                state: handle.state.clone(),
            },
        );

        if self.store.flow().is_some() {
            warn!("superseding an authorization flow that was never finished");
        }
        info!(client_id = handle.credentials.client_id.as_str(), "authorization flow started");
        self.store.set_flow(handle);

        Ok(consent)
    }

    /// Exchanges the callback's code for an access token.
    ///
    /// The started flow is consumed whatever the outcome. The token is only
    /// kept if the store still holds the credentials it was issued to and no
    /// other flow was started in the meantime.
    pub async fn finish_authorization(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<AccessToken, Error> {
        let code = AuthCode::new(code.unwrap_or_default())?;
        let state = State::new(state.unwrap_or_default())?;

        let handle = self.store.take_flow().ok_or(Error::NoActiveFlow)?;

        if handle.state != state {
            warn!("authorization callback state does not match the started flow");
            return Err(Error::AuthorizationFailed("state mismatch".to_string()));
        }

        let req = TokenRequest {
            grant_type: GrantType::AuthorizationCode,
            code,
            redirect_uri: handle.redirect_uri.clone(),
            credentials: ClientCredentials::from(&handle.credentials),
        };

        let response = self.tokens.exchange_code(&handle.token_uri, &req).await?;
        let token = AccessToken::new(response.access_token).map_err(|_| {
            Error::AuthorizationFailed("token endpoint returned an empty access token".to_string())
        })?;

        if !self.store.complete_flow(&handle, token.clone()) {
            warn!("credentials or flow changed during the code exchange, token dropped");
            return Err(Error::AuthorizationFailed(
                "authorization flow was superseded".to_string(),
            ));
        }
        info!("authorization code exchanged for access token");

        Ok(token)
    }

    /// Gate for protected operations: the current token, or the consent
    /// redirect of a freshly started flow.
    pub fn ensure_authorized(
        &self,
        base_uri: &str,
    ) -> Result<MaybeRedirect<AuthorizationRequest, AccessToken>, Error> {
        match self.store.access_token() {
            Some(token) => Ok(MaybeRedirect::Direct(token)),
            None => self.start_authorization(base_uri).map(MaybeRedirect::Redirected),
        }
    }
}
