use std::sync::Arc;

use crate::auth::{AccountsApi, MaybeRedirect, SoftwareStatementApi, TokenEndpoint};
use crate::auth::AuthorizationRequest;
use crate::util::cipher::DecryptionService;

pub mod authorization;
pub mod config;
pub mod error;
pub mod registration;
pub mod store;

use config::Config;
use error::Error;
use store::CredentialStore;

/// Path of the OAuth2 callback, relative to the application base URI.
pub const AUTHORIZATION_OAUTH2_PATH: &str = "authorize/oauth2";
/// Path of the registration callback, relative to the application base URI.
pub const CLIENT_REGISTRATION_PATH: &str = "register/client";
/// Protected resource the grant callback lands on.
pub const ACCOUNTS_PATH: &str = "accounts";
/// Sign-on page of the registration service, relative to its base URI.
pub const SAML_REGISTRATION_PATH: &str = "saml/register";

/// Process context shared by every request handler.
pub struct OpenBankingProvider {
    config: Arc<Config>,
    store: CredentialStore,
    decryption: DecryptionService,
    statements: Arc<dyn SoftwareStatementApi>,
    tokens: Arc<dyn TokenEndpoint>,
    banking: Arc<dyn AccountsApi>,
}

impl std::fmt::Debug for OpenBankingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenBankingProvider")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

impl OpenBankingProvider {
    pub fn new<R>(config: Arc<Config>, remote: Arc<R>) -> Self
    where
        R: SoftwareStatementApi + TokenEndpoint + AccountsApi + 'static,
    {
        Self {
            config,
            store: CredentialStore::new(),
            decryption: DecryptionService::new(),
            statements: remote.clone(),
            tokens: remote.clone(),
            banking: remote,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Fetches the accounts visible to the current token, or redirects to
    /// the consent page when there is none.
    pub async fn accounts(
        &self,
        base_uri: &str,
    ) -> Result<MaybeRedirect<AuthorizationRequest, serde_json::Value>, Error> {
        match self.ensure_authorized(base_uri)? {
            MaybeRedirect::Redirected(r) => Ok(MaybeRedirect::Redirected(r)),
            MaybeRedirect::Direct(token) => {
                let accounts = self.banking.accounts(&token).await?;
                Ok(MaybeRedirect::Direct(accounts))
            }
        }
    }
}
