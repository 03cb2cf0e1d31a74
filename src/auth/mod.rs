use crate::core::models::CredentialPair;
use crate::core::types::{AccessToken, RedirectUri, SoftwareStatement};
use crate::provider::error::Error;

pub mod access_token;
pub mod authorization;
pub mod error;
pub mod registration;

pub use access_token::*;
pub use authorization::*;
pub use registration::*;

use async_trait::async_trait;
use url::Url;

/// A `303 See Other` to `uri` with `params` appended to its query.
#[derive(Debug, Clone)]
pub struct Redirect<T> {
    pub uri: RedirectUri,
    pub params: T,
}

impl<T> Redirect<T> {
    pub fn new(uri: RedirectUri, params: T) -> Self {
        Redirect { uri, params }
    }
}

impl<T: serde::Serialize> Redirect<T> {
    pub fn to_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(self.uri.as_str())
            .map_err(|_| Error::InvalidArgument("redirect_uri"))?;
        let new_qs = serde_urlencoded::to_string(&self.params)
            .map_err(|_| Error::InvalidArgument("redirect parameters"))?;
        if !new_qs.is_empty() {
            let pairs = form_urlencoded::parse(new_qs.as_bytes());
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[derive(Debug, Clone, Copy)]
#[derive(serde::Serialize)]
pub struct NoParams {}

#[derive(Debug)]
pub enum MaybeRedirect<R, D> {
    Redirected(Redirect<R>),
    Direct(D),
}

/// Issues software statements for this application.
#[async_trait]
pub trait SoftwareStatementApi: Send + Sync {
    async fn software_statement(
        &self,
        req: &SoftwareStatementRequest,
    ) -> Result<SoftwareStatement, Error>;
}

/// The authorization server's token endpoint.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    async fn exchange_code(
        &self,
        token_uri: &Url,
        req: &TokenRequest,
    ) -> Result<AccessTokenResponse, Error>;
}

/// Banking data reachable with an access token.
#[async_trait]
pub trait AccountsApi: Send + Sync {
    async fn accounts(&self, token: &AccessToken) -> Result<serde_json::Value, Error>;
}

impl From<&CredentialPair> for ClientCredentials {
    fn from(pair: &CredentialPair) -> Self {
        Self {
            client_id: pair.client_id.clone(),
            client_secret: pair.client_secret.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_appends_params_to_existing_query() {
        #[derive(serde::Serialize)]
        struct Params {
            registration_request: &'static str,
        }

        let redirect = Redirect::new(
            RedirectUri::new("https://bank.example/sign-on?lang=cs").unwrap(),
            Params {
                registration_request: "eyJhIjoxfQ==",
            },
        );
        let url = redirect.to_url().unwrap();

        assert_eq!(url.host_str(), Some("bank.example"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("lang".to_string(), "cs".to_string()),
                ("registration_request".to_string(), "eyJhIjoxfQ==".to_string()),
            ]
        );
    }

    #[test]
    fn redirect_without_params_keeps_uri() {
        let redirect = Redirect::new(
            RedirectUri::new("https://app.example/accounts").unwrap(),
            NoParams {},
        );
        assert_eq!(redirect.to_url().unwrap().as_str(), "https://app.example/accounts");
    }
}
