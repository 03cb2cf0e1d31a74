use async_trait::async_trait;
use reqwest::{Client, Identity, Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::auth::error::TokenErrorResponse;
use crate::auth::{
    AccessTokenResponse, AccountsApi, SoftwareStatementApi, SoftwareStatementRequest,
    SoftwareStatementResponse, TokenEndpoint, TokenRequest,
};
use crate::core::types::{AccessToken, SoftwareStatement};
use crate::provider::config::{Config, Keystore, StartupError};
use crate::provider::error::Error;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTPS client for the bank's APIs, presenting the client certificate.
#[derive(Debug, Clone)]
pub struct BankClient {
    http: Client,
    api_key: String,
    software_statement_uri: Url,
    adaa_uri: Url,
}

impl BankClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            software_statement_uri: config.software_statement_uri.clone(),
            adaa_uri: config.adaa_uri.clone(),
        }
    }

    /// Builds the shared client, reading the keystore once.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let mut builder = Client::builder();
        if let Some(keystore) = &config.keystore {
            builder = builder.identity(load_identity(keystore)?);
        }
        let http = builder.build().map_err(StartupError::HttpClient)?;
        Ok(Self::new(http, config))
    }
}

fn load_identity(keystore: &Keystore) -> Result<Identity, StartupError> {
    let der = std::fs::read(&keystore.location).map_err(|source| {
        StartupError::KeystoreUnreadable {
            path: keystore.location.clone(),
            source,
        }
    })?;
    Identity::from_pkcs12_der(&der, &keystore.password).map_err(StartupError::Identity)
}

async fn describe_failure(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.is_empty() => format!("{}: {}", status, body),
        _ => status.to_string(),
    }
}

#[async_trait]
impl SoftwareStatementApi for BankClient {
    async fn software_statement(
        &self,
        req: &SoftwareStatementRequest,
    ) -> Result<SoftwareStatement, Error> {
        let failed = |e: reqwest::Error| Error::StatementRequestFailed(e.to_string());

        let response = self
            .http
            .post(self.software_statement_uri.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(req)
            .send()
            .await
            .map_err(failed)?;

        if !response.status().is_success() {
            return Err(Error::StatementRequestFailed(describe_failure(response).await));
        }

        let body: SoftwareStatementResponse = response.json().await.map_err(failed)?;
        Ok(body.software_statement)
    }
}

#[async_trait]
impl TokenEndpoint for BankClient {
    async fn exchange_code(
        &self,
        token_uri: &Url,
        req: &TokenRequest,
    ) -> Result<AccessTokenResponse, Error> {
        let response = self.http.post(token_uri.clone()).form(req).send().await?;
        let status = response.status();
        debug!(%status, "token endpoint responded");

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // RFC 6749 5.2: rejections are 400 or 401 with an error body
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            if let Ok(err) = response.json::<TokenErrorResponse>().await {
                let reason = match err.description {
                    Some(d) => format!("{}: {}", err.kind, d),
                    None => err.kind,
                };
                return Err(Error::AuthorizationFailed(reason));
            }
            return Err(Error::AuthorizationFailed(status.to_string()));
        }

        Err(Error::RemoteCallFailed(describe_failure(response).await))
    }
}

#[async_trait]
impl AccountsApi for BankClient {
    async fn accounts(&self, token: &AccessToken) -> Result<serde_json::Value, Error> {
        let uri = format!("{}/accounts", self.adaa_uri.as_str().trim_end_matches('/'));
        let response = self
            .http
            .get(uri)
            .bearer_auth(token.as_str())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::RemoteCallFailed(describe_failure(response).await));
        }
        Ok(response.json().await?)
    }
}
