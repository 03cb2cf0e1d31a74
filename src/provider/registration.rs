use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{info, warn};

use super::error::Error;
use super::{
    OpenBankingProvider, AUTHORIZATION_OAUTH2_PATH, CLIENT_REGISTRATION_PATH,
    SAML_REGISTRATION_PATH,
};
use crate::auth::{
    AuthorizationRequest, Redirect, RegistrationRedirect, RegistrationRequest,
    SoftwareStatementRequest, TokenEndpointAuthMethod, APPLICATION_TYPE_WEB,
};
use crate::core::models::{CredentialPair, EncryptedCredentialEnvelope};
use crate::core::types::{RedirectUri, Scope, SoftwareStatement};

const SOFTWARE_ID: &str = "softwareId";
const SOFTWARE_VERSION: &str = "1.0";

impl OpenBankingProvider {
    /// Asks the software statement API to vouch for this application.
    pub async fn request_software_statement(
        &self,
        application_name: &str,
        base_uri: &str,
    ) -> Result<SoftwareStatement, Error> {
        if application_name.trim().is_empty() {
            return Err(Error::InvalidArgument("softwareName"));
        }

        let req = SoftwareStatementRequest {
            software_name: application_name.to_string(),
            software_id: SOFTWARE_ID.to_string(),
            software_version: SOFTWARE_VERSION.to_string(),
            software_uri: base_uri.to_string(),
            redirect_uris: vec![RedirectUri::from_base(base_uri, AUTHORIZATION_OAUTH2_PATH)?],
            registration_back_uri: RedirectUri::from_base(base_uri, CLIENT_REGISTRATION_PATH)?,
            token_endpoint_auth_method: TokenEndpointAuthMethod::ClientSecretPost,
            grant_types: vec!["authorization_code".to_string()],
            response_types: vec!["code".to_string()],
        };

        let statement = self
            .statements
            .software_statement(&req)
            .await
            .map_err(|e| match e {
                Error::StatementRequestFailed(_) => e,
                other => Error::StatementRequestFailed(other.to_string()),
            })?;

        info!(software_name = application_name, "software statement issued");
        Ok(statement)
    }

    /// Redirects to the registration service's sign-on page carrying the
    /// Base64 encoded registration request.
    pub fn submit_registration(
        &self,
        statement: SoftwareStatement,
        application_name: &str,
        base_uri: &str,
    ) -> Result<Redirect<RegistrationRedirect>, Error> {
        let req = RegistrationRequest::new(
            application_name,
            None,
            APPLICATION_TYPE_WEB,
            vec![RedirectUri::from_base(base_uri, AUTHORIZATION_OAUTH2_PATH)?],
            &Scope::adaa(),
            statement,
            self.config.secret.clone(),
        )?;

        let json = req.to_json()?;
        let sign_on = RedirectUri::from_base(
            self.config.client_registration_uri.as_str(),
            SAML_REGISTRATION_PATH,
        )?;

        info!(client_name = application_name, "redirecting to client registration sign-on");
        Ok(Redirect::new(
            sign_on,
            RegistrationRedirect {
                registration_request: STANDARD.encode(json.as_bytes()),
            },
        ))
    }

    /// Steps one and two of the registration, as triggered by
    /// `GET /register/software-statement`.
    pub async fn register_software(
        &self,
        application_name: Option<&str>,
        base_uri: &str,
    ) -> Result<Redirect<RegistrationRedirect>, Error> {
        let name = application_name.unwrap_or_default();
        let statement = self.request_software_statement(name, base_uri).await?;
        self.submit_registration(statement, name, base_uri)
    }

    /// Decrypts the registered credentials, stores them and starts the
    /// authorization grant.
    pub fn complete_registration(
        &self,
        envelope: &EncryptedCredentialEnvelope,
        base_uri: &str,
    ) -> Result<Redirect<AuthorizationRequest>, Error> {
        let json = self
            .decryption
            .decrypt(&envelope.encrypted_data, &envelope.salt, &self.config.secret)
            .map_err(|e| {
                warn!("registration callback could not be decrypted");
                e
            })?;

        let pair: CredentialPair = serde_json::from_str(&json)
            .map_err(|e| Error::ClientRegistrationParseFailed(e.to_string()))?;

        info!(client_id = pair.client_id.as_str(), "client registered");
        self.store.set_credentials(pair);

        self.start_authorization(base_uri)
    }
}
