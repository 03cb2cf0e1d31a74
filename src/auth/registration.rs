use std::fmt;

use crate::core::models::EncryptedCredentialEnvelope;
use crate::core::types::{RedirectUri, Scope, SecretKey, SoftwareStatement};
use crate::provider::error::Error;

pub const APPLICATION_TYPE_WEB: &str = "web";
pub const ENCRYPTION_ALG_DEFAULT: &str = "AES-256";

/// Body of the software statement API call.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareStatementRequest {
    pub software_name: String,
    pub software_id: String,
    pub software_version: String,
    pub software_uri: String,
    pub redirect_uris: Vec<RedirectUri>,
    pub registration_back_uri: RedirectUri,
    pub token_endpoint_auth_method: TokenEndpointAuthMethod,
    pub grant_types: Vec<String>,
    pub response_types: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEndpointAuthMethod {
    ClientSecretPost,
}

#[derive(Debug)]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareStatementResponse {
    pub software_statement: SoftwareStatement,
}

/// Registration request handed to the sign-on page. Field names are the
/// registration service's wire format.
#[derive(Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct RegistrationRequest {
    client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_name_en: Option<String>,
    application_type: String,
    redirect_uris: Vec<RedirectUri>,
    scope: Vec<String>,
    software_statement: SoftwareStatement,
    encryption_alg: String,
    encryption_key: SecretKey,
}

impl RegistrationRequest {
    pub fn new(
        client_name: &str,
        client_name_en: Option<&str>,
        application_type: &str,
        redirect_uris: Vec<RedirectUri>,
        scope: &Scope,
        software_statement: SoftwareStatement,
        encryption_key: SecretKey,
    ) -> Result<Self, Error> {
        Self::with_algorithm(
            client_name,
            client_name_en,
            application_type,
            redirect_uris,
            scope,
            software_statement,
            encryption_key,
            ENCRYPTION_ALG_DEFAULT,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_algorithm(
        client_name: &str,
        client_name_en: Option<&str>,
        application_type: &str,
        redirect_uris: Vec<RedirectUri>,
        scope: &Scope,
        software_statement: SoftwareStatement,
        encryption_key: SecretKey,
        encryption_alg: &str,
    ) -> Result<Self, Error> {
        if client_name.trim().is_empty() {
            return Err(Error::InvalidArgument("client_name"));
        }
        if application_type.trim().is_empty() {
            return Err(Error::InvalidArgument("application_type"));
        }
        if redirect_uris.is_empty() {
            return Err(Error::InvalidArgument("redirect_uris"));
        }
        if encryption_alg.trim().is_empty() {
            return Err(Error::InvalidArgument("encryption_alg"));
        }

        Ok(Self {
            client_name: client_name.to_string(),
            client_name_en: client_name_en.map(ToString::to_string),
            application_type: application_type.to_string(),
            redirect_uris,
            scope: scope.as_parts().to_vec(),
            software_statement,
            encryption_alg: encryption_alg.to_string(),
            encryption_key,
        })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::SerializationFailed)
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("client_name", &self.client_name)
            .field("client_name_en", &self.client_name_en)
            .field("application_type", &self.application_type)
            .field("redirect_uris", &self.redirect_uris)
            .field("scope", &self.scope)
            .field("software_statement", &self.software_statement)
            .field("encryption_alg", &self.encryption_alg)
            .field("encryption_key", &"***********")
            .finish()
    }
}

/// Query parameters of the sign-on redirect.
#[derive(Debug)]
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRedirect {
    pub registration_request: String,
}

/// Query of `GET /register/software-statement`.
#[derive(Debug, Default)]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareStatementQuery {
    pub software_name: Option<String>,
}

/// Query of `GET /register/client`.
#[derive(Debug, Default)]
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCallback {
    pub salt: Option<String>,
    pub encrypted_data: Option<String>,
}

impl RegistrationCallback {
    pub fn into_envelope(self) -> Result<EncryptedCredentialEnvelope, Error> {
        let salt = self
            .salt
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::InvalidArgument("salt"))?;
        let encrypted_data = self
            .encrypted_data
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::InvalidArgument("encryptedData"))?;
        Ok(EncryptedCredentialEnvelope {
            salt,
            encrypted_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegistrationRequest {
        RegistrationRequest::new(
            "My App",
            None,
            APPLICATION_TYPE_WEB,
            vec![RedirectUri::new("https://app.example/authorize/oauth2").unwrap()],
            &Scope::adaa(),
            SoftwareStatement::new("eyJhbGciOi.statement.sig").unwrap(),
            SecretKey::new("c2VjcmV0").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn serializes_with_registration_service_field_names() {
        let json: serde_json::Value = serde_json::from_str(&request().to_json().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "client_name": "My App",
                "application_type": "web",
                "redirect_uris": ["https://app.example/authorize/oauth2"],
                "scope": ["adaa"],
                "software_statement": "eyJhbGciOi.statement.sig",
                "encryption_alg": "AES-256",
                "encryption_key": "c2VjcmV0",
            })
        );
    }

    #[test]
    fn english_name_is_sent_when_present() {
        let req = RegistrationRequest::new(
            "Moje aplikace",
            Some("My App"),
            APPLICATION_TYPE_WEB,
            vec![RedirectUri::new("https://app.example/authorize/oauth2").unwrap()],
            &Scope::adaa(),
            SoftwareStatement::new("jwt").unwrap(),
            SecretKey::new("c2VjcmV0").unwrap(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(json["client_name_en"], "My App");
    }

    #[test]
    fn missing_fields_fail_at_construction() {
        let statement = SoftwareStatement::new("jwt").unwrap();
        let key = SecretKey::new("c2VjcmV0").unwrap();

        let no_uris = RegistrationRequest::new(
            "My App",
            None,
            APPLICATION_TYPE_WEB,
            vec![],
            &Scope::adaa(),
            statement.clone(),
            key.clone(),
        );
        assert!(matches!(no_uris, Err(Error::InvalidArgument("redirect_uris"))));

        let no_name = RegistrationRequest::new(
            " ",
            None,
            APPLICATION_TYPE_WEB,
            vec![RedirectUri::new("https://app.example/authorize/oauth2").unwrap()],
            &Scope::adaa(),
            statement,
            key,
        );
        assert!(matches!(no_name, Err(Error::InvalidArgument("client_name"))));
    }

    #[test]
    fn debug_output_masks_encryption_key() {
        let output = format!("{:?}", request());
        assert!(!output.contains("c2VjcmV0"));
    }

    #[test]
    fn callback_requires_both_parameters() {
        let missing_salt = RegistrationCallback {
            salt: None,
            encrypted_data: Some("ZGF0YQ".to_string()),
        };
        assert!(matches!(missing_salt.into_envelope(), Err(Error::InvalidArgument("salt"))));

        let blank_data = RegistrationCallback {
            salt: Some("c2FsdA".to_string()),
            encrypted_data: Some("  ".to_string()),
        };
        assert!(matches!(
            blank_data.into_envelope(),
            Err(Error::InvalidArgument("encryptedData"))
        ));
    }

    #[test]
    fn software_statement_request_uses_camel_case() {
        let req = SoftwareStatementRequest {
            software_name: "My App".to_string(),
            software_id: "softwareId".to_string(),
            software_version: "1.0".to_string(),
            software_uri: "https://app.example/".to_string(),
            redirect_uris: vec![RedirectUri::new("https://app.example/authorize/oauth2").unwrap()],
            registration_back_uri: RedirectUri::new("https://app.example/register/client").unwrap(),
            token_endpoint_auth_method: TokenEndpointAuthMethod::ClientSecretPost,
            grant_types: vec!["authorization_code".to_string()],
            response_types: vec!["code".to_string()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["registrationBackUri"], "https://app.example/register/client");
        assert_eq!(json["tokenEndpointAuthMethod"], "client_secret_post");
        assert_eq!(json["grantTypes"][0], "authorization_code");
    }
}
