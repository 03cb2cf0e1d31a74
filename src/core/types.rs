use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::provider::error::Error;

/// Scope requested for the ADAA API.
pub const ADAA_SCOPE: &str = "adaa";

fn non_blank(field: &'static str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        Err(Error::InvalidArgument(field))
    } else {
        Ok(value)
    }
}

macro_rules! non_blank_newtype {
    ($name:ident, $field:literal) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, Error> {
                non_blank($field, value.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

macro_rules! redacted_debug {
    ($name:ident) => {
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(***)"))
            }
        }
    };
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);
non_blank_newtype!(ClientId, "client_id");

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClientSecret(String);
non_blank_newtype!(ClientSecret, "client_secret");
redacted_debug!(ClientSecret);

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
non_blank_newtype!(AccessToken, "access_token");
redacted_debug!(AccessToken);

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthCode(String);
non_blank_newtype!(AuthCode, "code");
redacted_debug!(AuthCode);

/// Anti-CSRF value correlating an authorization callback with its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct State(pub(crate) String);
non_blank_newtype!(State, "state");

/// Signed JWT issued by the software statement API, passed on untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SoftwareStatement(String);
non_blank_newtype!(SoftwareStatement, "software_statement");

/// Base64 encoded AES-256 key shared with the registration service.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SecretKey(String);
non_blank_newtype!(SecretKey, "secret");
redacted_debug!(SecretKey);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RedirectUri(String);
non_blank_newtype!(RedirectUri, "redirect_uri");

impl RedirectUri {
    /// Appends `path` to `base`, tolerating a trailing slash on the base.
    pub fn from_base(base: &str, path: &str) -> Result<Self, Error> {
        let base = non_blank("base_uri", base.to_string())?;
        Self::new(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

impl fmt::Display for RedirectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(Vec<String>);

impl Scope {
    pub fn adaa() -> Self {
        Self(vec![ADAA_SCOPE.to_string()])
    }

    pub fn as_joined(&self) -> String {
        self.0.join(" ")
    }

    pub fn as_parts(&self) -> &[String] {
        &self.0
    }
}

impl Serialize for Scope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(matches!(
            ClientId::new("   "),
            Err(Error::InvalidArgument("client_id"))
        ));
        assert!(matches!(AccessToken::new(""), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn redirect_uri_joins_base_with_or_without_slash() {
        let a = RedirectUri::from_base("https://app.example/", "/authorize/oauth2").unwrap();
        let b = RedirectUri::from_base("https://app.example", "authorize/oauth2").unwrap();
        assert_eq!(a.as_str(), "https://app.example/authorize/oauth2");
        assert_eq!(a, b);
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let secret = ClientSecret::new("hunter2").unwrap();
        let token = AccessToken::new("tok-123").unwrap();
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert!(!format!("{:?}", token).contains("tok-123"));
    }

    #[test]
    fn deserializing_blank_client_id_fails() {
        let parsed: Result<ClientId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }
}
