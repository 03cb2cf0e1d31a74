use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::core::types::SecretKey;
use crate::provider::config::{Config, Keystore, StartupError};
use crate::util::cipher::validate_secret_key;

#[derive(Parser)]
#[clap(
    name = "adaa-client",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION")
)]
pub struct Options {
    #[clap(long, env = "ADAA_API_KEY", hide_env_values = true)]
    api_key: String,
    #[clap(long, env = "CLIENT_REGISTRATION_URI")]
    client_registration_uri: Url,
    #[clap(long, env = "SOFTWARE_STATEMENT_URI")]
    software_statement_uri: Url,
    #[clap(long, env = "ADAA_URI")]
    adaa_uri: Url,
    #[clap(long, env = "AUTHORIZATION_URI")]
    authorization_uri: Url,
    #[clap(long, env = "ACCESS_TOKEN_URI")]
    access_token_uri: Url,
    /// Base64 encoded 256-bit key used during client registration
    #[clap(long, env = "ADAA_SECRET", hide_env_values = true)]
    secret: String,
    #[clap(long, env = "KEYSTORE_LOCATION", parse(from_os_str))]
    keystore_location: PathBuf,
    #[clap(long, env = "KEYSTORE_PASSWORD", hide_env_values = true)]
    keystore_password: String,
    /// Public base URI of this application
    #[clap(long, env = "BASE_URI")]
    base_uri: Url,
    #[clap(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8080")]
    listen_addr: SocketAddr,
}

impl Options {
    pub fn into_config(self) -> Result<Config, StartupError> {
        if self.api_key.trim().is_empty() {
            return Err(StartupError::MissingValue("ADAA_API_KEY"));
        }
        let secret =
            SecretKey::new(self.secret).map_err(|_| StartupError::MissingValue("ADAA_SECRET"))?;
        if !validate_secret_key(&secret) {
            return Err(StartupError::InvalidSecret);
        }

        Ok(Config {
            api_key: self.api_key,
            client_registration_uri: self.client_registration_uri,
            software_statement_uri: self.software_statement_uri,
            adaa_uri: self.adaa_uri,
            authorization_uri: self.authorization_uri,
            access_token_uri: self.access_token_uri,
            secret,
            keystore: Some(Keystore {
                location: self.keystore_location,
                password: self.keystore_password,
            }),
            base_uri: self.base_uri,
            listen_addr: self.listen_addr,
        })
    }
}
