use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::auth::error::{ErrorKind, ErrorResponse};
use crate::provider::error::Error;

#[derive(Debug)]
pub struct ProviderRejection(pub Error);

impl warp::reject::Reject for ProviderRejection {}

impl From<Error> for ProviderRejection {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl ProviderRejection {
    fn kind(&self) -> ErrorKind {
        match self.0 {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::DecryptionFailed { .. } => ErrorKind::DecryptionFailed,
            Error::ClientRegistrationParseFailed(_) => ErrorKind::ClientRegistrationParseFailed,
            Error::SerializationFailed(_) => ErrorKind::SerializationFailed,
            Error::StatementRequestFailed(_) => ErrorKind::StatementRequestFailed,
            Error::NotRegistered => ErrorKind::NotRegistered,
            Error::NoActiveFlow => ErrorKind::NoActiveFlow,
            Error::AuthorizationFailed(_) => ErrorKind::AuthorizationFailed,
            Error::RemoteCallFailed(_) => ErrorKind::RemoteCallFailed,
        }
    }

    fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidArgument
            | ErrorKind::DecryptionFailed
            | ErrorKind::ClientRegistrationParseFailed => StatusCode::BAD_REQUEST,
            ErrorKind::SerializationFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::StatementRequestFailed | ErrorKind::RemoteCallFailed => {
                StatusCode::BAD_GATEWAY
            }
            ErrorKind::NotRegistered | ErrorKind::NoActiveFlow => StatusCode::CONFLICT,
            ErrorKind::AuthorizationFailed => StatusCode::UNAUTHORIZED,
        }
    }

    fn response(&self) -> ErrorResponse<ErrorKind> {
        let description = match &self.0 {
            Error::DecryptionFailed { .. } => {
                "credential payload could not be decrypted".to_string()
            }
            Error::ClientRegistrationParseFailed(_) => {
                "cannot parse client registration data".to_string()
            }
            other => other.to_string(),
        };
        ErrorResponse {
            kind: self.kind(),
            description: Some(description),
            uri: None,
        }
    }
}

pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<ProviderRejection>() {
        Some(e) => {
            warn!(error = %e.0, "request failed");
            let resp = warp::reply::json(&e.response());
            Ok(warp::reply::with_status(resp, e.status()).into_response())
        }
        _ => Err(err),
    }
}
