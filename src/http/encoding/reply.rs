use tracing::error;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::Rejection;

use super::error::ProviderRejection;
use crate::auth::{MaybeRedirect, Redirect};

impl<T: serde::Serialize + Send> Reply for Redirect<T> {
    fn into_response(self) -> Response {
        match self.to_url() {
            Ok(url) => {
                warp::reply::with_header(StatusCode::SEE_OTHER, "location", url.to_string())
                    .into_response()
            }
            Err(e) => {
                error!(error = %e, "cannot build redirect location");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<R: serde::Serialize + Send, D: Reply> Reply for MaybeRedirect<R, D> {
    fn into_response(self) -> Response {
        match self {
            Self::Redirected(r) => r.into_response(),
            Self::Direct(d) => d.into_response(),
        }
    }
}

pub fn reply<T, E>(result: Result<T, E>) -> Result<Response, Rejection>
where
    T: Reply,
    E: Into<ProviderRejection>,
{
    result
        .map(|t| t.into_response())
        .map_err(|e| warp::reject::custom(e.into()))
}
