use std::sync::Arc;

use warp::Filter;

use crate::auth::{AuthorizationCallback, NoParams, Redirect};
use crate::core::types::RedirectUri;
use crate::http::encoding::reply;
use crate::provider::{OpenBankingProvider, ACCOUNTS_PATH};

pub fn authorization_endpoint(
    provider: Arc<OpenBankingProvider>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_provider = warp::any().map(move || provider.clone());

    let oauth2 = warp::path!("oauth2")
        .and(warp::get())
        .and(with_provider)
        .and(warp::query::<AuthorizationCallback>())
        .and_then(|provider: Arc<OpenBankingProvider>, query: AuthorizationCallback| async move {
            let base_uri = provider.config().base_uri.to_string();
            let result = provider
                .finish_authorization(query.code.as_deref(), query.state.as_deref())
                .await
                .and_then(|_| RedirectUri::from_base(&base_uri, ACCOUNTS_PATH))
                .map(|uri| Redirect::new(uri, NoParams {}));
            reply::reply(result)
        });

    warp::path("authorize").and(oauth2)
}
