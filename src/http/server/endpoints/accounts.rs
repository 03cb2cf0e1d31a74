use std::sync::Arc;

use warp::Filter;

use crate::auth::MaybeRedirect;
use crate::http::encoding::reply;
use crate::provider::OpenBankingProvider;

pub fn accounts_endpoint(
    provider: Arc<OpenBankingProvider>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_provider = warp::any().map(move || provider.clone());

    warp::path!("accounts")
        .and(warp::get())
        .and(with_provider)
        .and_then(|provider: Arc<OpenBankingProvider>| async move {
            let base_uri = provider.config().base_uri.to_string();
            let result = provider.accounts(&base_uri).await.map(|r| match r {
                MaybeRedirect::Redirected(consent) => MaybeRedirect::Redirected(consent),
                MaybeRedirect::Direct(accounts) => {
                    MaybeRedirect::Direct(warp::reply::json(&accounts))
                }
            });
            reply::reply(result)
        })
}
