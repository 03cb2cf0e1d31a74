use std::sync::Arc;

use warp::Filter;

use crate::auth::{RegistrationCallback, SoftwareStatementQuery};
use crate::http::encoding::reply;
use crate::provider::OpenBankingProvider;

pub fn registration_endpoint(
    provider: Arc<OpenBankingProvider>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_provider = warp::any().map(move || provider.clone());

    let software_statement = warp::path!("software-statement")
        .and(warp::get())
        .and(with_provider.clone())
        .and(warp::query::<SoftwareStatementQuery>())
        .and_then(|provider: Arc<OpenBankingProvider>, query: SoftwareStatementQuery| async move {
            let base_uri = provider.config().base_uri.to_string();
            let result = provider
                .register_software(query.software_name.as_deref(), &base_uri)
                .await;
            reply::reply(result)
        });

    // registration service sends the sealed credentials back here
    let client = warp::path!("client")
        .and(warp::get())
        .and(with_provider.clone())
        .and(warp::query::<RegistrationCallback>())
        .and_then(|provider: Arc<OpenBankingProvider>, query: RegistrationCallback| async move {
            let base_uri = provider.config().base_uri.to_string();
            let result = query
                .into_envelope()
                .and_then(|envelope| provider.complete_registration(&envelope, &base_uri));
            reply::reply(result)
        });

    warp::path("register").and(software_statement.or(client))
}
