use std::sync::Arc;

use tracing::info;
use warp::Filter;

use crate::provider::OpenBankingProvider;

mod endpoints;

use endpoints::{
    accounts::accounts_endpoint,
    authorization::authorization_endpoint,
    registration::registration_endpoint,
};

use super::encoding::error::handle_reject;

#[derive(Debug)]
pub struct Server {
    provider: Arc<OpenBankingProvider>,
}

impl Server {
    pub fn new(provider: Arc<OpenBankingProvider>) -> Self {
        Self { provider }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection>
           + Clone
           + Send
           + Sync
           + 'static {
        let provider = self.provider.clone();

        let registration = registration_endpoint(provider.clone());
        let authorization = authorization_endpoint(provider.clone());
        let accounts = accounts_endpoint(provider);

        registration
            .or(authorization)
            .or(accounts)
            .recover(handle_reject)
    }

    pub async fn serve(self) {
        let addr = self.provider.config().listen_addr;
        let routes = self.routes().with(warp::log("adaa_client::http"));

        info!(%addr, "listening");
        warp::serve(routes).run(addr).await;
    }
}
