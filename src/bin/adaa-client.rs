use std::sync::Arc;

use clap::Parser;
use tracing::error;

use adaa_client::http::client::BankClient;
use adaa_client::http::server::Server;
use adaa_client::provider::config::StartupError;
use adaa_client::provider::OpenBankingProvider;
use adaa_client::util::cli::Options;

async fn adaa_client(opts: Options) -> Result<(), StartupError> {
    let config = Arc::new(opts.into_config()?);
    let client = Arc::new(BankClient::from_config(&config)?);
    let provider = Arc::new(OpenBankingProvider::new(config, client));

    Server::new(provider).serve().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let opts = Options::parse();
    if let Err(e) = adaa_client(opts).await {
        error!(error = %e, "startup failed");
        std::process::exit(1);
    }
}
