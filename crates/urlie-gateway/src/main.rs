mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{Cli, StorageModeArg};
use crate::state::AppState;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use urlie_generator::RandomCodeGenerator;
use urlie_service::{LinkService, PersistentService, StatelessService};
use urlie_store::RedisKvStore;
use urlie_token::TokenCodec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Cli::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_mode = %config.storage,
        "starting urlie gateway"
    );

    let service = match config.storage {
        StorageModeArg::Persistent => {
            let redis_url = config
                .redis_url
                .ok_or("redis url is required when storage mode is persistent")?;
            let store = RedisKvStore::connect(&redis_url).await?;
            LinkService::Persistent(PersistentService::new(
                Arc::new(store),
                Arc::new(RandomCodeGenerator::new()),
                config.base_url,
            ))
        }
        StorageModeArg::Stateless => {
            let secret = config
                .secret
                .ok_or("signing secret is required when storage mode is stateless")?;
            LinkService::Stateless(StatelessService::new(
                TokenCodec::new(&secret),
                config.base_url,
            ))
        }
    };

    let router = App::router(AppState::new(Arc::new(service)));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router).await?;
    Ok(())
}
