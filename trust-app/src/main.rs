use std::process::ExitCode;

use error_stack::{Report, ResultExt};
use error_stack::fmt::ColorMode;
use repositories::cloudinary::CloudinaryStore;
use repositories::memory::MemoryEngine;
use repositories::mongodb::{ConnectionDetails, MongoEngine};
use routing::TokenKeys;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use trust_core::ContentEngine;
use trust_core::defaults::SingletonDefaults;
use trust_routes::routes;
use trust_routes::state::TrustAppState;

use crate::app::{AppError, AppResult};
use crate::config::{AppConfig, Storage};

mod app;
mod config;

#[tokio::main]
async fn main() -> ExitCode {
    match try_main().await {
        Ok(_) => {
            info!("trust service shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("trust service exited with error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> AppResult<()> {
    init_logging();

    if let Err(e) = dotenv::dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let config = AppConfig::from_env().change_context(AppError)?;
    let defaults = config.singleton_defaults().change_context(AppError)?;

    match &config.storage {
        Storage::Mongo { uri, db_name } => {
            let engine = MongoEngine::connect(
                ConnectionDetails::Url(uri.clone()),
                db_name,
                CloudinaryStore::new(config.cloudinary.clone()),
            )
            .await
            .change_context(AppError)
            .attach("could not reach MONGO_URI")?;
            engine.ensure_indexes().await.change_context(AppError)?;
            info!("connected to database '{db_name}'");

            serve(engine, defaults, &config).await
        }
        Storage::Memory => serve(MemoryEngine::new(), defaults, &config).await,
    }
}

async fn serve<E: ContentEngine>(
    engine: E,
    defaults: SingletonDefaults,
    config: &AppConfig,
) -> AppResult<()> {
    let metrics_handle = if config.metrics_enabled {
        Some(routing::metrics::setup_recorder().change_context(AppError)?)
    } else {
        None
    };

    let keys = TokenKeys::from_secret(config.jwt_secret.as_bytes(), config.jwt_expiry);
    let state = TrustAppState::new(engine, defaults, keys, config.bcrypt_cost)
        .with_upload_limit(config.upload_limit_bytes);

    app::run(routes::build(state, metrics_handle), config.port).await
}

fn init_logging() {
    Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("TRUST_LOG"))
        .init();
}
