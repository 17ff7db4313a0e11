/// Expensify - track expenses kept in a realtime database
use clap::Parser;
use expensify_cli::{App, AppConfig, Cli};
use expensify_remote::RemoteStoreClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expensify=info,expensify_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let client = RemoteStoreClient::new(config.remote_config())?;
    let session = config.session()?;
    tracing::debug!(url = %client.url().await, user = %session.user_id(), "Remote store configured");

    let mut app = match App::start(Arc::new(client), session).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load expenses");
            return Err(e.into());
        }
    };

    let output = app.run(cli.command).await?;
    println!("{}", output);

    Ok(())
}
