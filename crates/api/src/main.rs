use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scribekit_api::{build_router, state::AppState};
use scribekit_config::Settings;
use scribekit_transcription::{FfprobeDurationProbe, ProviderConfig, SpeechmaticsProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    if settings.provider.api_key.is_empty() {
        anyhow::bail!(
            "transcription provider API key not configured; set SCRIBEKIT__PROVIDER__API_KEY"
        );
    }

    let provider = Arc::new(SpeechmaticsProvider::new(ProviderConfig {
        api_key: settings.provider.api_key.clone(),
        base_url: settings.provider.base_url.clone(),
        poll_interval: Duration::from_secs(settings.provider.poll_interval_secs),
        job_timeout: Duration::from_secs(settings.provider.job_timeout_secs),
    }));
    let probe = Arc::new(FfprobeDurationProbe::new(Duration::from_secs(
        settings.probe.timeout_secs,
    )));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(Arc::new(settings), provider, probe);
    let router = build_router(state);

    tracing::info!("Listening on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
