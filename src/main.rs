use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docmark::application::services::{ConversionService, ScratchSpace};
use docmark::infrastructure::TokioClock;
use docmark::infrastructure::extraction::ExtractorFactory;
use docmark::infrastructure::observability::{TracingConfig, init_tracing};
use docmark::infrastructure::storage::StorageSinkFactory;
use docmark::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, environment) = Settings::load().context("loading settings")?;

    let tracing_config = TracingConfig::from_settings(&settings.logging, environment);
    init_tracing(&tracing_config, settings.server.port);

    let scratch = match &settings.scratch.dir {
        Some(dir) => ScratchSpace::new(dir)
            .with_context(|| format!("creating scratch directory {}", dir.display()))?,
        None => ScratchSpace::system(),
    };
    tracing::info!(scratch = %scratch.root().display(), "Scratch space ready");

    let storage = StorageSinkFactory::create(&settings.storage).context("building storage sink")?;
    let converters = ExtractorFactory::create(
        &settings,
        Arc::clone(&storage),
        scratch.clone(),
        Arc::new(TokioClock),
    )
    .context("building converters")?;

    let conversion_service = Arc::new(ConversionService::new(converters, storage, scratch));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let router = create_router(AppState::new(conversion_service, settings));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
