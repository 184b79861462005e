use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use ledgerlens::application::services::{
    ContentGate, ExtractionPipeline, MediaLimits, PersistenceGate, PipelineOptions,
    PromptTemplates,
};
use ledgerlens::infrastructure::llm::{DEFAULT_TEMPLATE, ExtractorFactory};
use ledgerlens::infrastructure::observability::{TracingConfig, init_tracing};
use ledgerlens::infrastructure::persistence::{
    ConnectionLiveness, PgTransactionRepository, create_lazy_pool, create_pool, run_migrations,
};
use ledgerlens::infrastructure::recognition::RecognizerFactory;
use ledgerlens::presentation::{AppState, Environment, Settings, create_router};

const BYTES_PER_MB: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = match std::env::var("APP_ENVIRONMENT") {
        Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        Err(_) => Environment::default(),
    };
    let settings = Settings::load(environment).context("failed to load configuration")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json || environment.is_prod(),
        &settings.logging.level,
    ))
    .context("failed to initialize tracing")?;

    let liveness = Arc::new(ConnectionLiveness::new(false));
    let database = &settings.database;
    let pool = match create_pool(&database.url, database.max_connections).await {
        Ok(pool) => {
            if database.run_migrations {
                run_migrations(&pool).await?;
            }
            liveness.mark_up();
            pool
        }
        Err(e) => {
            tracing::warn!(error = %e, "Storage unreachable at startup, records will not be saved");
            create_lazy_pool(&database.url, database.max_connections)?
        }
    };
    let repository = Arc::new(PgTransactionRepository::new(pool.clone()));

    let extractor = ExtractorFactory::create(
        settings.extraction.provider,
        &settings.gemini,
        &settings.bedrock,
        &settings.retry,
    )?;
    let speech_recognizer = RecognizerFactory::speech(&settings.transcription)?;
    let document_recognizer = RecognizerFactory::document(&settings.vision);
    let classifier = RecognizerFactory::classifier(&settings.vision);

    let templates = PromptTemplates {
        document: load_template(settings.extraction.document_template_path.as_deref()).await,
        speech: load_template(settings.extraction.speech_template_path.as_deref()).await,
    };
    let limits = MediaLimits {
        max_image_bytes: settings.media.max_image_mb * BYTES_PER_MB,
        max_audio_bytes: settings.media.max_audio_mb * BYTES_PER_MB,
    };
    let max_upload_bytes = limits.max_image_bytes.max(limits.max_audio_bytes);

    let pipeline = Arc::new(ExtractionPipeline::new(
        ContentGate::new(classifier, settings.gate.threshold),
        document_recognizer,
        speech_recognizer,
        extractor,
        PersistenceGate::new(liveness.clone(), repository),
        PipelineOptions {
            templates,
            limits,
            temp_dir: settings.media.temp_dir.as_ref().map(PathBuf::from),
        },
    ));

    let router = create_router(AppState::new(pipeline, max_upload_bytes));

    let host: std::net::IpAddr = settings
        .server
        .host
        .parse()
        .context("invalid server.host")?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!(
        %addr,
        environment = %environment,
        provider = settings.extraction.provider.as_str(),
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    liveness.mark_down();
    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn load_template(path: Option<&str>) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return DEFAULT_TEMPLATE.to_string();
    };
    match tokio::fs::read_to_string(path).await {
        Ok(template) if !template.trim().is_empty() => template,
        Ok(_) => {
            tracing::warn!(path, "Prompt template is empty, using the built-in one");
            DEFAULT_TEMPLATE.to_string()
        }
        Err(e) => {
            tracing::warn!(path, error = %e, "Prompt template unreadable, using the built-in one");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
