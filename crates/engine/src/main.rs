//! Statblock Engine - Main entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statblock_engine::config::{EngineConfig, Location};
use statblock_engine::infrastructure::files::{
    FilePayloadSource, FileSink, StdinPayloadSource, StdoutSink,
};
use statblock_engine::infrastructure::ports::{PayloadSource, StatBlockSink};
use statblock_engine::ImportCharacter;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root, then the working directory.
    load_dotenv();

    // Initialize logging; stdout is reserved for the document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statblock_engine=info,statblock_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EngineConfig::from_env_and_args(std::env::args().skip(1))
        .context("Failed to load configuration")?;

    tracing::debug!(
        input = %config.input,
        output = %config.output,
        format = %config.format,
        validate = config.validate,
        "Configuration loaded"
    );

    let source: Arc<dyn PayloadSource> = match &config.input {
        Location::Stdio => Arc::new(StdinPayloadSource),
        Location::File(path) => Arc::new(FilePayloadSource::new(path)),
    };
    let sink: Arc<dyn StatBlockSink> = match &config.output {
        Location::Stdio => Arc::new(StdoutSink),
        Location::File(path) => Arc::new(FileSink::new(path)),
    };

    ImportCharacter::new(source, sink)
        .with_format(config.format)
        .with_validation(config.validate)
        .execute()
        .with_context(|| format!("Failed to import character from {}", config.input))?;

    Ok(())
}

fn load_dotenv() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }

    let _ = dotenvy::dotenv();
}
