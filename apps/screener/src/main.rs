mod config;
mod console;
mod db;
mod errors;
mod intake;
mod interview;
mod llm_client;
mod persistence;
mod session;
mod state;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::console::{Console, RunOutcome};
use crate::interview::capability::{LlmQuestionSource, QuestionSource};
use crate::interview::generator::QuestionGenerator;
use crate::llm_client::LlmClient;
use crate::persistence::jsonl::JsonlRecordSink;
use crate::persistence::postgres::PgRecordSink;
use crate::persistence::{PrivacyAdapter, RecordSink};
use crate::session::registry::SessionRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout belongs to the conversation.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let source = build_question_source(&config)?;
    let generator = Arc::new(QuestionGenerator::new(source, config.generation_timeout));

    let sink = build_record_sink(&config).await?;
    info!("Records go to the {} sink", sink.name());
    let persistence = Arc::new(PrivacyAdapter::new(sink));

    let state = AppState {
        generator,
        persistence,
        sessions: SessionRegistry::new(),
        config,
    };

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    match console.run(&state).await? {
        RunOutcome::Declined => info!("Consent declined; nothing stored"),
        RunOutcome::Abandoned => info!("Input closed before the conversation ended"),
        RunOutcome::Completed(closing) => info!("Session completed: {:?}", closing.persistence),
    }

    Ok(())
}

/// The LLM tier is only available when a provider key is configured.
fn build_question_source(config: &Config) -> Result<Option<Arc<dyn QuestionSource>>> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        info!("ANTHROPIC_API_KEY not set; questions come from the fallback bank");
        return Ok(None);
    };

    let llm = LlmClient::new(
        api_key,
        config.generation_model.clone(),
        config.generation_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());
    Ok(Some(Arc::new(LlmQuestionSource::new(llm))))
}

async fn build_record_sink(config: &Config) -> Result<Arc<dyn RecordSink>> {
    match &config.database_url {
        Some(url) => Ok(Arc::new(PgRecordSink::connect(url).await?)),
        None => {
            let sink = JsonlRecordSink::new(config.records_path.clone());
            info!("Appending records to {}", sink.path().display());
            Ok(Arc::new(sink))
        }
    }
}
