use std::sync::Arc;

use anyhow::Context;
use trial_config::TrialsConfig;
use trial_db::TrialDb;
use trial_ingest::{EventSink, IngestionPipeline, JsonlSink, TracingSink};
use trial_schema::SchemaValidator;

pub type Sinks = Vec<Box<dyn EventSink + Send + Sync>>;

/// Everything a command needs once configuration is resolved.
pub struct AppContext {
    pub config: TrialsConfig,
    pub db: TrialDb,
    pub pipeline: IngestionPipeline<Sinks>,
}

impl AppContext {
    pub async fn init(config: TrialsConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config.database.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let db = TrialDb::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        let validator = Arc::new(SchemaValidator::new());
        let mut sinks: Sinks = vec![Box::new(TracingSink)];
        if let Some(dir) = &config.events.trail_dir {
            let jsonl = JsonlSink::new(dir, Arc::clone(&validator))
                .with_context(|| format!("failed to prepare event trail in {}", dir.display()))?;
            sinks.push(Box::new(jsonl));
        }

        Ok(Self {
            config,
            db,
            pipeline: IngestionPipeline::new(validator, sinks),
        })
    }
}
