use anyhow::Context;
use trial_config::TrialsConfig;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TrialsConfig> {
    match &flags.config {
        Some(path) => {
            let _ = dotenvy::dotenv();
            TrialsConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => TrialsConfig::load_with_dotenv().context("failed to load configuration"),
    }
}
