use std::path::Path;

use anyhow::{Context, bail};
use serde::Serialize;
use trial_ingest::Outcome;
use trial_ingest::upload::check_upload;

use crate::cli::{GlobalFlags, UploadArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse<'a> {
    file: String,
    created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> UploadResponse<'a> {
    fn new(file: &Path, outcome: &'a Outcome) -> Self {
        Self {
            file: file.display().to_string(),
            created: outcome.is_created(),
            id: outcome.id(),
            reason: outcome.reason(),
        }
    }
}

/// Handle `trials upload`. A rejected document is printed and then reported
/// as an error so the exit status is nonzero.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let len = tokio::fs::metadata(&args.file)
        .await
        .with_context(|| format!("failed to stat {}", args.file.display()))?
        .len();
    check_upload(file_name, len, &ctx.config.upload)?;

    let file = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let mut uow = ctx.db.unit_of_work();
    let outcome = ctx.pipeline.ingest(&mut uow, file, len).await?;

    output(&UploadResponse::new(&args.file, &outcome), flags.format)?;
    if let Outcome::Rejected(reason) = outcome {
        bail!("upload rejected: {reason}");
    }
    Ok(())
}
