use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `trials get`.
pub async fn handle(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(trial) = ctx.db.get_trial(id).await? else {
        bail!("trial '{id}' not found");
    };
    output(&trial, flags.format)
}
