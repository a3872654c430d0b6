use trial_core::enums::TrialStatus;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `trials list`.
pub async fn handle(
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = status.map(str::parse::<TrialStatus>).transpose()?;
    let trials = ctx.db.list_trials(status).await?;
    output(&trials, flags.format)
}
