pub mod get;
pub mod list;
pub mod schema;
pub mod upload;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Upload(args) => upload::handle(&args, ctx, flags).await,
        Commands::Get { id } => get::handle(&id, ctx, flags).await,
        Commands::List { status } => list::handle(status.as_deref(), ctx, flags).await,
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
