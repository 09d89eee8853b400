use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler. `serve` is handled before a context exists.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(_) => anyhow::bail!("serve is started before the command context"),
        Commands::Migrate => commands::migrate::handle(ctx, flags).await,
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags).await,
        Commands::Post { action } => commands::post::handle(&action, ctx, flags).await,
        Commands::Book { action } => commands::book::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Group { action } => commands::group::handle(&action, ctx, flags).await,
        Commands::Message { action } => commands::message::handle(&action, ctx, flags).await,
        Commands::Dm { action } => commands::dm::handle(&action, ctx, flags).await,
        Commands::Resource { action } => commands::resource::handle(&action, ctx, flags).await,
    }
}
