use crate::cli::GlobalFlags;
use crate::cli::subcommands::DmCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &DmCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let me = ctx.require_user().await?;
    match action {
        DmCommands::Send {
            recipient_id,
            content,
        } => {
            let message = ctx
                .service
                .send_direct_message(&me.user_id, recipient_id, content)
                .await?;
            output(&message, flags.format)
        }
        DmCommands::List { peer_id, offset } => {
            let messages = ctx
                .service
                .list_conversation(&me.user_id, peer_id, ctx.message_page(flags, *offset))
                .await?;
            output(&messages, flags.format)
        }
        DmCommands::Conversations => {
            output(&ctx.service.list_conversations(&me.user_id).await?, flags.format)
        }
    }
}
