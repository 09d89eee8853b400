use campus_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MessageCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &MessageCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let me = ctx.require_user().await?;
    match action {
        MessageCommands::Send {
            group_id,
            content,
            attachments,
        } => {
            let message = ctx
                .service
                .send_message(group_id, &me.user_id, content, attachments)
                .await?;
            output(&message, flags.format)
        }
        MessageCommands::List { group_id, offset } => {
            // Group chat is visible to members only.
            let group = ctx.service.get_study_group(group_id).await?;
            if !group.is_member(&me.user_id) {
                return Err(CoreError::Forbidden(format!("not a member of study group {group_id}")).into());
            }
            let messages = ctx
                .service
                .list_messages(group_id, ctx.message_page(flags, *offset))
                .await?;
            output(&messages, flags.format)
        }
    }
}
