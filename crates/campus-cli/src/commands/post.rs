use crate::cli::GlobalFlags;
use crate::cli::subcommands::PostCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &PostCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        PostCommands::List { offset } => {
            let posts = ctx.service.list_posts(ctx.page(flags, *offset)).await?;
            output(&posts, flags.format)
        }
        PostCommands::Create { content, images } => {
            let me = ctx.require_user().await?;
            let post = ctx.service.create_post(&me.user_id, content, images).await?;
            output(&post, flags.format)
        }
        PostCommands::Like { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.like_post(id, &me.user_id).await?, flags.format)
        }
        PostCommands::Unlike { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.unlike_post(id, &me.user_id).await?, flags.format)
        }
        PostCommands::Comment { id, content } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.add_comment(id, &me.user_id, content).await?, flags.format)
        }
    }
}
