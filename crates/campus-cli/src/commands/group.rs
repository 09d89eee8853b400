use campus_db::repos::NewStudyGroup;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GroupCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &GroupCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        GroupCommands::Create {
            name,
            description,
            course_code,
            max_members,
        } => {
            let me = ctx.require_user().await?;
            let new = NewStudyGroup {
                name: name.clone(),
                description: description.clone(),
                course_code: course_code.clone(),
                max_members: *max_members,
            };
            output(&ctx.service.create_study_group(&me.user_id, &new).await?, flags.format)
        }
        GroupCommands::List { offset } => {
            let groups = ctx.service.list_study_groups(ctx.page(flags, *offset)).await?;
            output(&groups, flags.format)
        }
        GroupCommands::Get { id } => output(&ctx.service.get_study_group(id).await?, flags.format),
        GroupCommands::Join { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.join_study_group(id, &me.user_id).await?, flags.format)
        }
        GroupCommands::Leave { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.leave_study_group(id, &me.user_id).await?, flags.format)
        }
        GroupCommands::Close { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.close_study_group(&me.user_id, id).await?, flags.format)
        }
    }
}
