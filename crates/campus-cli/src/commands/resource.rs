use campus_db::repos::NewResource;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResourceCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &ResourceCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ResourceCommands::Create {
            title,
            description,
            kind,
            course_code,
            files,
        } => {
            let me = ctx.require_user().await?;
            let new = NewResource {
                title: title.clone(),
                description: description.clone(),
                kind: parse_enum(kind, "kind")?,
                course_code: course_code.clone(),
                files: files.clone(),
            };
            output(&ctx.service.create_resource(&me.user_id, &new).await?, flags.format)
        }
        ResourceCommands::List { offset } => {
            let resources = ctx.service.list_resources(ctx.page(flags, *offset)).await?;
            output(&resources, flags.format)
        }
        ResourceCommands::Download { id } => {
            output(&ctx.service.record_download(id).await?, flags.format)
        }
    }
}
