use campus_db::updates::ProfileUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &ProfileCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let me = ctx.require_user().await?;
    match action {
        ProfileCommands::Show { id } => {
            let id = id.as_deref().unwrap_or(me.user_id.as_str());
            output(&ctx.service.get_profile(id).await?, flags.format)
        }
        ProfileCommands::Update {
            full_name,
            department,
            student_id,
            phone,
            bio,
            avatar_url,
            clear_avatar,
        } => {
            let update = ProfileUpdate {
                full_name: full_name.clone(),
                avatar_url: if *clear_avatar {
                    Some(None)
                } else {
                    avatar_url.clone().map(Some)
                },
                department: department.clone(),
                student_id: student_id.clone(),
                phone: phone.clone(),
                bio: bio.clone(),
            };
            if update.is_empty() {
                anyhow::bail!("nothing to update: pass at least one field flag");
            }
            output(&ctx.service.update_profile(&me.user_id, update).await?, flags.format)
        }
        ProfileCommands::Contacts => {
            output(&ctx.service.list_profiles_except(&me.user_id).await?, flags.format)
        }
    }
}
