use campus_core::enums::{ReportKind, ReportStatus};
use campus_db::repos::NewReport;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional};
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &ReportCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ReportCommands::Create {
            kind,
            title,
            description,
            location,
            category,
            image_url,
        } => {
            let me = ctx.require_user().await?;
            let new = NewReport {
                kind: parse_enum(kind, "kind")?,
                title: title.clone(),
                description: description.clone(),
                location: location.clone(),
                category: category.clone(),
                image_url: image_url.clone(),
            };
            output(&ctx.service.create_report(&me.user_id, &new).await?, flags.format)
        }
        ReportCommands::List {
            kind,
            status,
            offset,
        } => {
            let kind: Option<ReportKind> = parse_optional(kind.as_deref(), "kind")?;
            let status: Option<ReportStatus> = parse_optional(status.as_deref(), "status")?;
            let reports = ctx
                .service
                .list_reports(kind, status, ctx.page(flags, *offset))
                .await?;
            output(&reports, flags.format)
        }
        ReportCommands::Resolve { id } => {
            let me = ctx.require_user().await?;
            output(&ctx.service.resolve_report(&me.user_id, id).await?, flags.format)
        }
    }
}
