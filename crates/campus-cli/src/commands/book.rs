use campus_core::enums::BookStatus;
use campus_db::repos::NewBook;
use campus_db::updates::BookUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BookCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional};
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(action: &BookCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BookCommands::Create {
            title,
            author,
            description,
            price,
            condition,
            images,
        } => {
            let me = ctx.require_user().await?;
            let new = NewBook {
                title: title.clone(),
                author: author.clone(),
                description: description.clone(),
                price: *price,
                condition: condition.clone(),
                images: images.clone(),
            };
            output(&ctx.service.create_book_listing(&me.user_id, &new).await?, flags.format)
        }
        BookCommands::List { status, offset } => {
            let status: Option<BookStatus> = parse_optional(status.as_deref(), "status")?;
            let books = ctx.service.list_books(status, ctx.page(flags, *offset)).await?;
            output(&books, flags.format)
        }
        BookCommands::Get { id } => output(&ctx.service.get_book_listing(id).await?, flags.format),
        BookCommands::Update {
            id,
            title,
            author,
            description,
            price,
            condition,
            status,
        } => {
            let me = ctx.require_user().await?;
            let update = BookUpdate {
                title: title.clone(),
                author: author.clone(),
                description: description.clone(),
                price: *price,
                condition: condition.clone(),
                images: None,
                status: status
                    .as_deref()
                    .map(|raw| parse_enum::<BookStatus>(raw, "status"))
                    .transpose()?,
            };
            output(&ctx.service.update_book(&me.user_id, id, update).await?, flags.format)
        }
    }
}
