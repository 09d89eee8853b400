use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MigrateResponse {
    database: String,
    remote: bool,
    schema_version: i64,
}

/// Migrations run when the database opens, so reaching here means the schema is current.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let database = &ctx.config.database;
    let response = MigrateResponse {
        database: if database.is_remote() {
            database.url.clone()
        } else {
            database.path.clone()
        },
        remote: database.is_remote(),
        schema_version: ctx.service.db().schema_version().await?,
    };
    tracing::info!(
        database = %response.database,
        version = response.schema_version,
        "schema is up to date"
    );
    output(&response, flags.format)
}
