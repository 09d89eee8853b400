use campus_config::CampusConfig;

use crate::cli::root_commands::ServeArgs;

/// Apply command-line overrides and run the server until Ctrl-C.
pub async fn handle(args: &ServeArgs, mut config: CampusConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    campus_server::serve(config).await?;
    Ok(())
}
