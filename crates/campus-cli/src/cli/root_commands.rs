use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuthCommands, BookCommands, DmCommands, GroupCommands, MessageCommands, PostCommands,
    ProfileCommands, ReportCommands, ResourceCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP and WebSocket server.
    Serve(ServeArgs),
    /// Create or upgrade the database schema.
    Migrate,
    /// Authentication.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Your profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Campus feed posts.
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },
    /// Book marketplace.
    Book {
        #[command(subcommand)]
        action: BookCommands,
    },
    /// Lost-and-found reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Study groups.
    Group {
        #[command(subcommand)]
        action: GroupCommands,
    },
    /// Study group chat.
    Message {
        #[command(subcommand)]
        action: MessageCommands,
    },
    /// Direct messages.
    Dm {
        #[command(subcommand)]
        action: DmCommands,
    },
    /// Shared study resources.
    Resource {
        #[command(subcommand)]
        action: ResourceCommands,
    },
}

/// Arguments for `campus serve`.
#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,
    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}
