use clap::Subcommand;

/// Study group chat commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MessageCommands {
    /// Send a message to a group you belong to.
    Send {
        group_id: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Attachment URL (repeatable)
        #[arg(long = "attachment")]
        attachments: Vec<String>,
    },
    /// Show recent messages in a group.
    List {
        group_id: String,
        #[arg(long)]
        offset: Option<u32>,
    },
}
