use clap::Subcommand;

/// Direct message commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DmCommands {
    /// Send a direct message.
    Send {
        recipient_id: String,
        #[arg(long)]
        content: String,
    },
    /// Show the conversation with one user.
    List {
        peer_id: String,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// List your conversations with their latest message.
    Conversations,
}
