use clap::Subcommand;

/// Profile commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show your profile, or another user's by id.
    Show {
        /// Profile id (defaults to the signed-in user)
        id: Option<String>,
    },
    /// Update fields on your profile.
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        student_id: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        /// Remove the avatar
        #[arg(long, conflicts_with = "avatar_url")]
        clear_avatar: bool,
    },
    /// List everyone you can message.
    Contacts,
}
