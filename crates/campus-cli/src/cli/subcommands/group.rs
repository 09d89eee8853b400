use clap::Subcommand;

/// Study group commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GroupCommands {
    /// Create a group; you become its admin.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        course_code: String,
        #[arg(long)]
        max_members: i64,
    },
    /// List groups, newest first.
    List {
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show a group with its roster.
    Get { id: String },
    /// Join an active group.
    Join { id: String },
    /// Leave a group you belong to.
    Leave { id: String },
    /// Close a group you administer.
    Close { id: String },
}
