use clap::Subcommand;

/// Feed post commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostCommands {
    /// Publish a post.
    Create {
        #[arg(long, default_value = "")]
        content: String,
        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// List the feed, newest first.
    List {
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Like a post.
    Like { id: String },
    /// Remove your like.
    Unlike { id: String },
    /// Comment on a post.
    Comment {
        id: String,
        #[arg(long)]
        content: String,
    },
}
