use clap::Subcommand;

/// Study resource commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResourceCommands {
    /// Share a resource.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// note, book, video, link
        #[arg(long)]
        kind: String,
        #[arg(long, default_value = "")]
        course_code: String,
        /// File URL (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,
    },
    /// List resources, newest first.
    List {
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Record a download and print the resource.
    Download { id: String },
}
