use clap::Subcommand;

/// Lost-and-found commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// File a lost or found report.
    Create {
        /// lost or found
        #[arg(long)]
        kind: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// List reports, newest first.
    List {
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Mark your report resolved.
    Resolve { id: String },
}
