use clap::Subcommand;

/// Book marketplace commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BookCommands {
    /// List a book for sale.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        condition: String,
        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// List books by status (default: available).
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one listing with its seller.
    Get { id: String },
    /// Update your listing.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        condition: Option<String>,
        /// available, reserved, sold
        #[arg(long)]
        status: Option<String>,
    },
}
