use clap::Subcommand;

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account and its profile.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value = "")]
        student_id: String,
        #[arg(long, default_value = "")]
        department: String,
    },
    /// Sign in and store the session token in the system keychain.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the session and clear stored credentials.
    Logout,
    /// Show who the stored token belongs to.
    Status,
}
