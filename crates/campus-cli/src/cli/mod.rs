use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `campus` binary.
#[derive(Debug, Parser)]
#[command(name = "campus", version, about = "Campus Hub - books, groups, and chat for your campus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./campus.toml
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};
    use crate::cli::subcommands::{BookCommands, GroupCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "campus", "--format", "table", "--limit", "10", "--verbose", "migrate",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Migrate));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["campus", "migrate", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["campus", "--format", "xml", "migrate"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["campus", "--config", "/tmp/campus.toml", "migrate"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.config.as_deref(), Some("/tmp/campus.toml"));
    }

    #[test]
    fn book_create_collects_repeated_images() {
        let cli = Cli::try_parse_from([
            "campus", "book", "create", "--title", "SICP", "--author", "Abelson", "--price",
            "12.5", "--condition", "good", "--image", "a.png", "--image", "b.png",
        ])
        .expect("cli should parse");

        let Commands::Book {
            action: BookCommands::Create { price, images, .. },
        } = cli.command
        else {
            panic!("expected book create");
        };
        assert!((price - 12.5).abs() < f64::EPSILON);
        assert_eq!(images, vec!["a.png", "b.png"]);
    }

    #[test]
    fn group_leave_takes_an_id() {
        let cli = Cli::try_parse_from(["campus", "group", "leave", "grp-1"]).expect("parse");
        assert!(matches!(
            cli.command,
            Commands::Group { action: GroupCommands::Leave { id } } if id == "grp-1"
        ));
    }

    #[test]
    fn book_price_must_be_numeric() {
        let parsed = Cli::try_parse_from([
            "campus", "book", "create", "--title", "x", "--author", "y", "--price", "cheap",
            "--condition", "new",
        ]);
        assert!(parsed.is_err());
    }
}
