use crate::constants::{verbosity, ENV_CONFIG_FILE, ENV_SHARED_CREDENTIALS_FILE};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// CLI arguments for wizkit.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Shared credentials file (defaults to ~/.aws/credentials).
    #[arg(long, env = ENV_SHARED_CREDENTIALS_FILE, global = true)]
    pub credentials_file: Option<PathBuf>,

    /// Shared config file (defaults to ~/.aws/config).
    #[arg(long, env = ENV_CONFIG_FILE, global = true)]
    pub config_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or create the shared credentials files.
    #[command(subcommand)]
    Credentials(CredentialsCommand),
    /// Print the construct tree of a CDK app.
    Tree(TreeArgs),
}

#[derive(Subcommand, Debug)]
pub enum CredentialsCommand {
    /// List the existing credentials/config files and their profiles.
    List,
    /// Create a credentials file holding one profile.
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Profile name (asked when omitted).
    #[arg(long)]
    pub profile: Option<String>,

    /// Access key ID (asked when omitted).
    #[arg(long = "access-key")]
    pub access_key: Option<String>,

    /// Secret access key (asked when omitted).
    #[arg(long = "secret-key")]
    pub secret_key: Option<String>,

    /// Overwrite an existing credentials file without asking.
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; every answer must come from flags.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Path to tree.json, or `-` to read it from stdin.
    #[arg(value_name = "TREE_JSON")]
    pub tree_file: PathBuf,

    /// Stop expanding below this depth.
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Show every construct, including the bookkeeping ones.
    #[arg(long)]
    pub all: bool,
}

/// Parse command line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_create_flags() {
        let cli = Cli::parse_from([
            "wizkit",
            "credentials",
            "create",
            "--profile",
            "dev",
            "--access-key",
            "AKIA",
            "--secret-key",
            "secret",
            "--non-interactive",
            "--force",
            "-vv",
            "--credentials-file",
            "/tmp/creds",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.credentials_file, Some(PathBuf::from("/tmp/creds")));
        let Commands::Credentials(CredentialsCommand::Create(args)) = cli.command else {
            panic!("expected credentials create");
        };
        assert_eq!(args.profile.as_deref(), Some("dev"));
        assert_eq!(args.access_key.as_deref(), Some("AKIA"));
        assert_eq!(args.secret_key.as_deref(), Some("secret"));
        assert!(args.non_interactive);
        assert!(args.force);
    }

    #[test]
    fn parses_tree_args() {
        let cli = Cli::parse_from(["wizkit", "tree", "cdk.out/tree.json", "--depth", "2", "--all"]);
        let Commands::Tree(args) = cli.command else {
            panic!("expected tree");
        };
        assert_eq!(args.tree_file, PathBuf::from("cdk.out/tree.json"));
        assert_eq!(args.depth, Some(2));
        assert!(args.all);
    }

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::parse_from(["wizkit", "credentials", "list"]);
        assert!(matches!(cli.command, Commands::Credentials(CredentialsCommand::List)));
    }
}
