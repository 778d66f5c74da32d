pub mod args;
pub mod render;
pub mod runner;

pub use args::{get_log_level_from_verbose, parse_cli, Cli, Commands, CreateArgs, TreeArgs};
pub use runner::run;
