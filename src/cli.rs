use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = r#"Examples:
  fabricdw create survival ~/servers/survival
  fabricdw list
  fabricdw check survival
  fabricdw remove survival
  fabricdw --yes remove survival"#
)]
pub struct Cli {
    /// Registry file (defaults to fabricdw.json in the user config directory)
    #[arg(long, value_name = "CONFIG_FILE", env = "FABRICDW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create an installation directory and register it
    Create {
        name: String,
        root: PathBuf,
    },
    /// Delete an installation's files and unregister it
    Remove { name: String },
    /// List registered installations
    #[command(alias = "ls")]
    List,
    /// Check that an installation still exists, dropping it if not
    Check { name: String },
    /// Show the defaults applied to new installations
    Defaults,
}
