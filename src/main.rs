mod app;
mod cli;
mod installation;
mod model;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::App;
use cli::{Cli, Commands};
use installation::{AssumeYes, OsFilesystem, Prompt, StdinPrompt};
use model::ConfigStore;

fn main() {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = match init_logging() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("fabricdw: logging disabled: {err:#}");
            None
        }
    };

    if let Err(err) = run(cli) {
        tracing::error!("command failed: {err:#}");
        eprintln!("fabricdw error: {err:#}");
        std::process::exit(1);
    }
}

// Log to a file in the data directory, never stdout.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = directories::ProjectDirs::from("", "", "fabricdw")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("fabricdw"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "fabricdw.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fabricdw=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(guard)
}

fn run(cli: Cli) -> Result<()> {
    let store = match cli.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::user_default()?,
    };
    tracing::info!("fabricdw starting with {}", store.path().display());

    let prompt: Box<dyn Prompt> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinPrompt)
    };
    let mut app = App::new(store, prompt, Box::new(OsFilesystem))?;

    let result = match &cli.command {
        Commands::Create { name, root } => app.create_installation_command(name, root),
        Commands::Remove { name } => app.remove_installation_command(name),
        Commands::List => app.list_installations_command(),
        Commands::Check { name } => app.check_installation_command(name),
        Commands::Defaults => app.show_defaults_command(),
    };

    for line in app.drain_notifications() {
        println!("{line}");
    }

    result
}
