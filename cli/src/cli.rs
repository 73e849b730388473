use crate::app;
use crate::commands::Commands;
use crate::config::ConfigFile;
use crate::error::Error;
use crate::logger::Logger;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use clap::Parser;
use fanout_construct::App;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing fanout.toml
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Output JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Derive a runner from the command and run it
fn run_command(command: &impl Runnable, writer: &Writer, app: &App) -> Result<(), Error> {
    command.runner(writer, app).run()
}

/// Parse arguments, declare the app and run the command against it
pub fn run() -> Result<(), Error> {
    Logger::init();
    let cli = Cli::parse();
    let writer = Writer::new(cli.json);

    let config = ConfigFile::from_path(cli.dir.clone())?;
    let app = app::build(&config)?;

    // Match all commands here, in one place
    match &cli.command {
        Commands::List(cmd) => run_command(cmd, &writer, &app),
        Commands::Describe(cmd) => run_command(cmd, &writer, &app),
    }
}
