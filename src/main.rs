use clap::{Parser, Subcommand};
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve block counts, canvas geometry and coordinate tables for a
    /// player/session pair and print the layout report.
    Layout(cmd::layout::LayoutArgs),
    /// Validate a stats-view settings file and print the slot grids.
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let result = match cli.command {
        Commands::Layout(args) => cmd::layout::run(args),
        Commands::Validate(args) => cmd::validate::run(args),
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}
