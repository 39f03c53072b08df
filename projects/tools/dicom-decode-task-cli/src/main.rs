mod commands;
mod error;
mod util;
use argh::FromArgs;
use std::error::Error;

#[derive(FromArgs, Debug)]
/// Runs DICOM decode tasks (demo CLI - use the API for production)
struct TopLevel {
    /// log debug output
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// log nothing
    #[argh(switch, short = 'q')]
    quiet: bool,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Decode(commands::decode::DecodeCmd),
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Decode(cmd) => {
            commands::decode::handle_decode_command(cmd)?;
        }
    }

    Ok(())
}
