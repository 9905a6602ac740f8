mod handlers;
mod logging;
pub mod parse;

use clap::Parser;
pub use handlers::config_from_args;
pub use logging::init_logger;
pub use parse::Cli;

use crate::core::error::SankeyError;

pub fn run() -> Result<(), SankeyError> {
    let cli = parse::Cli::parse();
    if let Err(e) = init_logger(cli.log_level) {
        eprintln!("could not set up logging: {e}");
    }
    handlers::sankey(&cli)
}
