//! # drape-quote Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging, stderr)
//! 2. Parse arguments
//! 3. Load configuration and run the command
//! 4. Print the result, or the error with its exit code

use clap::Parser;
use drape_cli::cli::Cli;

fn main() {
    drape_cli::init_tracing();

    let cli = Cli::parse();
    match drape_cli::run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}
