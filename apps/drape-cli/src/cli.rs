//! Command-line surface for `drape-quote`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drape_core::validation::validate_tax_rate_bps;
use drape_core::TaxRate;

#[derive(Parser, Debug)]
#[command(
    name = "drape-quote",
    version,
    about = "Price blind and curtain quotations and render them as PDF",
    long_about = None
)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "DRAPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a request file and print a preview table
    Price {
        /// Quote request (TOML)
        request: PathBuf,
    },
    /// Price a request file and write the PDF quotation
    Generate {
        /// Quote request (TOML)
        request: PathBuf,

        /// Output file (defaults to <output.directory>/<quote number>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// VAT percentage for this quote, e.g. 5 or 7.5
        #[arg(long, value_name = "PCT", value_parser = parse_tax_rate)]
        tax_rate: Option<TaxRate>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn parse_tax_rate(value: &str) -> Result<TaxRate, String> {
    let pct: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !pct.is_finite() || pct < 0.0 {
        return Err(format!("'{}' is not a valid percentage", value));
    }
    let rate = TaxRate::from_percentage(pct);
    validate_tax_rate_bps(rate.bps()).map_err(|e| e.to_string())?;
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "drape-quote",
            "--config",
            "/etc/drape.toml",
            "generate",
            "villa.toml",
            "-o",
            "out.pdf",
            "--tax-rate",
            "7.5",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/drape.toml")));
        match cli.command {
            Commands::Generate {
                request,
                output,
                tax_rate,
            } => {
                assert_eq!(request, PathBuf::from("villa.toml"));
                assert_eq!(output, Some(PathBuf::from("out.pdf")));
                assert_eq!(tax_rate, Some(TaxRate::from_bps(750)));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_tax_rate_rejected() {
        assert!(Cli::try_parse_from(["drape-quote", "generate", "q.toml", "--tax-rate", "abc"]).is_err());
        assert!(Cli::try_parse_from(["drape-quote", "generate", "q.toml", "--tax-rate", "-1"]).is_err());
        assert!(Cli::try_parse_from(["drape-quote", "generate", "q.toml", "--tax-rate", "150"]).is_err());
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["drape-quote", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
