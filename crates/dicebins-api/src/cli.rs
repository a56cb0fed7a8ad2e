//! Command line interface
//!
//! `dicebins serve` runs the HTTP service; `dicebins bins` computes a table
//! locally with the same validation rules as the query string.

use crate::error::ApiError;
use crate::render::render_text;
use crate::types::BinsResponse;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dicebins_calculator::{BinCalculator, RawInput};

#[derive(Parser, Debug)]
#[command(name = "dicebins")]
#[command(about = "Dice binning calculator for post-election audits")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP server (the default when no command is given)
    Serve(ServeArgs),

    /// Compute bins and print them
    Bins(BinsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind, overriding the configuration file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BinsArgs {
    /// Number of ten-sided dice (2 when --precincts is omitted too)
    #[arg(short, long)]
    pub dice: Option<String>,

    /// Number of precincts (13 when --dice is omitted too)
    #[arg(short, long)]
    pub precincts: Option<String>,

    /// Print terse lines for pasting into a text-formatted spreadsheet column
    #[arg(long)]
    pub paste: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl BinsArgs {
    /// The arguments as they would arrive in a query string.
    pub fn raw_input(&self) -> RawInput {
        RawInput {
            numdice: self.dice.clone(),
            numprec: self.precincts.clone(),
            csv: self.paste.then(|| "1".to_string()),
        }
    }
}

/// Computes and renders the bins for `dicebins bins`.
pub fn run_bins(args: &BinsArgs) -> Result<String, ApiError> {
    let calculation = BinCalculator::new().evaluate(&args.raw_input())?;
    match args.format {
        OutputFormat::Text => Ok(render_text(&calculation)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&BinsResponse::from(&calculation))
                .map_err(|e| ApiError::Internal {
                    message: "failed to encode bins".to_string(),
                    source: Some(Box::new(e)),
                })?;
            json.push('\n');
            Ok(json)
        }
    }
}
