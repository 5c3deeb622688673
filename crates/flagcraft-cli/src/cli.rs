//! Command-line arguments and command dispatch.

use std::{io::Write, path::PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use flagcraft::{Schema, StatusDefinition, decode_report};

use crate::{config, input, render};

/// Decode integer status codes into the flags and states they encode.
#[derive(Parser, Debug)]
#[command(name = "flagcraft", version, about)]
pub struct Cli {
    /// Status definitions file.
    #[arg(
        short,
        long,
        global = true,
        env = config::CONFIG_ENV,
        default_value = config::DEFAULT_CONFIG
    )]
    pub config: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the status types in the definitions file.
    List,
    /// Show the fields of one status type.
    Show(ShowArgs),
    /// Decode a status code.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Status type name, as shown by `list`.
    pub status_type: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Status type name, as shown by `list`.
    pub status_type: String,

    /// Status code: decimal, or prefixed with 0x, 0o or 0b.
    #[arg(allow_hyphen_values = true)]
    pub code: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Cli {
    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Runs the selected command. Command output goes to `out`, warnings to `err`.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> anyhow::Result<()> {
    let schema = config::load_schema(&cli.config)?;

    match &cli.command {
        Command::List => {
            let text = match cli.format {
                Format::Text => render::list_text(&schema),
                Format::Json => render::list_json(&schema)? + "\n",
            };
            out.write_all(text.as_bytes())?;
        }
        Command::Show(args) => {
            let definition = lookup(&schema, &args.status_type)?;
            let text = match cli.format {
                Format::Text => render::show_text(&args.status_type, definition),
                Format::Json => render::show_json(&args.status_type, definition)? + "\n",
            };
            out.write_all(text.as_bytes())?;
        }
        Command::Decode(args) => {
            let definition = lookup(&schema, &args.status_type)?;
            let code = input::parse_code(&args.code).context("invalid status code")?;

            let decoded = decode_report(code, definition);
            tracing::info!(
                status_type = %args.status_type,
                code,
                flags = decoded.flags.len(),
                "decoded status code"
            );

            let text = match cli.format {
                Format::Text => {
                    for diagnostic in &decoded.diagnostics {
                        writeln!(err, "warning: {}", diagnostic)?;
                    }
                    render::decode_text(definition, &decoded)
                }
                Format::Json => render::decode_json(&args.status_type, code, &decoded)? + "\n",
            };
            out.write_all(text.as_bytes())?;
        }
    }

    Ok(())
}

fn lookup<'a>(schema: &'a Schema, name: &str) -> anyhow::Result<&'a StatusDefinition> {
    match schema.get(name) {
        Some(definition) => Ok(definition),
        None => bail!(
            "unknown status type '{}' (available: {})",
            name,
            schema.names().collect::<Vec<_>>().join(", ")
        ),
    }
}
