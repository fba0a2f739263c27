//! Print the OpenAPI document as JSON or YAML.

use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use di_demo::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

/// Dump the service's OpenAPI document to stdout.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", version, about)]
struct Args {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();

    let rendered = match args.format {
        Format::Json => doc.to_pretty_json().wrap_err("serialise OpenAPI as JSON")?,
        Format::Yaml => doc.to_yaml().wrap_err("serialise OpenAPI as YAML")?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("write OpenAPI document")?;
    Ok(())
}
