//! CLI argument definitions for the geocsv importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "geocsv",
    version,
    about = "Import structured geography CSV files into SQLite tables",
    long_about = "Import data from a structured CSV file into a registered database table.\n\n\
                  The file must be in the format: geo_level, geo_code, [fields...], total.\n\
                  The destination table is looked up from the field names, or given explicitly."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import one CSV file into its destination table.
    Import(ImportArgs),

    /// List the tables registered in the table registry.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the structured CSV file.
    #[arg(value_name = "FILEPATH")]
    pub filepath: PathBuf,

    /// Destination table identity. Derived from the field names when absent.
    #[arg(long)]
    pub table: Option<String>,

    /// Release year of the destination table. Latest release when absent.
    #[arg(long = "release-year", alias = "release_year", value_name = "YEAR")]
    pub release_year: Option<String>,

    /// Value written into the geo_version column of every row.
    #[arg(
        long = "geo-version",
        alias = "geo_version",
        value_name = "TAG",
        default_value = "2011"
    )]
    pub geo_version: String,

    /// Numeric representation of the total column.
    #[arg(
        long = "value-type",
        alias = "value_type",
        value_enum,
        default_value = "integer"
    )]
    pub value_type: ValueTypeArg,

    /// Normalize totals so each geography's leaf values add to 100%.
    #[arg(long = "add-to-100", alias = "add_to_100")]
    pub add_to_100: bool,

    /// Run everything except the writes: no rows staged, no commit.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Path to the table registry document.
    #[arg(long, value_name = "PATH", default_value = "tables.json")]
    pub registry: PathBuf,

    /// Path to the SQLite database to import into.
    #[arg(long, value_name = "PATH", default_value = "geocsv.sqlite")]
    pub database: PathBuf,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Path to the table registry document.
    #[arg(long, value_name = "PATH", default_value = "tables.json")]
    pub registry: PathBuf,
}

/// CLI choices for the total column's representation.
#[derive(Clone, Copy, ValueEnum)]
pub enum ValueTypeArg {
    Integer,
    Float,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
