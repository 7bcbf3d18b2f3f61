use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use geocsv_ingest::RowReader;
use geocsv_model::{TableId, TableRegistry, ValueType};
use geocsv_normalize::AddTo100;
use geocsv_store::{DbTable, RowWriter, Session};

use crate::cli::{ImportArgs, TablesArgs, ValueTypeArg};
use crate::summary::{ImportSummary, apply_table_style};

pub fn run_import(args: &ImportArgs) -> Result<ImportSummary> {
    if args.dry_run {
        println!("DRY RUN: not actually writing data");
    }
    let value_type = match args.value_type {
        ValueTypeArg::Integer => ValueType::Integer,
        ValueTypeArg::Float => ValueType::Float,
    };

    let registry = TableRegistry::from_json_file(&args.registry).context("load table registry")?;

    // Opening the reader parses the header only; the destination table must
    // resolve before any row is read.
    let reader = RowReader::open(&args.filepath, value_type)?;
    let schema = reader.schema().clone();
    let explicit = args.table.as_deref().map(TableId::new).transpose()?;
    let resolved = registry.resolve(explicit.as_ref(), &schema, args.release_year.as_deref())?;
    println!(
        "Table for fields {:?} is {}",
        schema.field_names(),
        resolved.db_table
    );

    let import_span = info_span!("import", table = %resolved.db_table);
    let _guard = import_span.enter();
    let started = Instant::now();

    let session = if args.dry_run {
        None
    } else {
        Some(Session::open(&args.database)?)
    };
    let mut writer = RowWriter::new(session, DbTable::new(&resolved), args.geo_version.clone())?;
    let mut normalizer = args.add_to_100.then(AddTo100::new);

    let mut summary = ImportSummary {
        table: resolved.db_table.clone(),
        dry_run: args.dry_run,
        ..ImportSummary::default()
    };
    for row in reader {
        let mut row = row?;
        summary.rows_read += 1;
        if row.total.is_missing() {
            summary.no_data += 1;
        }
        if let Some(normalizer) = normalizer.as_mut()
            && normalizer.adjust(&mut row).is_some()
        {
            summary.adjusted += 1;
            debug!(geography = %row.geography, total = %row.total, "row adjusted");
        }
        println!("{}", row.geography);
        writer.add(&row)?;
    }
    summary.rows_written = writer.finish()?;

    info!(
        rows_read = summary.rows_read,
        rows_written = summary.rows_written,
        adjusted = summary.adjusted,
        no_data = summary.no_data,
        duration_ms = started.elapsed().as_millis() as u64,
        "import complete"
    );
    Ok(summary)
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let registry = TableRegistry::from_json_file(&args.registry).context("load table registry")?;
    if registry.is_empty() {
        println!("No tables registered in {}", args.registry.display());
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Table", "Fields", "Releases"]);
    apply_table_style(&mut table);
    for entry in registry.iter() {
        let fields: Vec<&str> = entry.fields.iter().map(|f| f.as_str()).collect();
        let years: Vec<&str> = entry.releases.iter().map(|r| r.year.as_str()).collect();
        table.add_row(vec![
            entry.id.as_str().to_string(),
            fields.join(", "),
            years.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
