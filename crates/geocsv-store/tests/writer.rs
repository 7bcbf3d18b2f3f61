//! End-to-end writer tests against on-disk databases.

use geocsv_model::{FieldName, Geography, ResolvedTable, RowRecord, TableId, TableSchema, TotalValue};
use geocsv_store::{DbTable, RowWriter, Session};
use rusqlite::Connection;

fn resolved_gender_table() -> ResolvedTable {
    ResolvedTable {
        id: TableId::new("GENDER").unwrap(),
        db_table: "gender_2011".to_string(),
        schema: TableSchema::new(vec![FieldName::new("gender").unwrap()]),
    }
}

fn gender_row(code: &str, gender: &str, total: TotalValue) -> RowRecord {
    RowRecord {
        geography: Geography::new("ward", code),
        dimensions: vec![gender.to_string()],
        total,
    }
}

#[test]
fn writes_rows_with_geo_version_and_commits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.sqlite");

    let session = Session::open(&path).unwrap();
    let table = DbTable::new(&resolved_gender_table());
    let mut writer = RowWriter::new(Some(session), table, "2011").unwrap();

    writer
        .add(&gender_row("1", "female", TotalValue::Count(60)))
        .unwrap();
    writer
        .add(&gender_row("1", "male", TotalValue::Count(40)))
        .unwrap();
    writer
        .add(&gender_row("2", "female", TotalValue::Missing))
        .unwrap();
    assert_eq!(writer.finish().unwrap(), 3);

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM gender_2011", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 3);

    let (version, total): (String, i64) = conn
        .query_row(
            "SELECT geo_version, total FROM gender_2011 WHERE gender = 'female' AND geo_code = '1'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(version, "2011");
    assert_eq!(total, 60);

    let nulls: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM gender_2011 WHERE total IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(nulls, 1);
}

#[test]
fn percent_totals_are_stored_as_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.sqlite");

    let session = Session::open(&path).unwrap();
    let table = DbTable::new(&resolved_gender_table());
    let mut writer = RowWriter::new(Some(session), table, "2011").unwrap();
    writer
        .add(&gender_row("1", "female", TotalValue::Percent(33.3)))
        .unwrap();
    writer.finish().unwrap();

    let conn = Connection::open(&path).unwrap();
    let stored: String = conn
        .query_row("SELECT total FROM gender_2011", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "33.3");
}

#[test]
fn dropped_writer_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("import.sqlite");

    {
        let session = Session::open(&path).unwrap();
        let table = DbTable::new(&resolved_gender_table());
        let mut writer = RowWriter::new(Some(session), table, "2011").unwrap();
        // Enough rows to cross the 100-row flush boundary.
        for i in 0..150 {
            writer
                .add(&gender_row(&i.to_string(), "female", TotalValue::Count(1)))
                .unwrap();
        }
        // dropped without finish: flushed rows roll back with the session
    }

    let conn = Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'gender_2011'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn dry_run_writer_stages_nothing() {
    let table = DbTable::new(&resolved_gender_table());
    let mut writer = RowWriter::new(None, table, "2011").unwrap();
    assert!(writer.is_dry_run());
    writer
        .add(&gender_row("1", "female", TotalValue::Count(60)))
        .unwrap();
    assert_eq!(writer.finish().unwrap(), 0);
}
