//! Registry loading from JSON documents.

use std::io::Write;

use geocsv_model::{FieldName, ModelError, TableRegistry, TableSchema};

fn write_registry(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp registry");
    file.write_all(json.as_bytes()).expect("write registry");
    file
}

#[test]
fn loads_tables_from_json() {
    let file = write_registry(
        r#"{
            "tables": [
                {
                    "id": "GENDER_AGE_GROUP",
                    "fields": ["gender", "age group"],
                    "releases": [
                        { "year": "2011" },
                        { "year": "2016", "table": "gender_agegroup_2016c" }
                    ]
                }
            ]
        }"#,
    );

    let registry = TableRegistry::from_json_file(file.path()).expect("load registry");
    let schema = TableSchema::new(vec![
        FieldName::new("gender").unwrap(),
        FieldName::new("age group").unwrap(),
    ]);

    let latest = registry.resolve(None, &schema, None).expect("resolve");
    assert_eq!(latest.db_table, "gender_agegroup_2016c");

    let named = registry
        .resolve(None, &schema, Some("2011"))
        .expect("resolve 2011");
    assert_eq!(named.db_table, "gender_age_group_2011");
}

#[test]
fn malformed_registry_is_a_parse_error() {
    let file = write_registry("{ not json");
    let err = TableRegistry::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ModelError::RegistryParse { .. }));
}

#[test]
fn missing_registry_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = TableRegistry::from_json_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ModelError::RegistryIo { .. }));
}
