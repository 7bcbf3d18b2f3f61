#![deny(unsafe_code)]

//! The table registry: maps a set of dimension field names to a concrete
//! destination table and release.
//!
//! Registry entries live in a JSON document (`tables.json` by default):
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "id": "GENDER_AGEGROUP",
//!       "fields": ["gender", "age group"],
//!       "releases": [
//!         { "year": "2011" },
//!         { "year": "2016", "table": "gender_agegroup_2016c" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::{FieldName, ModelError, Result, TableId, TableSchema};

/// One release of a field table. `table` overrides the default database
/// table name (`<id lowercased>_<year>`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Release {
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl Release {
    fn db_table(&self, id: &TableId) -> String {
        self.table
            .clone()
            .unwrap_or_else(|| format!("{}_{}", id.as_str().to_lowercase(), self.year))
    }
}

/// A registered destination table: an identity, the ordered dimension
/// fields it stores, and its releases.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FieldTable {
    pub id: TableId,
    pub fields: Vec<FieldName>,
    pub releases: Vec<Release>,
}

/// The table a run resolved to: registry identity plus the concrete
/// database table for the selected release.
#[derive(Debug, Clone)]
pub struct ResolvedTable {
    pub id: TableId,
    pub db_table: String,
    pub schema: TableSchema,
}

/// Derive a table identity from dimension field names: uppercase, with runs
/// of non-alphanumerics collapsed to `_`, joined by `_`.
pub fn derive_table_id(fields: &[FieldName]) -> Result<TableId> {
    let parts: Vec<String> = fields.iter().map(|f| slug(f.as_str())).collect();
    TableId::new(parts.join("_"))
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut gap = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.extend(ch.to_uppercase());
        } else {
            gap = true;
        }
    }
    out
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RegistryDoc {
    tables: Vec<FieldTable>,
}

/// The set of registered field tables, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: BTreeMap<TableId, FieldTable>,
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ModelError::RegistryIo {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: RegistryDoc =
            serde_json::from_str(&text).map_err(|source| ModelError::RegistryParse {
                path: path.to_path_buf(),
                source,
            })?;
        let mut registry = Self::new();
        for table in doc.tables {
            registry.insert(table);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, table: FieldTable) {
        self.tables.insert(table.id.clone(), table);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldTable> {
        self.tables.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Resolve the destination for a run.
    ///
    /// The identity is the explicit `--table` value when given, otherwise
    /// derived from the file's dimension fields. Resolution failure is fatal
    /// and happens before any row is processed.
    pub fn resolve(
        &self,
        explicit: Option<&TableId>,
        schema: &TableSchema,
        release_year: Option<&str>,
    ) -> Result<ResolvedTable> {
        let id = match explicit {
            Some(id) => id.clone(),
            None => derive_table_id(schema.fields())?,
        };
        let entry = self
            .tables
            .get(&id)
            .ok_or_else(|| ModelError::TableResolution {
                fields: schema.field_names(),
            })?;

        if entry.fields != schema.fields() {
            return Err(ModelError::SchemaMismatch {
                table: id.as_str().to_string(),
                expected: entry.fields.iter().map(|f| f.as_str().to_string()).collect(),
                found: schema.field_names(),
            });
        }

        let release = match release_year {
            Some(year) => entry
                .releases
                .iter()
                .find(|r| r.year == year)
                .ok_or_else(|| ModelError::UnknownRelease {
                    table: id.as_str().to_string(),
                    year: year.to_string(),
                })?,
            None => entry
                .releases
                .iter()
                .max_by(|a, b| a.year.cmp(&b.year))
                .ok_or_else(|| ModelError::UnknownRelease {
                    table: id.as_str().to_string(),
                    year: "<latest>".to_string(),
                })?,
        };

        Ok(ResolvedTable {
            db_table: release.db_table(&id),
            id,
            schema: schema.clone(),
        })
    }
}
