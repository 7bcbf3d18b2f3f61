#![deny(unsafe_code)]

use crate::{FieldName, Geography, TotalValue};

/// The declared dimension columns of an input file, in header order.
///
/// The last field is the leaf dimension: its sibling values are expected to
/// partition 100% of a geography's total within a fixed combination of the
/// other dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    fields: Vec<FieldName>,
}

impl TableSchema {
    pub fn new(fields: Vec<FieldName>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.as_str().to_string()).collect()
    }

    /// The non-leaf fields, i.e. everything but the last dimension.
    pub fn prefix_fields(&self) -> &[FieldName] {
        match self.fields.len() {
            0 => &[],
            n => &self.fields[..n - 1],
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One decoded CSV row: a geography, its dimension values in schema order,
/// and the converted total.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub geography: Geography,
    pub dimensions: Vec<String>,
    pub total: TotalValue,
}

impl RowRecord {
    /// The dimension values shared by all rows of this row's group:
    /// everything but the leaf value.
    pub fn group_prefix(&self) -> &[String] {
        match self.dimensions.len() {
            0 => &[],
            n => &self.dimensions[..n - 1],
        }
    }
}
