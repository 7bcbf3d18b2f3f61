pub mod error;
pub mod ids;
pub mod registry;
pub mod row;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::{FieldName, Geography, TableId};
pub use registry::{FieldTable, Release, ResolvedTable, TableRegistry, derive_table_id};
pub use row::{RowRecord, TableSchema};
pub use value::{NO_DATA, TotalValue, ValueType};
