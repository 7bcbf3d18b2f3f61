pub mod error;
pub mod session;
pub mod table;
pub mod writer;

pub use error::{Result, StoreError};
pub use session::Session;
pub use table::{DbTable, column_name, total_param};
pub use writer::{FLUSH_EVERY, RowWriter};
