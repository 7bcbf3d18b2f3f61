//! Library surface of the geocsv CLI, split out so integration tests can
//! drive the import pipeline directly.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
