//! Database access: pool construction and MySQL repository implementations.

pub mod connection;
pub mod mysql;
