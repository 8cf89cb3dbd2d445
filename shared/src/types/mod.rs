//! Common type definitions shared between server crates.

pub mod response;

pub use response::ErrorBody;
