//! CLI command implementations

pub mod form;
pub mod table;
