//! Field descriptors
//!
//! Descriptors come from two places: the fixed machine columns known at
//! compile time, and schemas fetched from the server at runtime.

mod columns;
mod descriptor;
mod remote;

pub use columns::{column, machine_columns};
pub use descriptor::{FieldDescriptor, FieldKind};
pub use remote::{ENUM_TYPE, parse_schema};
