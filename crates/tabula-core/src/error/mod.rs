//! Error types for Tabula
//!
//! A single error enum is shared by the transport, the record store and the
//! forms. Every variant carries enough context to be shown to the user as a
//! notice without further translation.

mod classifiers;
mod constructors;
mod types;

pub(crate) use classifiers::is_transient_status;
pub use types::{ResultExt, TabulaError, TabulaResult};
