//! Record store and table controller
//!
//! The controller owns the local copy of the collection and the validation
//! error map of the inline editor. Local state changes only after the server
//! confirms a mutation, and every record is addressed by its identity.

mod collection;
mod confirm;
mod controller;
mod mutation;
mod notice;
mod validation;

pub use collection::RecordCollection;
pub use confirm::Confirmer;
pub use controller::{DeleteOutcome, EditSession, SaveOutcome, TableController};
pub use mutation::{Mutation, MutationLog, MutationState};
pub use notice::{Notice, Operation};
pub use validation::{ValidationErrors, cell_id, validate_required};
