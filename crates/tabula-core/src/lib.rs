//! Tabula Core Library
//!
//! Client-side state for an editable record table backed by a remote API,
//! plus a fixed creation form and a form generated from a server schema.
//! Rendering is left to the caller: the table controller and the forms expose
//! plain data (rows, validation errors, controls) and accept user actions.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod record;
pub mod recovery;
pub mod schema;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigLoader, load_config};
pub use error::{TabulaError, TabulaResult};
pub use form::{Control, CreateForm, DynamicForm, FormState, FormType, Widget};
pub use http::{ApiRequest, ApiResponse, HttpTransport, Method, SharedTransport};
pub use record::{FormValues, Machine, Status};
pub use schema::{FieldDescriptor, FieldKind};
pub use session::Session;
pub use store::{Confirmer, DeleteOutcome, Notice, SaveOutcome, TableController};
