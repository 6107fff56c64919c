//! Creation and schema-driven forms
//!
//! Both forms keep their values in a single [`FormValues`](crate::record::FormValues)
//! and render [`Control`]s as views over it.

mod control;
mod create;
mod dynamic;

pub use control::{Control, Widget};
pub use create::CreateForm;
pub use dynamic::{DynamicForm, FormState, FormType};
