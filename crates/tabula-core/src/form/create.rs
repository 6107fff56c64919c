//! Creation form built from fixed column descriptors

use super::control::{Control, write_value};
use crate::error::TabulaResult;
use crate::record::{FormValues, fields::ID};
use crate::schema::FieldDescriptor;
use tracing::debug;

/// Dialog for entering a new record.
///
/// Renders every column except the identity. Text fields start empty and the
/// enumeration starts at its first option. No field-level validation runs
/// before submission.
#[derive(Debug, Clone)]
pub struct CreateForm {
    fields: Vec<FieldDescriptor>,
    values: FormValues,
    open: bool,
}

impl CreateForm {
    pub const TITLE: &'static str = "Create New";

    pub fn new(columns: &[FieldDescriptor]) -> Self {
        let fields: Vec<FieldDescriptor> = columns
            .iter()
            .filter(|c| c.key != ID)
            .cloned()
            .collect();
        let values = defaults(&fields);
        Self {
            fields,
            values,
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn controls(&self) -> Vec<Control> {
        self.fields
            .iter()
            .map(|f| Control::render(f, &self.values))
            .collect()
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> TabulaResult<()> {
        write_value(&self.fields, &mut self.values, key, value)
    }

    /// Hand the values to the caller and close; `None` when the form is not open
    pub fn confirm(&mut self) -> Option<FormValues> {
        if !self.open {
            return None;
        }
        self.open = false;
        let submitted = std::mem::replace(&mut self.values, defaults(&self.fields));
        debug!(fields = submitted.len(), "creation form confirmed");
        Some(submitted)
    }

    /// Close without submitting
    pub fn cancel(&mut self) {
        self.open = false;
        self.values = defaults(&self.fields);
    }
}

fn defaults(fields: &[FieldDescriptor]) -> FormValues {
    fields
        .iter()
        .map(|f| (f.key.clone(), f.default_value()))
        .collect()
}
