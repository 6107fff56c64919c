//! Required-field validation for inline edits

use std::collections::BTreeMap;

/// A value is present when it is non-empty after trimming
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Identifier of one table cell
pub fn cell_id(record_id: &str, field: &str) -> String {
    format!("{}_{}", record_id, field)
}

/// Active validation failures keyed by cell id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the required check for a cell, recording or clearing its error
    pub fn validate_cell(&mut self, cell_id: &str, label: &str, value: &str) -> Option<&str> {
        if validate_required(value) {
            self.errors.remove(cell_id);
            None
        } else {
            self.errors
                .insert(cell_id.to_string(), format!("{} is required", label));
            self.errors.get(cell_id).map(String::as_str)
        }
    }

    pub fn get(&self, cell_id: &str) -> Option<&str> {
        self.errors.get(cell_id).map(String::as_str)
    }

    pub fn contains(&self, cell_id: &str) -> bool {
        self.errors.contains_key(cell_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.errors.iter()
    }

    /// Drop every error recorded for one record's cells
    pub fn remove_record<'a>(&mut self, record_id: &str, fields: impl IntoIterator<Item = &'a str>) {
        for field in fields {
            self.errors.remove(&cell_id(record_id, field));
        }
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
