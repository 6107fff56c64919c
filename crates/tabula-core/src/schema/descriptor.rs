//! Field descriptor types

use serde::{Deserialize, Serialize};

/// How a field is edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Closed set of options, in display order
    Enumeration { options: Vec<String> },
}

/// Metadata describing one field of a form or table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    pub editable: bool,
    /// Column width hint
    pub size: Option<u16>,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// An editable text field
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            editable: true,
            size: None,
            kind: FieldKind::Text,
        }
    }

    /// An editable enumeration field
    pub fn enumeration(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            kind: FieldKind::Enumeration { options },
            ..Self::text(key, label)
        }
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = Some(size);
        self
    }

    /// Options of an enumeration field, `None` for text
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Enumeration { options } => Some(options),
            FieldKind::Text => None,
        }
    }

    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, FieldKind::Enumeration { .. })
    }

    /// Value a fresh form starts with: the first option, or empty text
    pub fn default_value(&self) -> String {
        self.options()
            .and_then(|options| options.first().cloned())
            .unwrap_or_default()
    }

    /// Check a value against the field's closed option set
    pub fn accepts(&self, value: &str) -> bool {
        match &self.kind {
            FieldKind::Text => true,
            FieldKind::Enumeration { options } => options.iter().any(|o| o == value),
        }
    }
}
