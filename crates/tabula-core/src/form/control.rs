//! Presentation-neutral form controls

use crate::error::{TabulaError, TabulaResult};
use crate::record::FormValues;
use crate::schema::{FieldDescriptor, FieldKind};

/// Input widget for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    TextInput { value: String },
    /// Closed option list; `selected` is `None` until a value is chosen
    Selector {
        options: Vec<String>,
        selected: Option<String>,
    },
}

/// One rendered field: what to show and what the user may pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub key: String,
    pub label: String,
    pub widget: Widget,
}

impl Control {
    /// Render a descriptor against the current values
    pub fn render(descriptor: &FieldDescriptor, values: &FormValues) -> Self {
        let current = values.display(&descriptor.key);
        let widget = match &descriptor.kind {
            FieldKind::Text => Widget::TextInput { value: current },
            FieldKind::Enumeration { options } => Widget::Selector {
                options: options.clone(),
                selected: (!current.is_empty()).then_some(current),
            },
        };
        Self {
            key: descriptor.key.clone(),
            label: descriptor.label.clone(),
            widget,
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self.widget, Widget::Selector { .. })
    }
}

/// Write a value into a form after checking it against the field list
pub(crate) fn write_value(
    fields: &[FieldDescriptor],
    values: &mut FormValues,
    key: &str,
    value: &str,
) -> TabulaResult<()> {
    let descriptor = fields.iter().find(|f| f.key == key).ok_or_else(|| {
        TabulaError::invalid_input_field(format!("form has no field '{}'", key), key)
    })?;
    if !descriptor.accepts(value) {
        return Err(TabulaError::invalid_input_field(
            format!(
                "'{}' is not an option of {}",
                value, descriptor.label
            ),
            key,
        ));
    }
    values.set(key, value);
    Ok(())
}
