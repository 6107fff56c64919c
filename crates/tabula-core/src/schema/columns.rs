//! Fixed column definitions of the machine table

use super::descriptor::FieldDescriptor;
use crate::record::{Status, fields};

/// Columns of the machine table, in display order.
///
/// Only `name` and `location` are editable inline; the identity is assigned
/// by the server.
pub fn machine_columns() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text(fields::ID, "ID").read_only().with_size(50),
        FieldDescriptor::text(fields::NAME, "Name").with_size(100),
        FieldDescriptor::text(fields::LOCATION, "Location").with_size(100),
        FieldDescriptor::text(fields::EMAIL, "Email").read_only(),
        FieldDescriptor::text(fields::NUMBER, "Number").read_only(),
        FieldDescriptor::enumeration(fields::STATUS, "Enum", Status::options())
            .read_only()
            .with_size(80),
    ]
}

/// Look up a machine column by key
pub fn column(key: &str) -> Option<FieldDescriptor> {
    machine_columns().into_iter().find(|c| c.key == key)
}
