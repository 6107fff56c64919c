//! Machine records in wire and display shape

use super::status::Status;
use super::values::FormValues;
use crate::error::{TabulaError, TabulaResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field names of a machine record
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const EMAIL: &str = "email";
    pub const NUMBER: &str = "number";
    pub const STATUS: &str = "enum";

    /// Every field in column order
    pub const ALL: [&str; 6] = [ID, NAME, LOCATION, EMAIL, NUMBER, STATUS];
}

/// A record as the server sends it: status is a boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineWire {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub number: String,
    #[serde(rename = "enum", default)]
    pub active: bool,
}

/// A record as the table holds it: status is a named option.
///
/// Serializing a `Machine` keeps the status in its display form, which is the
/// body the update endpoint receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: String,
    pub name: String,
    pub location: String,
    pub email: String,
    pub number: String,
    #[serde(rename = "enum")]
    pub status: Status,
}

/// Body of a create request: no identity, boolean status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMachine {
    pub name: String,
    pub location: String,
    pub email: String,
    pub number: String,
    #[serde(rename = "enum")]
    pub active: bool,
}

impl From<MachineWire> for Machine {
    fn from(wire: MachineWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            location: wire.location,
            email: wire.email,
            number: wire.number,
            status: Status::from(wire.active),
        }
    }
}

impl From<Machine> for MachineWire {
    fn from(machine: Machine) -> Self {
        Self {
            id: machine.id,
            name: machine.name,
            location: machine.location,
            email: machine.email,
            number: machine.number,
            active: machine.status.into(),
        }
    }
}

impl Machine {
    /// Read a field in display form
    pub fn get(&self, field: &str) -> Option<String> {
        match field {
            fields::ID => Some(self.id.clone()),
            fields::NAME => Some(self.name.clone()),
            fields::LOCATION => Some(self.location.clone()),
            fields::EMAIL => Some(self.email.clone()),
            fields::NUMBER => Some(self.number.clone()),
            fields::STATUS => Some(self.status.to_string()),
            _ => None,
        }
    }

    /// Write a field from its display form; the identity is immutable
    pub fn set(&mut self, field: &str, value: &str) -> TabulaResult<()> {
        match field {
            fields::ID => {
                return Err(TabulaError::invalid_input_field(
                    "the record identity cannot be edited",
                    field,
                ));
            }
            fields::NAME => self.name = value.to_string(),
            fields::LOCATION => self.location = value.to_string(),
            fields::EMAIL => self.email = value.to_string(),
            fields::NUMBER => self.number = value.to_string(),
            fields::STATUS => self.status = value.parse()?,
            other => {
                return Err(TabulaError::invalid_input_field(
                    format!("unknown field '{}'", other),
                    other,
                ));
            }
        }
        Ok(())
    }

    /// Body for the update endpoint
    pub fn to_update_body(&self) -> TabulaResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl NewMachine {
    /// Build a create body from form values, turning the status option into a boolean
    pub fn from_values(values: &FormValues) -> TabulaResult<Self> {
        let status: Status = values.display(fields::STATUS).parse()?;
        Ok(Self {
            name: values.display(fields::NAME),
            location: values.display(fields::LOCATION),
            email: values.display(fields::EMAIL),
            number: values.display(fields::NUMBER),
            active: status.into(),
        })
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string, got {}",
            other
        ))),
    }
}
