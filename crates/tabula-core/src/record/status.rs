//! Two-valued status enumeration

use crate::error::TabulaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record status, boolean on the wire and named in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Not Active")]
    NotActive,
}

impl Status {
    pub const ACTIVE: &'static str = "Active";
    pub const NOT_ACTIVE: &'static str = "Not Active";

    /// Display options in selector order
    pub const OPTIONS: [&'static str; 2] = [Self::ACTIVE, Self::NOT_ACTIVE];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => Self::ACTIVE,
            Status::NotActive => Self::NOT_ACTIVE,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }

    /// Display options as owned strings
    pub fn options() -> Vec<String> {
        Self::OPTIONS.iter().map(|s| s.to_string()).collect()
    }
}

impl From<bool> for Status {
    fn from(active: bool) -> Self {
        if active {
            Status::Active
        } else {
            Status::NotActive
        }
    }
}

impl From<Status> for bool {
    fn from(status: Status) -> Self {
        status.is_active()
    }
}

impl FromStr for Status {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::ACTIVE => Ok(Status::Active),
            Self::NOT_ACTIVE => Ok(Status::NotActive),
            other => Err(TabulaError::invalid_input_field(
                format!(
                    "'{}' is not one of {}",
                    other,
                    Self::OPTIONS.join(", ")
                ),
                "enum",
            )),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_roundtrip() {
        for flag in [true, false] {
            let status = Status::from(flag);
            assert_eq!(bool::from(status), flag);
        }
        assert_eq!(Status::from(true).as_str(), "Active");
        assert_eq!(Status::from(false).as_str(), "Not Active");
    }

    #[test]
    fn test_parse_display_form() {
        assert_eq!("Active".parse::<Status>().ok(), Some(Status::Active));
        assert_eq!("Not Active".parse::<Status>().ok(), Some(Status::NotActive));
        assert!("active".parse::<Status>().is_err());
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&Status::NotActive).expect("serialize");
        assert_eq!(json, "\"Not Active\"");
    }
}
