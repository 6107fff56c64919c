//! Failure notices published to the UI

use crate::error::TabulaError;
use std::fmt;

/// Network operations issued by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed operation the user should hear about
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub operation: Operation,
    /// Record the operation targeted, when there is one
    pub target: Option<String>,
    pub error: TabulaError,
}

impl Notice {
    pub fn new(operation: Operation, target: Option<String>, error: TabulaError) -> Self {
        Self {
            operation,
            target,
            error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(
                f,
                "Could not {} machine {}: {}",
                self.operation, target, self.error
            ),
            None => write!(f, "Could not {} machines: {}", self.operation, self.error),
        }
    }
}
