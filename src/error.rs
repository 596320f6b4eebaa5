use std::fmt;

use crate::reference::ReferenceKind;

/// A reference collection could not be fetched.
///
/// Every caller that was waiting on the same in-flight fetch receives a
/// clone of the same error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: ReferenceKind,
    /// Fixed, human-readable message for the resource, e.g. "Unable to fetch crops."
    pub message: String,
    /// Transport-level cause as reported by the fetcher.
    pub detail: String,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PicklistError {
    DuplicateRowKey { key: String },
    MissingRowKey { column: String, position: usize },
}

impl fmt::Display for PicklistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicklistError::DuplicateRowKey { key } => {
                write!(f, "row key '{key}' appears more than once")
            }
            PicklistError::MissingRowKey { column, position } => {
                write!(f, "row {position} has no value in key column '{column}'")
            }
        }
    }
}

impl std::error::Error for PicklistError {}
