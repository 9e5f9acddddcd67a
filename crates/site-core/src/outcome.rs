//! Result of a draft store operation.
//!
//! Store operations never fail loudly: misuse degrades to a no-op. The
//! `Outcome` tells callers (and tests) whether anything happened and, if not,
//! why.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BusinessType;
use crate::ids::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// Why an operation was a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Mutation attempted with nothing under edit.
    NoActiveDraft,
    /// Commit attempted on a clean draft.
    NoChanges,
    /// The active business type never shows this section.
    LockedSection {
        section: String,
        business_type: BusinessType,
    },
    /// `start_editing` was given an id the store does not hold.
    EntityNotFound { id: EntityId },
    /// The field cannot be edited (the entity id).
    ImmutableField { field: String },
    /// The path runs through a scalar or past the end of an array.
    PathConflict { path: String },
    /// The path string could not be parsed.
    InvalidPath { path: String },
    /// A list edit named an item that is not in the list.
    ItemNotFound { path: String, item: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveDraft => f.write_str("no active draft"),
            Self::NoChanges => f.write_str("no changes to commit"),
            Self::LockedSection {
                section,
                business_type,
            } => write!(f, "section '{section}' is not available for business type '{business_type}'"),
            Self::EntityNotFound { id } => write!(f, "entity {id} not found"),
            Self::ImmutableField { field } => write!(f, "field '{field}' cannot be edited"),
            Self::PathConflict { path } => write!(f, "cannot write through '{path}'"),
            Self::InvalidPath { path } => write!(f, "invalid field path '{path}'"),
            Self::ItemNotFound { path, item } => write!(f, "no item '{item}' in '{path}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejection_serializes_with_reason_tag() {
        let outcome = Outcome::Rejected(Rejection::LockedSection {
            section: "team".into(),
            business_type: BusinessType::Freelancer,
        });
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"rejected": {"reason": "locked_section", "section": "team", "business_type": "freelancer"}})
        );
        assert_eq!(serde_json::to_value(Outcome::Applied).unwrap(), json!("applied"));
    }

    #[test]
    fn display_is_readable() {
        let outcome = Outcome::Rejected(Rejection::EntityNotFound { id: EntityId::from(9) });
        assert_eq!(outcome.to_string(), "rejected: entity 9 not found");
        assert!(outcome.rejection().is_some());
        assert!(Outcome::Applied.is_applied());
    }
}
