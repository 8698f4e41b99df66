// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::registry::{EntityKind, LineEnd};

/// Configuration error returned by mutating scene operations.
///
/// Any operation that returns this error leaves the registry it was
/// populating reset (empty and unpopulated) rather than partially filled.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneError {
    /// An attribute column did not have the same length as the primary
    /// position column of the registry being created.
    LengthMismatch {
        /// Registry that was being created.
        kind: EntityKind,
        /// Name of the offending column.
        field: &'static str,
        /// Length of the primary position column.
        expected: usize,
        /// Length of the offending column.
        found: usize,
    },
    /// A line endpoint had neither an explicit coordinate nor a node reference.
    MissingEndpoint {
        /// Index of the line.
        line: usize,
        /// Which end of the line could not be resolved.
        end: LineEnd,
    },
    /// A node reference named a kind that cannot be used as a line endpoint.
    UnknownNodeKind {
        /// The rejected kind name.
        name: String,
    },
    /// A node reference pointed past the end of the referenced registry.
    NodeOutOfRange {
        /// Referenced registry.
        kind: EntityKind,
        /// Requested index.
        index: usize,
        /// Number of entities in the referenced registry.
        len: usize,
    },
    /// A scale mode was selected without one of the parameters it requires.
    MissingScaleParameter {
        /// Scale mode name.
        mode: &'static str,
        /// Name of the missing parameter.
        name: &'static str,
    },
    /// A compound line was given fewer than two points.
    TooFewPoints {
        /// Index of the compound line.
        line: usize,
        /// Number of points supplied.
        found: usize,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                kind,
                field,
                expected,
                found,
            } => write!(
                f,
                "{kind} column `{field}` has {found} entries, expected {expected}"
            ),
            Self::MissingEndpoint { line, end } => write!(
                f,
                "line {line} has no coordinate or node reference for its {end} endpoint"
            ),
            Self::UnknownNodeKind { name } => {
                write!(f, "`{name}` cannot be referenced as a line endpoint")
            }
            Self::NodeOutOfRange { kind, index, len } => write!(
                f,
                "{kind} index {index} is out of range for a registry of {len}"
            ),
            Self::MissingScaleParameter { mode, name } => {
                write!(f, "{mode} scale mode requires `{name}`")
            }
            Self::TooFewPoints { line, found } => write!(
                f,
                "compound line {line} has {found} points, at least 2 are required"
            ),
        }
    }
}

impl core::error::Error for SceneError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_the_offending_column() {
        let err = SceneError::LengthMismatch {
            kind: EntityKind::Marker,
            field: "colors",
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "marker column `colors` has 2 entries, expected 3"
        );
    }
}
