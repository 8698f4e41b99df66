// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;

use crate::warning::{Fallback, Warning};

/// Optional payload attached to a marker, pie marker, or line.
///
/// Only [`Info::None`] exists today. New payload kinds are added as variants;
/// hosts that match on this enum must keep a wildcard arm.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum Info {
    /// No attached info.
    #[default]
    None,
}

impl Info {
    /// Builds an info attachment from a host-supplied kind name.
    ///
    /// Unknown kinds fall back to [`Info::None`] with a warning.
    pub fn from_kind(kind: &str) -> Fallback<Self> {
        match kind {
            "none" | "" => Fallback::accepted(Self::None),
            other => Fallback::substituted(
                Self::None,
                Warning::UnsupportedInfoKind {
                    given: other.to_string(),
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_degrades_to_none() {
        let f = Info::from_kind("tooltip");
        assert_eq!(f.value, Info::None);
        assert!(f.is_substituted());
        assert!(!Info::from_kind("none").is_substituted());
    }
}
