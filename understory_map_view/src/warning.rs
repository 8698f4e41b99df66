// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable fallbacks.
//!
//! A bad scale mode name, an unsupported gesture, or an unknown info kind is
//! never fatal. The component that detects it substitutes a documented default
//! and reports a [`Warning`] next to the value it chose, as a [`Fallback`].
//! Callers may inspect the warning or drop it; the scene funnels the ones it
//! sees into its [`Warnings`] sink, which logs them through the `log` facade
//! when warnings are enabled.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::surface::GestureAction;

/// Axis of a domain bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// East/west extent.
    EastWest,
    /// North/south extent.
    NorthSouth,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EastWest => "east-west",
            Self::NorthSouth => "north-south",
        })
    }
}

/// A recoverable policy fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// The scale mode name was not recognized; automatic fitting was used.
    UnknownScaleMode {
        /// The rejected mode name.
        given: String,
    },
    /// The host surface refused a gesture name; the default was bound instead.
    UnsupportedGesture {
        /// Action the gesture was meant to trigger.
        action: GestureAction,
        /// The rejected gesture name.
        requested: String,
        /// The default gesture name bound in its place.
        fallback: &'static str,
    },
    /// The host surface refused even the default gesture; the action is unbound.
    UnboundGesture {
        /// Action left without a gesture.
        action: GestureAction,
    },
    /// The info attachment kind was not recognized; no info was attached.
    UnsupportedInfoKind {
        /// The rejected kind name.
        given: String,
    },
    /// The fitted bounding box had no extent along an axis and was widened.
    DegenerateSpan {
        /// The collapsed axis.
        axis: Axis,
    },
    /// A border fraction would shrink the fitted span to nothing or was not
    /// finite; no border was applied on that axis.
    InvalidBorder {
        /// Axis the border applies to.
        axis: Axis,
        /// The rejected fraction.
        given: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScaleMode { given } => {
                write!(f, "`{given}` is not a scale mode, using automatic")
            }
            Self::UnsupportedGesture {
                action,
                requested,
                fallback,
            } => write!(
                f,
                "`{requested}` is not a supported gesture, using `{fallback}` for {action}"
            ),
            Self::UnboundGesture { action } => {
                write!(f, "no gesture could be bound for {action}")
            }
            Self::UnsupportedInfoKind { given } => {
                write!(f, "`{given}` is not a supported info kind, attaching none")
            }
            Self::DegenerateSpan { axis } => {
                write!(f, "scene has no {axis} extent, widening to the default span")
            }
            Self::InvalidBorder { axis, given } => {
                write!(f, "{given} is not a usable {axis} border, using none")
            }
        }
    }
}

/// A value chosen by a component, possibly in place of what was asked for.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Fallback<T> {
    /// The value to use.
    pub value: T,
    /// Set when `value` is a substituted default.
    pub warning: Option<Warning>,
}

impl<T> Fallback<T> {
    /// A value that was accepted as requested.
    pub fn accepted(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// A default that replaced a rejected request.
    pub fn substituted(value: T, warning: Warning) -> Self {
        Self {
            value,
            warning: Some(warning),
        }
    }

    /// Returns `true` if the value is a substituted default.
    pub fn is_substituted(&self) -> bool {
        self.warning.is_some()
    }

    /// Hands any warning to `sink` and returns the value.
    pub fn report(self, sink: &mut Warnings) -> T {
        if let Some(warning) = self.warning {
            sink.push(warning);
        }
        self.value
    }
}

/// Collects warnings raised while a scene is built and driven.
#[derive(Clone, Debug, Default)]
pub struct Warnings {
    enabled: bool,
    seen: Vec<Warning>,
}

impl Warnings {
    /// Creates a sink. A disabled sink drops everything silently.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: Vec::new(),
        }
    }

    /// Returns `true` if warnings are logged and retained.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the sink. Already retained warnings are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Records a warning.
    pub fn push(&mut self, warning: Warning) {
        if !self.enabled {
            return;
        }
        log::warn!("{warning}");
        self.seen.push(warning);
    }

    /// Warnings retained so far, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[Warning] {
        &self.seen
    }

    /// Removes and returns all retained warnings.
    pub fn take(&mut self) -> Vec<Warning> {
        core::mem::take(&mut self.seen)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn disabled_sink_drops_warnings() {
        let mut sink = Warnings::new(false);
        sink.push(Warning::DegenerateSpan {
            axis: Axis::EastWest,
        });
        assert!(sink.as_slice().is_empty());
    }

    #[test]
    fn report_forwards_only_substitutions() {
        let mut sink = Warnings::new(true);
        let v = Fallback::accepted(3).report(&mut sink);
        assert_eq!(v, 3);
        assert!(sink.as_slice().is_empty());

        let v = Fallback::substituted(
            4,
            Warning::UnknownScaleMode {
                given: "zoomy".to_string(),
            },
        )
        .report(&mut sink);
        assert_eq!(v, 4);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.as_slice().is_empty());
    }
}
