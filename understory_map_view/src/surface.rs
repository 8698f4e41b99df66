// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a host drawing surface fulfils.

use core::fmt;

use kurbo::{Circle, CircleSegment, Point};
use peniko::Color;

/// Opaque handle to a primitive drawn on a [`Surface`].
///
/// Handles are stable for the lifetime of the primitive and are used to
/// remove it before the owning entity is redrawn.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub u32);

/// Engine actions a host input gesture can be bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureAction {
    /// Zoom toward the pointer by the wheel delta.
    Zoom,
    /// Begin a drag at the pointer.
    DragStart,
    /// Continue a drag to the pointer.
    DragMotion,
}

impl GestureAction {
    /// Every action, in binding order.
    pub const ALL: [Self; 3] = [Self::Zoom, Self::DragStart, Self::DragMotion];

    /// The gesture bound when the configured one is refused.
    #[must_use]
    pub const fn default_gesture(self) -> &'static str {
        match self {
            Self::Zoom => DEFAULT_ZOOM_GESTURE,
            Self::DragStart => DEFAULT_DRAG_START_GESTURE,
            Self::DragMotion => DEFAULT_DRAG_MOTION_GESTURE,
        }
    }
}

impl fmt::Display for GestureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zoom => "zoom",
            Self::DragStart => "drag start",
            Self::DragMotion => "drag motion",
        })
    }
}

/// Primary wheel.
pub const DEFAULT_ZOOM_GESTURE: &str = "<MouseWheel>";
/// Primary button press.
pub const DEFAULT_DRAG_START_GESTURE: &str = "<ButtonPress-1>";
/// Primary button drag.
pub const DEFAULT_DRAG_MOTION_GESTURE: &str = "<B1-Motion>";

/// Returned by [`Surface::bind_gesture`] for a gesture name it cannot bind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedGesture;

impl fmt::Display for UnsupportedGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("gesture is not supported by this surface")
    }
}

impl core::error::Error for UnsupportedGesture {}

/// A pointer or wheel event as delivered by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in surface window coordinates.
    pub position: Point,
    /// Raw wheel delta; zero for button and motion events.
    pub wheel_delta: f64,
}

impl PointerEvent {
    /// A button or motion event at `position`.
    #[must_use]
    pub const fn at(position: Point) -> Self {
        Self {
            position,
            wheel_delta: 0.0,
        }
    }

    /// A wheel event at `position`.
    #[must_use]
    pub const fn wheel(position: Point, delta: f64) -> Self {
        Self {
            position,
            wheel_delta: delta,
        }
    }
}

/// A drawable host surface.
///
/// Implementations hand out a fresh [`PrimitiveId`] for every primitive they
/// create and must accept [`Surface::remove`] for any live handle.
pub trait Surface {
    /// Draws a filled circle.
    fn fill_circle(&mut self, circle: Circle, color: Color) -> PrimitiveId;

    /// Draws a filled pie wedge.
    fn fill_wedge(&mut self, wedge: CircleSegment, color: Color) -> PrimitiveId;

    /// Strokes an open polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) -> PrimitiveId;

    /// Removes a primitive. Unknown handles are ignored.
    fn remove(&mut self, id: PrimitiveId);

    /// Sets the surface background.
    fn set_background(&mut self, color: Color) {
        let _ = color;
    }

    /// Scrolls the surface natively so that content under `anchor` moves to
    /// `target`.
    ///
    /// Returns `false` if the surface has no native scrolling, in which case
    /// the engine pans by moving every entity instead.
    fn native_pan(&mut self, anchor: Point, target: Point) -> bool {
        let _ = (anchor, target);
        false
    }

    /// Routes the named host gesture to `action`.
    ///
    /// After a successful bind the host is expected to deliver matching input
    /// to [`crate::Scene::handle`] with the same action.
    fn bind_gesture(&mut self, gesture: &str, action: GestureAction)
    -> Result<(), UnsupportedGesture>;
}
