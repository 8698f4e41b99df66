// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live zoom and pan on top of the cached projection.
//!
//! The projection runs once per scale resolution. Interaction only changes a
//! uniform zoom factor and a pixel offset, and every on-screen position is
//! re-derived from its cached original position:
//!
//! ```text
//! on_screen = original * zoom + offset
//! ```

use kurbo::{Point, TranslateScale, Vec2};

/// Tracks an in-progress pointer drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    /// Where the drag started.
    pub start_pos: Option<Point>,
    /// Last pointer position seen during the drag.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Starts a drag at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Moves the drag to `pos`, returning the movement since the last position.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Zoom factor and pixel offset applied to original pixel positions.
///
/// State accumulates across events and is only reset by
/// [`ViewTransform::reset`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    offset: Vec2,
    scroll: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    drag: DragState,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    /// Unit zoom, zero offset, zoom limited to `[1e-3, 1e3]`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
            scroll: Vec2::ZERO,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            drag: DragState::default(),
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pixel offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// How far the surface itself has scrolled natively.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Current drag state.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Sets the zoom range, normalizing it so that `min <= max`.
    ///
    /// The current zoom is left as is; later zoom steps are clamped.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = lo;
        self.max_zoom = hi;
    }

    /// The map from original pixel positions to on-screen positions.
    #[must_use]
    pub fn transform(&self) -> TranslateScale {
        TranslateScale::new(self.offset, self.zoom)
    }

    /// Maps an original pixel position to its on-screen position.
    #[must_use]
    pub fn to_screen(&self, original: Point) -> Point {
        self.transform() * original
    }

    /// Maps an on-screen position back to an original pixel position.
    #[must_use]
    pub fn to_original(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.offset) / self.zoom).to_point()
    }

    /// Converts a pointer position in window coordinates to surface
    /// coordinates, accounting for native scrolling.
    #[must_use]
    pub fn window_to_surface(&self, pointer: Point) -> Point {
        pointer + self.scroll
    }

    /// Zooms toward `pointer` (surface coordinates) by `gain * delta`.
    ///
    /// With `step = gain * delta` the zoom is multiplied by `1 + step` and
    /// the offset is updated so that the point under the pointer stays put:
    ///
    /// ```text
    /// offset = offset * (1 + step) - pointer * step
    /// ```
    ///
    /// Steps that would leave the zoom range are shortened to end on its
    /// boundary. Steps with a non-positive or non-finite factor are ignored.
    /// Returns `true` if the transform changed.
    pub fn zoom_at(&mut self, pointer: Point, delta: f64, gain: f64) -> bool {
        let factor = 1.0 + gain * delta;
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if new_zoom == self.zoom {
            return false;
        }
        let factor = new_zoom / self.zoom;
        let step = factor - 1.0;
        self.offset = self.offset * factor - pointer.to_vec2() * step;
        self.zoom = new_zoom;
        true
    }

    /// Shifts every on-screen position by `delta`.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.offset += delta;
        true
    }

    /// Records that the surface scrolled natively by `-delta`.
    pub(crate) fn scrolled(&mut self, delta: Vec2) {
        self.scroll -= delta;
    }

    /// Begins a drag at `pointer`.
    pub fn drag_start(&mut self, pointer: Point) {
        self.drag.start(pointer);
    }

    /// Continues a drag, returning the pointer movement scaled by `gain`.
    pub fn drag_motion(&mut self, pointer: Point, gain: f64) -> Option<Vec2> {
        self.drag.update(pointer).map(|d| d * gain)
    }

    /// Ends the drag.
    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// Returns to unit zoom and zero offset. Native scroll is left alone.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = Vec2::ZERO;
        self.drag.end();
    }
}
