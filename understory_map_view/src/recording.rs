// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Surface`] that records primitives instead of drawing them.
//!
//! It does **not** rasterize. It keeps every live primitive in a map keyed
//! by handle and logs each surface call, so tests and headless hosts can
//! assert on what the engine emitted and removed.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Circle, CircleSegment, Point, Vec2};
use peniko::Color;

use crate::surface::{GestureAction, PrimitiveId, Surface, UnsupportedGesture};

/// A live primitive held by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Filled circle.
    Circle {
        /// Geometry in surface coordinates.
        circle: Circle,
        /// Fill color.
        color: Color,
    },
    /// Filled pie wedge.
    Wedge {
        /// Geometry in surface coordinates.
        wedge: CircleSegment,
        /// Fill color.
        color: Color,
    },
    /// Stroked polyline.
    Polyline {
        /// Vertices in surface coordinates.
        points: Vec<Point>,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
}

/// A call recorded by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A primitive was created.
    Created(PrimitiveId),
    /// A live primitive was removed.
    Removed(PrimitiveId),
    /// The background was set.
    Background(Color),
    /// The surface scrolled natively.
    Panned {
        /// Point grabbed.
        anchor: Point,
        /// Point it was moved to.
        target: Point,
    },
    /// A gesture was bound.
    Bound {
        /// Gesture name.
        gesture: String,
        /// Action it triggers.
        action: GestureAction,
    },
}

/// Recording implementation of [`Surface`].
///
/// By default it accepts exactly the three default gesture names and has no
/// native scrolling.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    live: HashMap<PrimitiveId, Primitive>,
    next_id: u32,
    events: Vec<SurfaceEvent>,
    gestures: Option<Vec<String>>,
    bindings: Vec<(String, GestureAction)>,
    background: Option<Color>,
    native_pan: bool,
    scroll: Vec2,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Creates an empty surface accepting the default gestures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: HashMap::new(),
            next_id: 0,
            events: Vec::new(),
            gestures: Some(
                GestureAction::ALL
                    .iter()
                    .map(|a| a.default_gesture().to_string())
                    .collect(),
            ),
            bindings: Vec::new(),
            background: None,
            native_pan: false,
            scroll: Vec2::ZERO,
        }
    }

    /// Accepts only the listed gesture names.
    #[must_use]
    pub fn with_gestures(mut self, gestures: &[&str]) -> Self {
        self.gestures = Some(gestures.iter().map(|g| (*g).to_string()).collect());
        self
    }

    /// Accepts every gesture name.
    #[must_use]
    pub fn with_any_gesture(mut self) -> Self {
        self.gestures = None;
        self
    }

    /// Enables native scrolling.
    #[must_use]
    pub fn with_native_pan(mut self) -> Self {
        self.native_pan = true;
        self
    }

    /// Number of live primitives.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// The live primitive behind `id`.
    #[must_use]
    pub fn get(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.live.get(&id)
    }

    /// Vertices of a live polyline.
    #[must_use]
    pub fn polyline_points(&self, id: PrimitiveId) -> Option<&[Point]> {
        match self.live.get(&id)? {
            Primitive::Polyline { points, .. } => Some(points),
            _ => None,
        }
    }

    /// Iterates live primitives in handle order.
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveId, &Primitive)> + '_ {
        let mut ids: Vec<PrimitiveId> = self.live.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().map(|id| (id, &self.live[&id]))
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Clears the call log; live primitives are kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Gestures bound so far.
    #[must_use]
    pub fn bindings(&self) -> &[(String, GestureAction)] {
        &self.bindings
    }

    /// Gesture bound to `action`, if any.
    #[must_use]
    pub fn binding_for(&self, action: GestureAction) -> Option<&str> {
        self.bindings
            .iter()
            .rev()
            .find(|(_, a)| *a == action)
            .map(|(g, _)| g.as_str())
    }

    /// The last background color set.
    #[must_use]
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Accumulated native scroll offset.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    fn insert(&mut self, primitive: Primitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("RecordingSurface: too many primitives for u32 PrimitiveId");
        self.live.insert(id, primitive);
        self.events.push(SurfaceEvent::Created(id));
        id
    }
}

impl Surface for RecordingSurface {
    fn fill_circle(&mut self, circle: Circle, color: Color) -> PrimitiveId {
        self.insert(Primitive::Circle { circle, color })
    }

    fn fill_wedge(&mut self, wedge: CircleSegment, color: Color) -> PrimitiveId {
        self.insert(Primitive::Wedge { wedge, color })
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) -> PrimitiveId {
        self.insert(Primitive::Polyline {
            points: points.to_vec(),
            width,
            color,
        })
    }

    fn remove(&mut self, id: PrimitiveId) {
        if self.live.remove(&id).is_some() {
            self.events.push(SurfaceEvent::Removed(id));
        }
    }

    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
        self.events.push(SurfaceEvent::Background(color));
    }

    fn native_pan(&mut self, anchor: Point, target: Point) -> bool {
        if !self.native_pan {
            return false;
        }
        self.scroll -= target - anchor;
        self.events.push(SurfaceEvent::Panned { anchor, target });
        true
    }

    fn bind_gesture(
        &mut self,
        gesture: &str,
        action: GestureAction,
    ) -> Result<(), UnsupportedGesture> {
        if let Some(accepted) = &self.gestures {
            if !accepted.iter().any(|g| g == gesture) {
                return Err(UnsupportedGesture);
            }
        }
        self.bindings.push((gesture.to_string(), action));
        self.events.push(SurfaceEvent::Bound {
            gesture: gesture.to_string(),
            action,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn removal_is_logged_once() {
        let mut s = RecordingSurface::new();
        let id = s.fill_circle(Circle::new(Point::ORIGIN, 1.0), css::RED);
        s.remove(id);
        s.remove(id);
        assert_eq!(
            s.events(),
            [SurfaceEvent::Created(id), SurfaceEvent::Removed(id)]
        );
        assert_eq!(s.live_count(), 0);
    }

    #[test]
    fn gesture_whitelist() {
        let mut s = RecordingSurface::new().with_gestures(&["<Wheel>"]);
        assert!(s.bind_gesture("<Wheel>", GestureAction::Zoom).is_ok());
        assert_eq!(
            s.bind_gesture("<MouseWheel>", GestureAction::Zoom),
            Err(UnsupportedGesture)
        );
        assert_eq!(s.binding_for(GestureAction::Zoom), Some("<Wheel>"));
    }
}
