// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-kind scene registries.
//!
//! Each kind of scene object lives in its own [`Registry`]: an index-stable
//! vector of entities, where the index is the entity's identity for the
//! lifetime of one population. A registry is only ever filled wholesale by
//! its `create` operation, which validates every input column before any
//! entity is built; on error the registry stays reset.
//!
//! Every entity caches two pixel positions per vertex (see [`Placement`]):
//! the *original* position produced by the projection, and the *current*
//! on-screen position derived from it through the live view transform.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, TranslateScale};

use crate::bounds::Extremes;
use crate::error::SceneError;
use crate::projection::Projection;
use crate::surface::{PrimitiveId, Surface};

mod compound;
mod line;
mod marker;
mod pie;

pub use compound::{CompoundLine, CompoundLineColumns};
pub use line::{Endpoints, Line, LineColumns, NodeKind, NodeRef, Nodes};
pub use marker::{Marker, MarkerColumns};
pub use pie::{PieMarker, PieMarkerColumns, Slice};

/// The four kinds of scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Filled circle markers.
    Marker,
    /// Pie-chart markers.
    PieMarker,
    /// Two-point lines.
    Line,
    /// Multi-point polylines.
    CompoundLine,
}

impl EntityKind {
    /// Every kind, in render order (earlier kinds are painted first).
    pub const ALL: [Self; 4] = [
        Self::Line,
        Self::CompoundLine,
        Self::PieMarker,
        Self::Marker,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::PieMarker => "pie marker",
            Self::Line => "line",
            Self::CompoundLine => "compound line",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One end of a [`Line`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineEnd {
    /// The first endpoint.
    Start,
    /// The second endpoint.
    End,
}

impl fmt::Display for LineEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::End => "end",
        })
    }
}

/// Cached pixel positions for one vertex of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    original: Point,
    current: Point,
}

impl Placement {
    /// Projects `domain` and resets the on-screen position to the result.
    pub fn project(&mut self, domain: Point, projection: &Projection) {
        self.original = projection.project(domain);
        self.current = self.original;
    }

    /// Derives the on-screen position from the original one.
    ///
    /// Always starts from the original position so repeated view changes
    /// never accumulate rounding drift.
    pub fn apply_view(&mut self, view: TranslateScale) {
        self.current = view * self.original;
    }

    /// Position after projection, before any zoom or pan.
    #[must_use]
    pub fn original(&self) -> Point {
        self.original
    }

    /// Position currently shown on the surface.
    #[must_use]
    pub fn current(&self) -> Point {
        self.current
    }
}

/// Behavior shared by every entity kind.
pub trait Entity {
    /// The kind of registry this entity lives in.
    const KIND: EntityKind;

    /// Domain bounding box of this entity.
    fn extremes(&self) -> Extremes;

    /// Recomputes original pixel positions under a new projection.
    fn project(&mut self, projection: &Projection);

    /// Recomputes on-screen positions under a new view transform.
    fn apply_view(&mut self, view: TranslateScale);

    /// Removes any previously drawn primitives, then draws the entity at its
    /// current on-screen position, retaining the new handles.
    fn render<S: Surface + ?Sized>(&mut self, surface: &mut S);

    /// Moves this entity's live handles into `out`, leaving it undrawn.
    fn take_handles(&mut self, out: &mut Vec<PrimitiveId>);
}

/// Authoritative, index-stable collection of one kind of entity.
#[derive(Clone, Debug)]
pub struct Registry<T> {
    items: Vec<T>,
    populated: bool,
    /// Handles of entities discarded by [`Registry::reset`], removed from the
    /// surface on the next render.
    retired: Vec<PrimitiveId>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            populated: false,
            retired: Vec::new(),
        }
    }
}

impl<T: Entity> Registry<T> {
    /// Creates an empty, unpopulated registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The kind of entity stored here.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    /// Empties the registry and clears the populated flag.
    ///
    /// Primitives already drawn for the discarded entities are removed from
    /// the surface by the next [`Registry::render`].
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.take_handles(&mut self.retired);
        }
        self.items.clear();
        self.populated = false;
    }

    /// Returns `true` once `create` has succeeded and until the next reset.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The entity at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// All entities in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates entities in index order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Bounding box over every entity, or `None` when empty.
    #[must_use]
    pub fn compute_extremes(&self) -> Option<Extremes> {
        self.items
            .iter()
            .map(Entity::extremes)
            .reduce(Extremes::union)
    }

    /// Projects every entity, caching original and on-screen positions.
    pub fn compute_unzoomed_pixels(&mut self, projection: &Projection) {
        for item in &mut self.items {
            item.project(projection);
        }
    }

    /// Re-derives every on-screen position from the cached original ones.
    pub fn apply_view(&mut self, view: TranslateScale) {
        for item in &mut self.items {
            item.apply_view(view);
        }
    }

    /// Draws every entity, replacing whatever it drew before.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for id in self.retired.drain(..) {
            surface.remove(id);
        }
        for item in &mut self.items {
            item.render(surface);
        }
    }

    /// Removes every primitive this registry has on the surface.
    pub fn clear_surface<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for item in &mut self.items {
            item.take_handles(&mut self.retired);
        }
        for id in self.retired.drain(..) {
            surface.remove(id);
        }
    }

    /// Replaces the contents with freshly built entities.
    pub(crate) fn fill(&mut self, items: Vec<T>) {
        self.reset();
        self.items = items;
        self.populated = true;
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Checks that an attribute column matches the primary column's length.
pub(crate) fn check_len(
    kind: EntityKind,
    field: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), SceneError> {
    if expected == found {
        Ok(())
    } else {
        Err(SceneError::LengthMismatch {
            kind,
            field,
            expected,
            found,
        })
    }
}

/// Checks an optional column; an absent column always matches.
pub(crate) fn check_opt_len<U>(
    kind: EntityKind,
    field: &'static str,
    expected: usize,
    column: Option<&[U]>,
) -> Result<(), SceneError> {
    match column {
        Some(c) => check_len(kind, field, expected, c.len()),
        None => Ok(()),
    }
}

/// Removes the primitive held in `slot`, if any, leaving it empty.
pub(crate) fn clear_handle<S: Surface + ?Sized>(surface: &mut S, slot: &mut Option<PrimitiveId>) {
    if let Some(old) = slot.take() {
        surface.remove(old);
    }
}
