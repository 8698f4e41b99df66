// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Circle, CircleSegment, Point, TranslateScale};
use peniko::Color;
use smallvec::SmallVec;

use super::{Entity, EntityKind, Placement, Registry, check_len, check_opt_len};
use crate::bounds::Extremes;
use crate::error::SceneError;
use crate::info::Info;
use crate::projection::Projection;
use crate::surface::{PrimitiveId, Surface};

/// One slice of a [`PieMarker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slice {
    /// Slice fill color.
    pub color: Color,
    /// Proportional length; slices share the full circle by their lengths.
    pub length: f64,
}

impl Slice {
    /// Creates a slice.
    #[must_use]
    pub const fn new(color: Color, length: f64) -> Self {
        Self { color, length }
    }
}

/// A pie chart drawn at a domain position.
///
/// The first slice starts at angle zero (pointing along `+x`) and slices
/// follow in order, each sweeping `length / total` of a full turn.
#[derive(Clone, Debug, PartialEq)]
pub struct PieMarker {
    position: Point,
    placement: Placement,
    radius: f64,
    color: Color,
    name: String,
    info: Info,
    slices: SmallVec<[Slice; 4]>,
    handles: SmallVec<[PrimitiveId; 4]>,
}

impl PieMarker {
    /// Domain position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Cached pixel positions.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Radius in pixels.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fill color used when there is nothing to slice.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attached info.
    #[must_use]
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Slices in drawing order.
    #[must_use]
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Handles of the drawn primitives, one per visible slice.
    #[must_use]
    pub fn handles(&self) -> &[PrimitiveId] {
        &self.handles
    }

    /// Wedge geometry for every slice with a positive length.
    ///
    /// Returns nothing if the lengths do not sum to a positive total.
    pub fn wedges(&self) -> impl Iterator<Item = (CircleSegment, Color)> + '_ {
        let total: f64 = self.slices.iter().map(|s| s.length.max(0.0)).sum();
        let center = self.placement.current();
        let radius = self.radius;
        let mut start = 0.0;
        self.slices
            .iter()
            .filter(move |_| total > 0.0)
            .filter_map(move |s| {
                let length = s.length.max(0.0);
                if length == 0.0 {
                    return None;
                }
                let sweep = TAU * length / total;
                let wedge = CircleSegment::new(center, radius, 0.0, start, sweep);
                start += sweep;
                Some((wedge, s.color))
            })
    }
}

impl Entity for PieMarker {
    const KIND: EntityKind = EntityKind::PieMarker;

    fn extremes(&self) -> Extremes {
        Extremes::from_point(self.position)
    }

    fn project(&mut self, projection: &Projection) {
        self.placement.project(self.position, projection);
    }

    fn apply_view(&mut self, view: TranslateScale) {
        self.placement.apply_view(view);
    }

    fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for old in self.handles.drain(..) {
            surface.remove(old);
        }
        let mut fresh: SmallVec<[PrimitiveId; 4]> = self
            .wedges()
            .map(|(wedge, color)| surface.fill_wedge(wedge, color))
            .collect();
        if fresh.is_empty() {
            let circle = Circle::new(self.placement.current(), self.radius);
            fresh.push(surface.fill_circle(circle, self.color));
        }
        self.handles = fresh;
    }

    fn take_handles(&mut self, out: &mut Vec<PrimitiveId>) {
        out.extend(self.handles.drain(..));
    }
}

/// Column-wise input for creating a `Registry<PieMarker>`.
#[derive(Clone, Copy, Debug)]
pub struct PieMarkerColumns<'a> {
    /// Domain positions; the primary column.
    pub positions: &'a [Point],
    /// Radii in pixels.
    pub radii: &'a [f64],
    /// Fill colors used when a pie has nothing to slice.
    pub colors: &'a [Color],
    /// Display names.
    pub names: &'a [&'a str],
    /// Slices per pie.
    pub slices: &'a [Vec<Slice>],
    /// Attached info; `None` attaches [`Info::None`] to every pie.
    pub infos: Option<&'a [Info]>,
}

impl Registry<PieMarker> {
    /// Replaces the registry contents with one pie marker per position.
    ///
    /// On a column length mismatch the registry is left reset.
    pub fn create(&mut self, columns: &PieMarkerColumns<'_>) -> Result<(), SceneError> {
        self.reset();
        let n = columns.positions.len();
        let kind = EntityKind::PieMarker;
        check_len(kind, "radii", n, columns.radii.len())?;
        check_len(kind, "colors", n, columns.colors.len())?;
        check_len(kind, "names", n, columns.names.len())?;
        check_len(kind, "slices", n, columns.slices.len())?;
        check_opt_len(kind, "infos", n, columns.infos)?;

        let items = (0..n)
            .map(|i| PieMarker {
                position: columns.positions[i],
                placement: Placement::default(),
                radius: columns.radii[i],
                color: columns.colors[i],
                name: columns.names[i].to_string(),
                info: columns.infos.map(|c| c[i].clone()).unwrap_or_default(),
                slices: SmallVec::from_slice(&columns.slices[i]),
                handles: SmallVec::new(),
            })
            .collect();
        self.fill(items);
        Ok(())
    }
}
