// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Circle, Point, TranslateScale};
use peniko::Color;

use super::{Entity, EntityKind, Placement, Registry, check_len, check_opt_len, clear_handle};
use crate::bounds::Extremes;
use crate::error::SceneError;
use crate::info::Info;
use crate::projection::Projection;
use crate::surface::{PrimitiveId, Surface};

/// A filled circle at a domain position.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    position: Point,
    placement: Placement,
    radius: f64,
    color: Color,
    name: String,
    info: Info,
    handle: Option<PrimitiveId>,
}

impl Marker {
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

    /// Fill color.
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

    /// Handle of the drawn circle, once rendered.
    #[must_use]
    pub fn handle(&self) -> Option<PrimitiveId> {
        self.handle
    }
}

impl Entity for Marker {
    const KIND: EntityKind = EntityKind::Marker;

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
        clear_handle(surface, &mut self.handle);
        let circle = Circle::new(self.placement.current(), self.radius);
        self.handle = Some(surface.fill_circle(circle, self.color));
    }

    fn take_handles(&mut self, out: &mut Vec<PrimitiveId>) {
        out.extend(self.handle.take());
    }
}

/// Column-wise input for creating a `Registry<Marker>`.
///
/// Every column must have one entry per position.
#[derive(Clone, Copy, Debug)]
pub struct MarkerColumns<'a> {
    /// Domain positions; the primary column.
    pub positions: &'a [Point],
    /// Radii in pixels.
    pub radii: &'a [f64],
    /// Fill colors.
    pub colors: &'a [Color],
    /// Display names.
    pub names: &'a [&'a str],
    /// Attached info; `None` attaches [`Info::None`] to every marker.
    pub infos: Option<&'a [Info]>,
}

impl Registry<Marker> {
    /// Replaces the registry contents with one marker per position.
    ///
    /// On a column length mismatch the registry is left reset.
    pub fn create(&mut self, columns: &MarkerColumns<'_>) -> Result<(), SceneError> {
        self.reset();
        let n = columns.positions.len();
        let kind = EntityKind::Marker;
        check_len(kind, "radii", n, columns.radii.len())?;
        check_len(kind, "colors", n, columns.colors.len())?;
        check_len(kind, "names", n, columns.names.len())?;
        check_opt_len(kind, "infos", n, columns.infos)?;

        let items = (0..n)
            .map(|i| Marker {
                position: columns.positions[i],
                placement: Placement::default(),
                radius: columns.radii[i],
                color: columns.colors[i],
                name: columns.names[i].to_string(),
                info: columns.infos.map(|c| c[i].clone()).unwrap_or_default(),
                handle: None,
            })
            .collect();
        self.fill(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use peniko::color::palette;

    use super::*;
    use crate::recording::RecordingSurface;

    fn three_markers(reg: &mut Registry<Marker>) {
        reg.create(&MarkerColumns {
            positions: &[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ],
            radii: &[5.0; 3],
            colors: &[palette::css::RED; 3],
            names: &["a", "b", "c"],
            infos: None,
        })
        .unwrap();
    }

    #[test]
    fn mismatched_column_leaves_registry_empty() {
        let mut reg = Registry::<Marker>::new();
        three_markers(&mut reg);
        let err = reg
            .create(&MarkerColumns {
                positions: &[Point::ORIGIN; 3],
                radii: &[1.0; 3],
                colors: &[palette::css::RED; 2],
                names: &["a", "b", "c"],
                infos: None,
            })
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::LengthMismatch {
                kind: EntityKind::Marker,
                field: "colors",
                expected: 3,
                found: 2,
            }
        );
        assert!(reg.is_empty());
        assert!(!reg.is_populated());
    }

    #[test]
    fn extremes_cover_every_marker() {
        let mut reg = Registry::<Marker>::new();
        assert_eq!(reg.compute_extremes(), None);
        three_markers(&mut reg);
        let e = reg.compute_extremes().unwrap();
        assert_eq!((e.west, e.east, e.south, e.north), (0.0, 10.0, 0.0, 10.0));
    }

    #[test]
    fn view_is_applied_from_original_positions() {
        let mut reg = Registry::<Marker>::new();
        three_markers(&mut reg);
        reg.compute_unzoomed_pixels(&Projection::new(Point::new(0.0, 10.0), 2.0));
        let m = reg.get(1).unwrap();
        assert_eq!(m.placement().original(), Point::new(20.0, 20.0));
        assert_eq!(m.placement().current(), m.placement().original());

        let view = TranslateScale::new(Vec2::new(5.0, -5.0), 3.0);
        reg.apply_view(view);
        reg.apply_view(view);
        let m = reg.get(1).unwrap();
        assert_eq!(m.placement().current(), Point::new(65.0, 55.0));
        assert_eq!(m.placement().original(), Point::new(20.0, 20.0));
    }

    #[test]
    fn render_replaces_previous_primitives() {
        let mut reg = Registry::<Marker>::new();
        three_markers(&mut reg);
        reg.compute_unzoomed_pixels(&Projection::IDENTITY);
        let mut surface = RecordingSurface::new();
        reg.render(&mut surface);
        assert_eq!(surface.live_count(), 3);
        reg.render(&mut surface);
        assert_eq!(surface.live_count(), 3);

        // Re-creating retires the old primitives on the next render.
        three_markers(&mut reg);
        reg.compute_unzoomed_pixels(&Projection::IDENTITY);
        reg.render(&mut surface);
        assert_eq!(surface.live_count(), 3);
    }
}
