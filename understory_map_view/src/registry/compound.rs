// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, TranslateScale};
use peniko::Color;
use smallvec::SmallVec;

use super::{Entity, EntityKind, Placement, Registry, check_len, clear_handle};
use crate::bounds::Extremes;
use crate::error::SceneError;
use crate::projection::Projection;
use crate::surface::{PrimitiveId, Surface};

/// An open polyline through two or more domain positions.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundLine {
    points: Vec<Point>,
    placements: Vec<Placement>,
    width: f64,
    color: Color,
    handle: Option<PrimitiveId>,
}

impl CompoundLine {
    /// Domain positions, in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Cached pixel positions, one per point.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Stroke width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Stroke color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Handle of the drawn stroke, once rendered.
    #[must_use]
    pub fn handle(&self) -> Option<PrimitiveId> {
        self.handle
    }
}

impl Entity for CompoundLine {
    const KIND: EntityKind = EntityKind::CompoundLine;

    fn extremes(&self) -> Extremes {
        // `create` guarantees at least two points.
        let first = Extremes::from_point(self.points[0]);
        self.points[1..].iter().copied().fold(first, Extremes::include)
    }

    fn project(&mut self, projection: &Projection) {
        for (placement, p) in self.placements.iter_mut().zip(&self.points) {
            placement.project(*p, projection);
        }
    }

    fn apply_view(&mut self, view: TranslateScale) {
        for placement in &mut self.placements {
            placement.apply_view(view);
        }
    }

    fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        clear_handle(surface, &mut self.handle);
        let points: SmallVec<[Point; 16]> =
            self.placements.iter().map(Placement::current).collect();
        self.handle = Some(surface.stroke_polyline(&points, self.width, self.color));
    }

    fn take_handles(&mut self, out: &mut Vec<PrimitiveId>) {
        out.extend(self.handle.take());
    }
}

/// Column-wise input for creating a `Registry<CompoundLine>`.
#[derive(Clone, Copy, Debug)]
pub struct CompoundLineColumns<'a> {
    /// Domain points per polyline; the primary column.
    pub paths: &'a [Vec<Point>],
    /// Stroke widths in pixels.
    pub widths: &'a [f64],
    /// Stroke colors.
    pub colors: &'a [Color],
}

impl Registry<CompoundLine> {
    /// Replaces the registry contents with one polyline per path.
    ///
    /// Every path needs at least two points. On any error the registry is
    /// left reset.
    pub fn create(&mut self, columns: &CompoundLineColumns<'_>) -> Result<(), SceneError> {
        self.reset();
        let n = columns.paths.len();
        let kind = EntityKind::CompoundLine;
        check_len(kind, "widths", n, columns.widths.len())?;
        check_len(kind, "colors", n, columns.colors.len())?;
        if let Some((line, path)) = columns.paths.iter().enumerate().find(|(_, p)| p.len() < 2) {
            return Err(SceneError::TooFewPoints {
                line,
                found: path.len(),
            });
        }

        let items = columns
            .paths
            .iter()
            .zip(columns.widths)
            .zip(columns.colors)
            .map(|((path, &width), &color)| CompoundLine {
                points: path.clone(),
                placements: alloc::vec![Placement::default(); path.len()],
                width,
                color,
                handle: None,
            })
            .collect();
        self.fill(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::recording::RecordingSurface;

    #[test]
    fn extremes_span_every_vertex() {
        let mut reg = Registry::<CompoundLine>::new();
        reg.create(&CompoundLineColumns {
            paths: &[vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, -3.0),
                Point::new(-1.0, 6.0),
            ]],
            widths: &[2.0],
            colors: &[css::NAVY],
        })
        .unwrap();
        let e = reg.compute_extremes().unwrap();
        assert_eq!((e.west, e.east, e.south, e.north), (-1.0, 4.0, -3.0, 6.0));
    }

    #[test]
    fn short_path_is_rejected() {
        let mut reg = Registry::<CompoundLine>::new();
        let err = reg
            .create(&CompoundLineColumns {
                paths: &[vec![Point::ORIGIN, Point::ORIGIN], vec![Point::ORIGIN]],
                widths: &[1.0, 1.0],
                colors: &[css::NAVY, css::NAVY],
            })
            .unwrap_err();
        assert_eq!(err, SceneError::TooFewPoints { line: 1, found: 1 });
        assert!(reg.is_empty());
    }

    #[test]
    fn renders_one_polyline_through_current_positions() {
        let mut reg = Registry::<CompoundLine>::new();
        reg.create(&CompoundLineColumns {
            paths: &[vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
            ]],
            widths: &[1.0],
            colors: &[css::NAVY],
        })
        .unwrap();
        reg.compute_unzoomed_pixels(&Projection::new(Point::ORIGIN, 10.0));
        let mut surface = RecordingSurface::new();
        reg.render(&mut surface);
        reg.render(&mut surface);
        assert_eq!(surface.live_count(), 1);
        let id = reg.get(0).unwrap().handle().unwrap();
        assert_eq!(
            surface.polyline_points(id),
            Some(&[
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, -10.0)
            ][..])
        );
    }
}
