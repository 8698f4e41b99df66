// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain bounding boxes and their aggregation across entity kinds.

use kurbo::{Point, Rect};

use crate::warning::Axis;

/// Half-extent, in domain units, of the box reported for an empty scene.
pub const DEFAULT_HALF_EXTENT: f64 = 1.0;

/// Axis-aligned domain bounding box, stored as compass extremes.
///
/// `north >= south` and `east >= west` for every box built from points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes {
    /// Largest `y`.
    pub north: f64,
    /// Smallest `y`.
    pub south: f64,
    /// Largest `x`.
    pub east: f64,
    /// Smallest `x`.
    pub west: f64,
}

impl Extremes {
    /// The `±1` unit box used when nothing is registered.
    pub const DEFAULT: Self = Self {
        north: DEFAULT_HALF_EXTENT,
        south: -DEFAULT_HALF_EXTENT,
        east: DEFAULT_HALF_EXTENT,
        west: -DEFAULT_HALF_EXTENT,
    };

    /// The zero-extent box at `p`.
    #[must_use]
    pub fn from_point(p: Point) -> Self {
        Self {
            north: p.y,
            south: p.y,
            east: p.x,
            west: p.x,
        }
    }

    /// The smallest box containing every point, or `None` for no points.
    ///
    /// The first point seeds the box; later points only widen it.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, Self::include))
    }

    /// Widens the box to contain `p`.
    #[must_use]
    pub fn include(self, p: Point) -> Self {
        Self {
            north: self.north.max(p.y),
            south: self.south.min(p.y),
            east: self.east.max(p.x),
            west: self.west.min(p.x),
        }
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// `east - west`.
    #[must_use]
    pub fn east_west_span(&self) -> f64 {
        self.east - self.west
    }

    /// `north - south`.
    #[must_use]
    pub fn north_south_span(&self) -> f64 {
        self.north - self.south
    }

    /// The north-west corner as a domain point.
    #[must_use]
    pub fn north_west(&self) -> Point {
        Point::new(self.west, self.north)
    }

    /// Axes along which the box has no positive extent.
    pub fn collapsed_axes(&self) -> impl Iterator<Item = Axis> {
        let ew = (self.east_west_span() <= 0.0).then_some(Axis::EastWest);
        let ns = (self.north_south_span() <= 0.0).then_some(Axis::NorthSouth);
        ew.into_iter().chain(ns)
    }

    /// Grows any axis narrower than `min_span` symmetrically about its center.
    #[must_use]
    pub fn with_min_span(self, min_span: f64) -> Self {
        let mut out = self;
        if self.east_west_span() < min_span {
            let mid = (self.east + self.west) * 0.5;
            out.east = mid + min_span * 0.5;
            out.west = mid - min_span * 0.5;
        }
        if self.north_south_span() < min_span {
            let mid = (self.north + self.south) * 0.5;
            out.north = mid + min_span * 0.5;
            out.south = mid - min_span * 0.5;
        }
        out
    }

    /// The box as a `kurbo` rectangle in domain coordinates (`y0` is south).
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.west, self.south, self.east, self.north)
    }
}

/// The scene-wide bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// `false` when no registry contributed; `extremes` is then [`Extremes::DEFAULT`].
    pub defined: bool,
    /// The combined extremes.
    pub extremes: Extremes,
}

impl Bounds {
    /// Combines per-kind extremes into one scene-wide box.
    ///
    /// `None` entries are kinds with nothing registered and are skipped. The
    /// first present entry seeds the running box. With no present entries the
    /// result is undefined and carries [`Extremes::DEFAULT`].
    pub fn aggregate<I>(per_kind: I) -> Self
    where
        I: IntoIterator<Item = Option<Extremes>>,
    {
        let combined = per_kind.into_iter().flatten().reduce(Extremes::union);
        match combined {
            Some(extremes) => Self {
                defined: true,
                extremes,
            },
            None => Self {
                defined: false,
                extremes: Extremes::DEFAULT,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn empty_scene_reports_default_box() {
        let b = Bounds::aggregate([None, None, None, None]);
        assert!(!b.defined);
        assert_eq!(b.extremes, Extremes::DEFAULT);
    }

    #[test]
    fn aggregate_is_elementwise_max_min() {
        let a = Extremes::from_points([Point::new(0.0, 0.0), Point::new(10.0, 2.0)]);
        let b = Extremes::from_points([Point::new(-4.0, 7.0)]);
        let c = Extremes::from_points([Point::new(3.0, -9.0), Point::new(5.0, 1.0)]);
        let all = [a, None, b, c];
        let agg = Bounds::aggregate(all);
        assert!(agg.defined);

        let present: Vec<Extremes> = all.into_iter().flatten().collect();
        let north = present.iter().map(|e| e.north).fold(f64::MIN, f64::max);
        let south = present.iter().map(|e| e.south).fold(f64::MAX, f64::min);
        let east = present.iter().map(|e| e.east).fold(f64::MIN, f64::max);
        let west = present.iter().map(|e| e.west).fold(f64::MAX, f64::min);
        assert_eq!(
            agg.extremes,
            Extremes {
                north,
                south,
                east,
                west
            }
        );
    }

    #[test]
    fn single_kind_seeds_without_placeholder() {
        // All coordinates far from the default box; a placeholder seed would leak in.
        let e = Extremes::from_points([Point::new(50.0, 60.0), Point::new(51.0, 61.0)]);
        let agg = Bounds::aggregate([None, e]);
        assert_eq!(agg.extremes.west, 50.0);
        assert_eq!(agg.extremes.south, 60.0);
    }

    #[test]
    fn min_span_widens_only_collapsed_axes() {
        let e = Extremes::from_points([Point::new(2.0, 0.0), Point::new(2.0, 4.0)])
            .expect("two points");
        assert_eq!(e.collapsed_axes().collect::<Vec<_>>(), [Axis::EastWest]);
        let w = e.with_min_span(2.0);
        assert_eq!((w.west, w.east), (1.0, 3.0));
        assert_eq!((w.south, w.north), (0.0, 4.0));
    }
}
