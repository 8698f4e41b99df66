// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point};

/// Maps domain coordinates to unzoomed pixel coordinates.
///
/// The projection subtracts `origin` and multiplies by a uniform `scale`.
/// Domain `y` grows northward while pixel `y` grows downward, so the `y`
/// axis is flipped:
///
/// ```text
/// pixel.x =  (domain.x - origin.x) * scale
/// pixel.y = -(domain.y - origin.y) * scale
/// ```
///
/// Inputs must be finite; the projection does not check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Domain coordinate mapped to the pixel origin (the north-west corner).
    pub origin: Point,
    /// Pixels per domain unit.
    pub scale: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Projection {
    /// Unit scale at the domain origin (only the `y` flip remains).
    pub const IDENTITY: Self = Self {
        origin: Point::ORIGIN,
        scale: 1.0,
    };

    /// Creates a projection.
    #[must_use]
    pub const fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Projects a domain coordinate to an unzoomed pixel coordinate.
    #[inline]
    #[must_use]
    pub fn project(&self, domain: Point) -> Point {
        Point::new(
            (domain.x - self.origin.x) * self.scale,
            -(domain.y - self.origin.y) * self.scale,
        )
    }

    /// Maps an unzoomed pixel coordinate back to its domain coordinate.
    ///
    /// Returns a non-finite point if `scale` is zero.
    #[inline]
    #[must_use]
    pub fn unproject(&self, pixel: Point) -> Point {
        Point::new(
            pixel.x / self.scale + self.origin.x,
            -pixel.y / self.scale + self.origin.y,
        )
    }

    /// The projection as an affine map, for callers that compose transforms.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::new([
            self.scale,
            0.0,
            0.0,
            -self.scale,
            -self.origin.x * self.scale,
            self.origin.y * self.scale,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn north_maps_upward() {
        let p = Projection::new(Point::new(0.0, 10.0), 2.0);
        assert_eq!(p.project(Point::new(0.0, 10.0)), Point::ORIGIN);
        // Southward in the domain is downward on screen.
        assert_eq!(p.project(Point::new(3.0, 5.0)), Point::new(6.0, 10.0));
    }

    #[test]
    fn unproject_inverts_project() {
        let origins = [Point::new(-3.5, 51.0), Point::new(120.0, -33.0)];
        let scales = [0.25, 1.0, 37.5];
        let samples = [
            Point::new(0.0, 0.0),
            Point::new(-1.5, 51.5),
            Point::new(179.9, -89.9),
        ];
        for origin in origins {
            for scale in scales {
                let proj = Projection::new(origin, scale);
                for p in samples {
                    let back = proj.unproject(proj.project(p));
                    assert!(close(back, p), "{p:?} came back as {back:?}");
                }
            }
        }
    }

    #[test]
    fn affine_agrees_with_project() {
        let proj = Projection::new(Point::new(-2.0, 7.0), 12.0);
        let p = Point::new(4.25, -1.5);
        assert!(close(proj.to_affine() * p, proj.project(p)));
    }
}
