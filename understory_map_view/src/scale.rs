// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing the projection origin and scale.

use alloc::string::ToString;

use kurbo::{Point, Size, Vec2};

use crate::bounds::{Bounds, DEFAULT_HALF_EXTENT, Extremes};
use crate::error::SceneError;
use crate::projection::Projection;
use crate::warning::{Axis, Fallback, Warning, Warnings};

/// Narrowest span, in domain units, used when fitting along any axis.
///
/// A scene whose entities all share a coordinate on one axis is widened to
/// this span around that coordinate, matching the default empty-scene box.
pub const MIN_SPAN: f64 = 2.0 * DEFAULT_HALF_EXTENT;

/// Border fraction applied when none is given.
pub const DEFAULT_BORDER: Vec2 = Vec2::new(0.1, 0.1);

/// Policy for deriving the [`Projection`] of a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalePolicy {
    /// Fit the scene bounding box, plus a border, into the surface.
    Automatic {
        /// Border as a fraction of the span on each axis, split evenly
        /// between the two sides.
        border: Vec2,
    },
    /// Use a caller-supplied projection; the bounding box is ignored.
    Manual {
        /// The projection to use.
        projection: Projection,
    },
    /// Use a caller-supplied origin, fitting a caller-supplied span.
    SemiAutomatic {
        /// North-west domain corner placed at the pixel origin.
        origin: Point,
        /// Domain span to fit in place of the scene bounding box.
        span: Size,
        /// Border fraction, as for [`ScalePolicy::Automatic`].
        border: Vec2,
    },
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::Automatic {
            border: DEFAULT_BORDER,
        }
    }
}

/// Parameters for [`ScalePolicy::from_name`]; each mode reads the ones it needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleParams {
    /// Border fraction (automatic and semi-automatic).
    pub border: Vec2,
    /// Pixels per domain unit (manual).
    pub scale: Option<f64>,
    /// Projection origin (manual and semi-automatic).
    pub origin: Option<Point>,
    /// Span to fit (semi-automatic).
    pub span: Option<Size>,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            scale: None,
            origin: None,
            span: None,
        }
    }
}

impl ScalePolicy {
    /// Builds a policy from a host-supplied mode name.
    ///
    /// Recognized names are `auto`/`automatic`, `manual`, and
    /// `semi_auto`/`semi-automatic`. Any other name falls back to automatic
    /// with a warning. A recognized mode missing a required parameter is a
    /// configuration error.
    pub fn from_name(name: &str, params: &ScaleParams) -> Result<Fallback<Self>, SceneError> {
        let policy = match name {
            "auto" | "automatic" => Self::Automatic {
                border: params.border,
            },
            "manual" => Self::Manual {
                projection: Projection::new(
                    params.origin.ok_or(SceneError::MissingScaleParameter {
                        mode: "manual",
                        name: "origin",
                    })?,
                    params.scale.ok_or(SceneError::MissingScaleParameter {
                        mode: "manual",
                        name: "scale",
                    })?,
                ),
            },
            "semi_auto" | "semi-automatic" => Self::SemiAutomatic {
                origin: params.origin.ok_or(SceneError::MissingScaleParameter {
                    mode: "semi-automatic",
                    name: "origin",
                })?,
                span: params.span.ok_or(SceneError::MissingScaleParameter {
                    mode: "semi-automatic",
                    name: "span",
                })?,
                border: params.border,
            },
            other => {
                return Ok(Fallback::substituted(
                    Self::Automatic {
                        border: params.border,
                    },
                    Warning::UnknownScaleMode {
                        given: other.to_string(),
                    },
                ));
            }
        };
        Ok(Fallback::accepted(policy))
    }

    /// Resolves the projection for a surface of `size` pixels.
    ///
    /// Collapsed spans are widened to [`MIN_SPAN`] and reported to `warnings`.
    pub fn resolve(&self, bounds: &Bounds, size: Size, warnings: &mut Warnings) -> Projection {
        match *self {
            Self::Automatic { border } => {
                let border = guard_border(border, warnings);
                let extremes = guard_extremes(bounds.extremes, warnings);
                let span = Size::new(extremes.east_west_span(), extremes.north_south_span());
                let origin = Point::new(
                    extremes.west - span.width * border.x * 0.5,
                    extremes.north + span.height * border.y * 0.5,
                );
                Projection::new(origin, fit_scale(size, span, border))
            }
            Self::Manual { projection } => projection,
            Self::SemiAutomatic {
                origin,
                span,
                border,
            } => {
                let border = guard_border(border, warnings);
                let span = guard_span(span, warnings);
                Projection::new(origin, fit_scale(size, span, border))
            }
        }
    }
}

/// The largest uniform scale at which `span`, grown by `border`, fits `size`.
///
/// This is the smaller of the two per-axis fit scales, so neither axis
/// overflows and the aspect ratio is preserved. A span that is not positive
/// is fitted as [`MIN_SPAN`], and a border fraction at or below `-1` (or not
/// finite) is treated as zero, so the result is always finite.
#[must_use]
pub fn fit_scale(size: Size, span: Size, border: Vec2) -> f64 {
    let fit = |extent: f64, span: f64, border: f64| {
        let span = if span > 0.0 && span.is_finite() {
            span
        } else {
            MIN_SPAN
        };
        let border = if border_is_valid(border) { border } else { 0.0 };
        extent / (span * (1.0 + border))
    };
    let sx = fit(size.width, span.width, border.x);
    let sy = fit(size.height, span.height, border.y);
    sx.min(sy)
}

fn border_is_valid(fraction: f64) -> bool {
    fraction.is_finite() && fraction > -1.0
}

fn guard_border(border: Vec2, warnings: &mut Warnings) -> Vec2 {
    let mut out = border;
    if !border_is_valid(border.x) {
        warnings.push(Warning::InvalidBorder {
            axis: Axis::EastWest,
            given: border.x,
        });
        out.x = 0.0;
    }
    if !border_is_valid(border.y) {
        warnings.push(Warning::InvalidBorder {
            axis: Axis::NorthSouth,
            given: border.y,
        });
        out.y = 0.0;
    }
    out
}

fn guard_extremes(extremes: Extremes, warnings: &mut Warnings) -> Extremes {
    let mut collapsed = false;
    for axis in extremes.collapsed_axes() {
        warnings.push(Warning::DegenerateSpan { axis });
        collapsed = true;
    }
    if collapsed {
        extremes.with_min_span(MIN_SPAN)
    } else {
        extremes
    }
}

fn guard_span(span: Size, warnings: &mut Warnings) -> Size {
    let mut out = span;
    if !(span.width > 0.0 && span.width.is_finite()) {
        warnings.push(Warning::DegenerateSpan {
            axis: Axis::EastWest,
        });
        out.width = MIN_SPAN;
    }
    if !(span.height > 0.0 && span.height.is_finite()) {
        warnings.push(Warning::DegenerateSpan {
            axis: Axis::NorthSouth,
        });
        out.height = MIN_SPAN;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(west: f64, south: f64, east: f64, north: f64) -> Bounds {
        Bounds {
            defined: true,
            extremes: Extremes {
                north,
                south,
                east,
                west,
            },
        }
    }

    #[test]
    fn automatic_takes_the_tighter_axis() {
        let size = Size::new(400.0, 200.0);
        let b = bounds(0.0, 0.0, 10.0, 10.0);
        let border = Vec2::new(0.2, 0.1);
        let mut w = Warnings::new(true);
        let proj = ScalePolicy::Automatic { border }.resolve(&b, size, &mut w);

        let sx: f64 = 400.0 / (10.0 * 1.2);
        let sy = 200.0 / (10.0 * 1.1);
        assert_eq!(proj.scale, sx.min(sy));
        assert!(w.as_slice().is_empty());
    }

    #[test]
    fn automatic_keeps_corners_on_the_surface() {
        let size = Size::new(640.0, 480.0);
        let border = Vec2::new(0.1, 0.3);
        let boxes = [
            bounds(-3.0, 50.0, 2.0, 59.0),
            bounds(100.0, -40.0, 160.0, -10.0),
            bounds(0.0, 0.0, 0.001, 1000.0),
        ];
        for b in boxes {
            let proj =
                ScalePolicy::Automatic { border }.resolve(&b, size, &mut Warnings::new(false));
            let e = b.extremes;
            for (x, y) in [
                (e.west, e.north),
                (e.east, e.north),
                (e.west, e.south),
                (e.east, e.south),
            ] {
                let p = proj.project(Point::new(x, y));
                assert!(p.x >= -1e-9 && p.x <= size.width + 1e-9, "{p:?} for {b:?}");
                assert!(p.y >= -1e-9 && p.y <= size.height + 1e-9, "{p:?} for {b:?}");
            }
        }
    }

    #[test]
    fn collapsed_axis_is_widened_and_reported() {
        let b = bounds(5.0, 1.0, 5.0, 3.0);
        let mut w = Warnings::new(true);
        let proj = ScalePolicy::default().resolve(&b, Size::new(100.0, 100.0), &mut w);
        assert!(proj.scale.is_finite());
        assert_eq!(
            w.as_slice(),
            [Warning::DegenerateSpan {
                axis: Axis::EastWest
            }]
        );
    }

    #[test]
    fn border_that_cancels_the_span_is_dropped() {
        let b = bounds(0.0, 0.0, 10.0, 10.0);
        let mut w = Warnings::new(true);
        let proj = ScalePolicy::Automatic {
            border: Vec2::new(-1.0, f64::NAN),
        }
        .resolve(&b, Size::new(100.0, 100.0), &mut w);
        assert_eq!(proj.scale, 10.0);
        assert_eq!(proj.origin, Point::new(0.0, 10.0));
        assert_eq!(
            w.as_slice()[0],
            Warning::InvalidBorder {
                axis: Axis::EastWest,
                given: -1.0
            }
        );
        assert!(matches!(
            w.as_slice()[1],
            Warning::InvalidBorder {
                axis: Axis::NorthSouth,
                given
            } if given.is_nan()
        ));
        assert_eq!(w.as_slice().len(), 2);
    }

    #[test]
    fn fit_scale_is_finite_for_empty_spans() {
        let size = Size::new(100.0, 100.0);
        assert_eq!(fit_scale(size, Size::ZERO, Vec2::ZERO), 50.0);
        assert_eq!(fit_scale(size, Size::new(10.0, 10.0), Vec2::new(-1.0, -2.0)), 10.0);
        assert!(fit_scale(size, Size::new(f64::INFINITY, 4.0), Vec2::new(0.5, 0.5)).is_finite());
    }

    #[test]
    fn manual_ignores_bounds() {
        let projection = Projection::new(Point::new(1.0, 2.0), 3.0);
        let resolved = ScalePolicy::Manual { projection }.resolve(
            &bounds(-100.0, -100.0, 100.0, 100.0),
            Size::new(10.0, 10.0),
            &mut Warnings::new(true),
        );
        assert_eq!(resolved, projection);
    }

    #[test]
    fn semi_automatic_fits_the_given_span() {
        let origin = Point::new(-1.0, 4.0);
        let policy = ScalePolicy::SemiAutomatic {
            origin,
            span: Size::new(20.0, 5.0),
            border: Vec2::ZERO,
        };
        let resolved = policy.resolve(
            &bounds(0.0, 0.0, 1.0, 1.0),
            Size::new(200.0, 200.0),
            &mut Warnings::new(true),
        );
        assert_eq!(resolved.origin, origin);
        assert_eq!(resolved.scale, 10.0);
    }

    #[test]
    fn unknown_mode_falls_back_to_automatic() {
        let f = ScalePolicy::from_name("zoomy", &ScaleParams::default()).unwrap();
        assert!(f.is_substituted());
        assert_eq!(f.value, ScalePolicy::default());
    }

    #[test]
    fn manual_without_scale_is_an_error() {
        let params = ScaleParams {
            origin: Some(Point::ORIGIN),
            ..ScaleParams::default()
        };
        assert_eq!(
            ScalePolicy::from_name("manual", &params),
            Err(SceneError::MissingScaleParameter {
                mode: "manual",
                name: "scale"
            })
        );
    }
}
