// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Map View: a pan/zoom viewport over a map-like scene.
//!
//! This crate turns domain coordinates (for example longitude/latitude) into
//! pixels on a host drawing surface and keeps them there while the user pans
//! and zooms. It provides:
//! - A [`Projection`] from domain to pixel space, and a [`ScalePolicy`] that
//!   picks its origin and scale (automatic fit, manual, or semi-automatic).
//! - Four scene registries: [`Marker`]s, pie-chart [`PieMarker`]s, two-point
//!   [`Line`]s and multi-point [`CompoundLine`]s.
//! - Scene-wide [`Bounds`] aggregation across all registries.
//! - A [`ViewTransform`] that applies zoom-toward-pointer and drag panning to
//!   cached pixel positions without projecting again.
//! - A render pipeline that draws through the [`Surface`] trait and replaces
//!   what it drew before instead of piling up primitives.
//!
//! It does **not** open windows, read input devices, or load data files.
//! Hosts are expected to:
//! - Implement [`Surface`] on top of their canvas or renderer.
//! - Route the gestures bound by [`Scene::new`] into [`Scene::handle`].
//! - Parse their own tables into the column structs used by the `create_*`
//!   methods.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use peniko::color::palette::css;
//! use understory_map_view::{
//!     MarkerColumns, PointerEvent, RecordingSurface, Scene, SceneConfig,
//! };
//!
//! let mut surface = RecordingSurface::new();
//! let mut scene = Scene::new(SceneConfig::new(Size::new(400.0, 400.0)), &mut surface);
//!
//! scene
//!     .create_markers(&MarkerColumns {
//!         positions: &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)],
//!         radii: &[5.0; 3],
//!         colors: &[css::RED; 3],
//!         names: &["a", "b", "c"],
//!         infos: None,
//!     })
//!     .unwrap();
//!
//! // The first render fits the scene to the surface.
//! scene.render(&mut surface);
//! assert_eq!(surface.live_count(), 3);
//!
//! // A wheel notch zooms toward the pointer and redraws in place.
//! scene.zoom(PointerEvent::wheel(Point::new(200.0, 200.0), 120.0), &mut surface);
//! assert_eq!(surface.live_count(), 3);
//! ```
//!
//! ## Coordinates
//!
//! Domain `x` grows eastward and domain `y` northward. Pixel `y` grows
//! downward, so the projection flips the `y` axis. On-screen positions are
//! `original * zoom + offset`, always recomputed from the cached original.
//!
//! ## Warnings
//!
//! Bad configuration that has an obvious default (an unknown scale mode, a
//! gesture the surface cannot bind, an unknown info kind) is not an error.
//! The default is used and a [`Warning`] is reported alongside it. A
//! [`Scene`] logs these through the `log` facade when warnings are enabled
//! and keeps them for [`Scene::warnings`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod error;
mod info;
mod projection;
mod recording;
mod registry;
mod scale;
mod scene;
mod surface;
mod viewport;
mod warning;

pub use bounds::{Bounds, DEFAULT_HALF_EXTENT, Extremes};
pub use config::SceneConfig;
pub use error::SceneError;
pub use info::Info;
pub use projection::Projection;
pub use recording::{Primitive, RecordingSurface, SurfaceEvent};
pub use registry::{
    CompoundLine, CompoundLineColumns, Endpoints, Entity, EntityKind, Line, LineColumns,
    LineEnd, Marker, MarkerColumns, NodeKind, NodeRef, Nodes, PieMarker, PieMarkerColumns,
    Placement, Registry, Slice,
};
pub use scale::{DEFAULT_BORDER, MIN_SPAN, ScaleParams, ScalePolicy, fit_scale};
pub use scene::Scene;
pub use surface::{
    DEFAULT_DRAG_MOTION_GESTURE, DEFAULT_DRAG_START_GESTURE, DEFAULT_ZOOM_GESTURE, GestureAction,
    PointerEvent, PrimitiveId, Surface, UnsupportedGesture,
};
pub use viewport::{DragState, ViewTransform};
pub use warning::{Axis, Fallback, Warning, Warnings};
