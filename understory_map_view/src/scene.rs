// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::bounds::Bounds;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::info::Info;
use crate::projection::Projection;
use crate::registry::{
    CompoundLine, CompoundLineColumns, EntityKind, Line, LineColumns, Marker, MarkerColumns,
    Nodes, PieMarker, PieMarkerColumns, Registry,
};
use crate::scale::{DEFAULT_BORDER, ScaleParams, ScalePolicy};
use crate::surface::{GestureAction, PointerEvent, Surface};
use crate::viewport::ViewTransform;
use crate::warning::{Fallback, Warning, Warnings};

bitflags::bitflags! {
    /// Cached positions that must be recomputed before the next paint.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Stale: u8 {
        /// Original pixel positions (the projection or the entities changed).
        const PROJECTION = 1 << 0;
        /// On-screen positions (zoom or offset changed).
        const VIEW = 1 << 1;
    }
}

/// One viewport: the four registries, their projection, and the live view.
///
/// A scene is driven by a single host thread. Registries are filled with the
/// `create_*` methods, the projection is resolved once (explicitly, or
/// automatically on first [`Scene::render`]), and input events then only
/// move the view transform.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    markers: Registry<Marker>,
    pie_markers: Registry<PieMarker>,
    lines: Registry<Line>,
    compound_lines: Registry<CompoundLine>,
    projection: Option<Projection>,
    view: ViewTransform,
    warnings: Warnings,
    stale: Stale,
}

impl Scene {
    /// Creates an empty scene, binding its gestures on `surface`.
    ///
    /// A gesture the surface refuses is replaced by its default with a
    /// warning; construction never fails.
    pub fn new<S: Surface + ?Sized>(config: SceneConfig, surface: &mut S) -> Self {
        let mut warnings = Warnings::new(config.warnings_enabled);
        surface.set_background(config.background);
        for action in GestureAction::ALL {
            bind_with_fallback(surface, config.gesture(action), action).report(&mut warnings);
        }
        let mut view = ViewTransform::new();
        view.set_zoom_limits(config.min_zoom, config.max_zoom);
        Self {
            config,
            markers: Registry::new(),
            pie_markers: Registry::new(),
            lines: Registry::new(),
            compound_lines: Registry::new(),
            projection: None,
            view,
            warnings,
            stale: Stale::empty(),
        }
    }

    /// Construction settings.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Warnings retained so far (empty when warnings are disabled).
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        self.warnings.as_slice()
    }

    /// Removes and returns retained warnings.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        self.warnings.take()
    }

    /// Turns warning logging and retention on or off for later operations.
    pub fn set_warnings_enabled(&mut self, enabled: bool) {
        self.warnings.set_enabled(enabled);
    }

    /// Resolves a host-supplied info kind name for use in a `create_*` call.
    ///
    /// Unknown kinds resolve to [`Info::None`] and raise
    /// [`Warning::UnsupportedInfoKind`] on this scene.
    pub fn info(&mut self, kind: &str) -> Info {
        Info::from_kind(kind).report(&mut self.warnings)
    }

    /// The marker registry.
    #[must_use]
    pub fn markers(&self) -> &Registry<Marker> {
        &self.markers
    }

    /// The pie marker registry.
    #[must_use]
    pub fn pie_markers(&self) -> &Registry<PieMarker> {
        &self.pie_markers
    }

    /// The line registry.
    #[must_use]
    pub fn lines(&self) -> &Registry<Line> {
        &self.lines
    }

    /// The compound line registry.
    #[must_use]
    pub fn compound_lines(&self) -> &Registry<CompoundLine> {
        &self.compound_lines
    }

    /// Returns `true` if `kind` is fully implemented by this engine.
    ///
    /// Every kind currently is; a kind that is not would be skipped by
    /// bounds aggregation and rendering.
    #[must_use]
    pub fn is_supported(&self, kind: EntityKind) -> bool {
        matches!(
            kind,
            EntityKind::Marker
                | EntityKind::PieMarker
                | EntityKind::Line
                | EntityKind::CompoundLine
        )
    }

    /// Replaces all markers.
    pub fn create_markers(&mut self, columns: &MarkerColumns<'_>) -> Result<(), SceneError> {
        let result = self.markers.create(columns);
        self.entities_changed();
        result
    }

    /// Replaces all pie markers.
    pub fn create_pie_markers(
        &mut self,
        columns: &PieMarkerColumns<'_>,
    ) -> Result<(), SceneError> {
        let result = self.pie_markers.create(columns);
        self.entities_changed();
        result
    }

    /// Replaces all lines, resolving node references against the current
    /// markers and pie markers.
    pub fn create_lines(&mut self, columns: &LineColumns<'_>) -> Result<(), SceneError> {
        let nodes = Nodes {
            markers: &self.markers,
            pie_markers: &self.pie_markers,
        };
        let result = self.lines.create(columns, &nodes);
        self.entities_changed();
        result
    }

    /// Replaces all compound lines.
    pub fn create_compound_lines(
        &mut self,
        columns: &CompoundLineColumns<'_>,
    ) -> Result<(), SceneError> {
        let result = self.compound_lines.create(columns);
        self.entities_changed();
        result
    }

    /// Empties the registry for `kind`.
    pub fn reset(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Marker => self.markers.reset(),
            EntityKind::PieMarker => self.pie_markers.reset(),
            EntityKind::Line => self.lines.reset(),
            EntityKind::CompoundLine => self.compound_lines.reset(),
        }
    }

    /// Domain bounding box over every supported, populated registry.
    #[must_use]
    pub fn extremes(&self) -> Bounds {
        Bounds::aggregate(
            EntityKind::ALL
                .into_iter()
                .filter(|kind| self.is_supported(*kind))
                .map(|kind| match kind {
                    EntityKind::Marker => self.markers.compute_extremes(),
                    EntityKind::PieMarker => self.pie_markers.compute_extremes(),
                    EntityKind::Line => self.lines.compute_extremes(),
                    EntityKind::CompoundLine => self.compound_lines.compute_extremes(),
                }),
        )
    }

    /// Resolves and installs the projection under `policy`.
    ///
    /// Original pixel positions are recomputed on the next render; the live
    /// zoom and offset are kept.
    pub fn resolve_scale(&mut self, policy: &ScalePolicy) -> Projection {
        let bounds = self.extremes();
        let projection = policy.resolve(&bounds, self.config.size, &mut self.warnings);
        log::debug!(
            "resolved projection origin={:?} scale={} (bounds defined: {})",
            projection.origin,
            projection.scale,
            bounds.defined
        );
        self.projection = Some(projection);
        self.stale |= Stale::PROJECTION;
        projection
    }

    /// Resolves the projection from a mode name, see [`ScalePolicy::from_name`].
    pub fn resolve_scale_named(
        &mut self,
        mode: &str,
        params: &ScaleParams,
    ) -> Result<Projection, SceneError> {
        let policy = ScalePolicy::from_name(mode, params)?.report(&mut self.warnings);
        Ok(self.resolve_scale(&policy))
    }

    /// Fits every entity, plus `border`, into the surface.
    pub fn fit(&mut self, border: Vec2) -> Projection {
        self.resolve_scale(&ScalePolicy::Automatic { border })
    }

    /// The installed projection, if one has been resolved.
    #[must_use]
    pub fn projection(&self) -> Option<Projection> {
        self.projection
    }

    /// The live zoom and pan state.
    #[must_use]
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Brings cached positions up to date and draws every registry.
    ///
    /// Lines are drawn first and markers last so markers sit on top. Each
    /// registry replaces the primitives it drew before, so calling this
    /// repeatedly does not accumulate primitives. If no projection has been
    /// resolved yet the scene is fitted with the default border first.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let projection = match self.projection {
            Some(p) => p,
            None => self.fit(DEFAULT_BORDER),
        };
        if self.stale.contains(Stale::PROJECTION) {
            self.markers.compute_unzoomed_pixels(&projection);
            self.pie_markers.compute_unzoomed_pixels(&projection);
            self.lines.compute_unzoomed_pixels(&projection);
            self.compound_lines.compute_unzoomed_pixels(&projection);
            self.stale |= Stale::VIEW;
        }
        if self.stale.contains(Stale::VIEW) {
            let view = self.view.transform();
            self.markers.apply_view(view);
            self.pie_markers.apply_view(view);
            self.lines.apply_view(view);
            self.compound_lines.apply_view(view);
        }
        self.stale = Stale::empty();

        for kind in EntityKind::ALL {
            if !self.is_supported(kind) {
                continue;
            }
            match kind {
                EntityKind::Line => self.lines.render(surface),
                EntityKind::CompoundLine => self.compound_lines.render(surface),
                EntityKind::PieMarker => self.pie_markers.render(surface),
                EntityKind::Marker => self.markers.render(surface),
            }
        }
        log::trace!(
            "rendered scene at zoom {} offset {:?}",
            self.view.zoom(),
            self.view.offset()
        );
    }

    /// Removes everything this scene has drawn.
    pub fn clear<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.lines.clear_surface(surface);
        self.compound_lines.clear_surface(surface);
        self.pie_markers.clear_surface(surface);
        self.markers.clear_surface(surface);
    }

    /// Routes a host event to the handler for `action`.
    pub fn handle<S: Surface + ?Sized>(
        &mut self,
        action: GestureAction,
        event: PointerEvent,
        surface: &mut S,
    ) {
        match action {
            GestureAction::Zoom => self.zoom(event, surface),
            GestureAction::DragStart => self.drag_start(event),
            GestureAction::DragMotion => self.drag_motion(event, surface),
        }
    }

    /// Zooms toward the pointer by the event's wheel delta and redraws.
    pub fn zoom<S: Surface + ?Sized>(&mut self, event: PointerEvent, surface: &mut S) {
        let pointer = self.view.window_to_surface(event.position);
        if self.view.zoom_at(pointer, event.wheel_delta, self.config.zoom_gain) {
            self.stale |= Stale::VIEW;
            self.render(surface);
        }
    }

    /// Starts a drag at the pointer.
    pub fn drag_start(&mut self, event: PointerEvent) {
        self.view.drag_start(event.position);
    }

    /// Pans by the pointer movement since the last drag event.
    ///
    /// Uses the surface's native scrolling when it has one; otherwise every
    /// entity is moved and the scene redrawn.
    pub fn drag_motion<S: Surface + ?Sized>(&mut self, event: PointerEvent, surface: &mut S) {
        let Some(anchor) = self.view.drag().last_pos else {
            return;
        };
        let Some(delta) = self.view.drag_motion(event.position, self.config.scroll_gain) else {
            return;
        };
        if delta == Vec2::ZERO {
            return;
        }
        if surface.native_pan(anchor, anchor + delta) {
            self.view.scrolled(delta);
        } else if self.view.pan_by(delta) {
            self.stale |= Stale::VIEW;
            self.render(surface);
        }
    }

    /// Ends the current drag.
    pub fn drag_end(&mut self) {
        self.view.drag_end();
    }

    /// Returns to unit zoom and zero offset and redraws.
    pub fn reset_view<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.view.reset();
        self.stale |= Stale::VIEW;
        self.render(surface);
    }

    /// The domain coordinate under a window-space point, once a projection
    /// is resolved.
    #[must_use]
    pub fn domain_at(&self, window: Point) -> Option<Point> {
        let projection = self.projection?;
        let screen = self.view.window_to_surface(window);
        Some(projection.unproject(self.view.to_original(screen)))
    }

    fn entities_changed(&mut self) {
        if self.projection.is_some() {
            self.stale |= Stale::PROJECTION;
        }
    }
}

/// Binds `requested`, falling back to the action's default gesture.
fn bind_with_fallback<S: Surface + ?Sized>(
    surface: &mut S,
    requested: &str,
    action: GestureAction,
) -> Fallback<bool> {
    if surface.bind_gesture(requested, action).is_ok() {
        return Fallback::accepted(true);
    }
    let fallback = action.default_gesture();
    if requested != fallback && surface.bind_gesture(fallback, action).is_ok() {
        return Fallback::substituted(
            true,
            Warning::UnsupportedGesture {
                action,
                requested: requested.into(),
                fallback,
            },
        );
    }
    Fallback::substituted(false, Warning::UnboundGesture { action })
}
