// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};

use kurbo::Size;
use peniko::Color;
use peniko::color::palette;

use crate::surface::{
    DEFAULT_DRAG_MOTION_GESTURE, DEFAULT_DRAG_START_GESTURE, DEFAULT_ZOOM_GESTURE, GestureAction,
};

/// Settings fixed when a [`crate::Scene`] is constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Surface size in pixels. Defaults to 800 × 600.
    pub size: Size,
    /// Surface background. Defaults to white.
    pub background: Color,
    /// Gesture that zooms. Defaults to [`DEFAULT_ZOOM_GESTURE`].
    pub zoom_gesture: String,
    /// Gesture that starts a drag. Defaults to [`DEFAULT_DRAG_START_GESTURE`].
    pub drag_start_gesture: String,
    /// Gesture that continues a drag. Defaults to [`DEFAULT_DRAG_MOTION_GESTURE`].
    pub drag_motion_gesture: String,
    /// Log and retain recoverable warnings. Defaults to `true`.
    pub warnings_enabled: bool,
    /// Multiplier from pointer movement to pan distance. Defaults to `1.0`.
    pub scroll_gain: f64,
    /// Multiplier from wheel delta to zoom step. Defaults to `0.001`, so one
    /// 120-unit wheel notch zooms by 12%.
    pub zoom_gain: f64,
    /// Smallest zoom factor. Defaults to `1e-3`.
    pub min_zoom: f64,
    /// Largest zoom factor. Defaults to `1e3`.
    pub max_zoom: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            background: palette::css::WHITE,
            zoom_gesture: DEFAULT_ZOOM_GESTURE.to_string(),
            drag_start_gesture: DEFAULT_DRAG_START_GESTURE.to_string(),
            drag_motion_gesture: DEFAULT_DRAG_MOTION_GESTURE.to_string(),
            warnings_enabled: true,
            scroll_gain: 1.0,
            zoom_gain: 0.001,
            min_zoom: 1e-3,
            max_zoom: 1e3,
        }
    }
}

impl SceneConfig {
    /// Default settings for a surface of `size` pixels.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Sets the background.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the gesture bound to `action`.
    #[must_use]
    pub fn with_gesture(mut self, action: GestureAction, gesture: &str) -> Self {
        *self.gesture_mut(action) = gesture.to_string();
        self
    }

    /// Enables or disables warnings.
    #[must_use]
    pub fn with_warnings(mut self, enabled: bool) -> Self {
        self.warnings_enabled = enabled;
        self
    }

    /// Sets the pan and zoom gains.
    #[must_use]
    pub fn with_gains(mut self, scroll_gain: f64, zoom_gain: f64) -> Self {
        self.scroll_gain = scroll_gain;
        self.zoom_gain = zoom_gain;
        self
    }

    /// Sets the zoom range.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// The configured gesture name for `action`.
    #[must_use]
    pub fn gesture(&self, action: GestureAction) -> &str {
        match action {
            GestureAction::Zoom => &self.zoom_gesture,
            GestureAction::DragStart => &self.drag_start_gesture,
            GestureAction::DragMotion => &self.drag_motion_gesture,
        }
    }

    fn gesture_mut(&mut self, action: GestureAction) -> &mut String {
        match action {
            GestureAction::Zoom => &mut self.zoom_gesture,
            GestureAction::DragStart => &mut self.drag_start_gesture,
            GestureAction::DragMotion => &mut self.drag_motion_gesture,
        }
    }
}
