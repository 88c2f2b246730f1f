// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan/zoom state mapping world coordinates to screen coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// World-to-screen transform of a map view.
///
/// A world point `w` lands on screen at `(w + pan) * scale`. The pan offset is in
/// world units, so dragging the view by a screen delta `d` adds `d / scale` to it.
/// Forward and inverse transforms are cached and refreshed on every change.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pan: Vec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    transform: Affine,
    inverse: Affine,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Default lower zoom limit.
    pub const MIN_SCALE: f64 = 0.1;
    /// Default upper zoom limit.
    pub const MAX_SCALE: f64 = 20.0;

    /// A view with no pan and unit scale.
    pub fn new() -> Self {
        Self::with_scale_limits(Self::MIN_SCALE, Self::MAX_SCALE)
    }

    /// A view with no pan, unit scale (clamped), and custom zoom limits.
    ///
    /// The limits are swapped if given in the wrong order.
    pub fn with_scale_limits(min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        let mut view = Self {
            pan: Vec2::ZERO,
            scale: 1.0_f64.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            transform: Affine::IDENTITY,
            inverse: Affine::IDENTITY,
        };
        view.update();
        view
    }

    /// Current pan offset in world units.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Current zoom factor (screen units per world unit).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Screen-to-world transform.
    pub fn inverse_transform(&self) -> Affine {
        self.inverse
    }

    /// Map a world point to the screen.
    pub fn to_screen(&self, world: Point) -> Point {
        self.transform * world
    }

    /// Map a screen point to the world.
    pub fn to_world(&self, screen: Point) -> Point {
        self.inverse * screen
    }

    /// Replace the pan offset.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.pan = pan;
        self.update();
    }

    /// Drag the view by a delta measured in screen units.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.set_pan(self.pan + screen_delta / self.scale);
    }

    /// Zoom to `new_scale` (clamped to the limits) keeping the world point under
    /// `screen` fixed. Returns whether the scale changed.
    pub fn zoom_at(&mut self, screen: Point, new_scale: f64) -> bool {
        let clamped = new_scale.clamp(self.min_scale, self.max_scale);
        if clamped == self.scale {
            return false;
        }
        let before = self.to_world(screen);
        self.scale = clamped;
        self.update();
        let after = self.to_world(screen);
        self.pan += after - before;
        self.update();
        true
    }

    /// Zoom in response to a scroll wheel step of `delta_y` at `screen`.
    ///
    /// The step is proportional to the current scale; `fine` makes it ten times
    /// larger, for pinch gestures that report small deltas.
    pub fn wheel_zoom_at(&mut self, screen: Point, delta_y: f64, fine: bool) -> bool {
        let divisor = if fine { 100.0 } else { 1000.0 };
        let step = -delta_y * self.scale / divisor;
        self.zoom_at(screen, self.scale + step)
    }

    /// The world rectangle visible on a screen of the given size.
    ///
    /// This is the query rectangle for everything the view can show.
    pub fn visible_world_rect(&self, screen: Size) -> Rect {
        self.inverse.transform_rect_bbox(screen.to_rect())
    }

    fn update(&mut self) {
        self.transform = Affine::scale(self.scale) * Affine::translate(self.pan);
        self.inverse = self.transform.inverse();
    }
}
