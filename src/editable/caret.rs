//! Caret presentation
//!
//! Computes where a custom caret overlay should sit, relative to the
//! surface's own box. Layout measurement goes through [`LayoutProbe`] so
//! the computation runs without a rendering engine.

use super::surface::FocusEnvironment;

/// Fallback line-height multiplier for `normal` or unparsable values
pub const DEFAULT_LINE_HEIGHT_FACTOR: f32 = 1.6;

/// Font size assumed when the computed value cannot be parsed
const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// A rectangle in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// A collapsed selection on an empty line reports no height
    pub fn is_degenerate(&self) -> bool {
        self.height <= 0.0
    }
}

/// On-screen caret position, relative to the surface box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaretGeometry {
    pub top: f32,
    pub left: f32,
    pub height: f32,
    pub visible: bool,
}

/// Events that move or hide the caret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretEvent {
    Focus,
    SelectionChange,
    KeyUp,
    PointerDown,
    Blur,
}

/// Layout queries for the surface and the current selection
pub trait LayoutProbe {
    /// Bounding rect of the current collapsed selection, in viewport space
    fn selection_rect(&self) -> Option<Rect>;

    /// Insert a zero-width marker at the caret, measure it, remove it
    fn measure_marker(&mut self) -> Option<Rect>;

    /// Bounding rect of the surface, in viewport space
    fn surface_rect(&self) -> Rect;

    /// Internal scroll offset of the surface as `(top, left)`
    fn scroll_offset(&self) -> (f32, f32);

    /// Computed `line-height` value
    fn line_height(&self) -> String;

    /// Computed `font-size` value
    fn font_size(&self) -> String;
}

/// Resolve a computed line height to pixels.
///
/// `24px` is taken as is, a unitless number or a percentage scales the
/// font size, and `normal` or anything unparsable uses `fallback` times
/// the font size.
pub fn resolve_line_height(line_height: &str, font_size: &str, fallback: f32) -> f32 {
    let font_size = parse_px(font_size)
        .filter(|size| *size > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE_PX);
    let value = line_height.trim();

    if let Some(px) = parse_px(value) {
        return px;
    }
    if let Some(percent) = value.strip_suffix('%') {
        if let Ok(percent) = percent.trim().parse::<f32>() {
            return font_size * percent / 100.0;
        }
    }
    match value.parse::<f32>() {
        Ok(factor) if factor.is_finite() && factor > 0.0 => font_size * factor,
        _ => font_size * fallback,
    }
}

fn parse_px(value: &str) -> Option<f32> {
    value
        .trim()
        .strip_suffix("px")?
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|px| px.is_finite())
}

/// Tracks the overlay caret across events
#[derive(Debug, Clone, Copy)]
pub struct CaretOverlay {
    geometry: CaretGeometry,
    fallback: f32,
}

impl Default for CaretOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_HEIGHT_FACTOR)
    }
}

impl CaretOverlay {
    pub fn new(line_height_fallback: f32) -> Self {
        Self {
            geometry: CaretGeometry::default(),
            fallback: line_height_fallback,
        }
    }

    pub fn geometry(&self) -> CaretGeometry {
        self.geometry
    }

    /// Update the caret for `event`. Hiding keeps the last position.
    pub fn handle<E, P>(&mut self, event: CaretEvent, env: &E, probe: &mut P) -> CaretGeometry
    where
        E: FocusEnvironment + ?Sized,
        P: LayoutProbe + ?Sized,
    {
        if event == CaretEvent::Blur || !env.is_focused() {
            self.geometry.visible = false;
            return self.geometry;
        }

        let collapsed = env.selection().is_some_and(|range| range.is_collapsed());
        if !collapsed {
            self.geometry.visible = false;
            return self.geometry;
        }

        let rect = probe
            .selection_rect()
            .filter(|rect| !rect.is_degenerate())
            .or_else(|| probe.measure_marker());
        let Some(rect) = rect else {
            self.geometry.visible = false;
            return self.geometry;
        };

        let surface = probe.surface_rect();
        let (scroll_top, scroll_left) = probe.scroll_offset();
        self.geometry = CaretGeometry {
            top: rect.top - surface.top + scroll_top,
            left: rect.left - surface.left + scroll_left,
            height: resolve_line_height(&probe.line_height(), &probe.font_size(), self.fallback),
            visible: true,
        };
        self.geometry
    }
}
