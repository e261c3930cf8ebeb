//! Common state shared by every widget.
//!
//! Concrete widgets embed a [`WidgetBase`] and hand it out through
//! [`Widget::base`](crate::widget::Widget::base). Geometry, visibility,
//! focus bookkeeping and the attached layout all live here so the tree and
//! the layout engine can operate on any widget uniformly.

use trellis_core::{Rect, Vec2i};

use crate::layout::LayoutKind;
use crate::widget::traits::CursorKind;

/// Per-widget state: geometry, flags, and the optional attached layout.
#[derive(Default)]
pub struct WidgetBase {
    pos: Vec2i,
    size: Vec2i,
    fixed_size: Vec2i,
    visible: bool,
    enabled: bool,
    focused: bool,
    hovered: bool,
    id: Option<String>,
    tooltip: Option<String>,
    font_size: Option<f32>,
    cursor: Option<CursorKind>,
    layout: Option<LayoutKind>,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self {
            visible: true,
            enabled: true,
            ..Default::default()
        }
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Position relative to the parent widget.
    #[inline]
    pub fn pos(&self) -> Vec2i {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec2i) {
        self.pos = pos;
    }

    #[inline]
    pub fn size(&self) -> Vec2i {
        self.size
    }

    /// Sets the widget size. Negative components are clamped to zero.
    pub fn set_size(&mut self, size: Vec2i) {
        self.size = size.max(Vec2i::ZERO);
    }

    /// Per-axis size override applied after preferred-size computation.
    /// A zero component means "no override on that axis".
    #[inline]
    pub fn fixed_size(&self) -> Vec2i {
        self.fixed_size
    }

    pub fn set_fixed_size(&mut self, fixed: Vec2i) {
        self.fixed_size = fixed.max(Vec2i::ZERO);
    }

    /// The widget rectangle in parent coordinates.
    pub fn rect(&self) -> Rect {
        Rect {
            origin: self.pos,
            size: self.size,
        }
    }

    /// Half-open containment test against a point in local coordinates.
    pub fn contains(&self, local: Vec2i) -> bool {
        local.x >= 0 && local.y >= 0 && local.x < self.size.x && local.y < self.size.y
    }

    // ========================================================================
    // Flags
    // ========================================================================

    /// The widget's own visibility flag, ignoring ancestors.
    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether this widget is on the current focus path.
    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether the pointer is currently over this widget.
    #[inline]
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Optional application-assigned identifier, for lookup and logging.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = Some(tooltip.into());
    }

    /// Font size override. `None` falls back to the widget's own default.
    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = Some(size);
    }

    /// Cursor shown while this widget is hovered. `None` inherits from the
    /// nearest ancestor with an explicit cursor.
    pub fn cursor(&self) -> Option<CursorKind> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorKind) {
        self.cursor = Some(cursor);
    }

    // ========================================================================
    // Layout attachment
    // ========================================================================

    pub fn layout(&self) -> Option<&LayoutKind> {
        self.layout.as_ref()
    }

    pub fn layout_mut(&mut self) -> Option<&mut LayoutKind> {
        self.layout.as_mut()
    }

    pub fn set_layout(&mut self, layout: impl Into<LayoutKind>) {
        self.layout = Some(layout.into());
    }

    pub fn clear_layout(&mut self) {
        self.layout = None;
    }

    /// Removes the layout for the duration of an arrange pass.
    /// The engine restores it with [`restore_layout`](Self::restore_layout).
    pub(crate) fn take_layout(&mut self) -> Option<LayoutKind> {
        self.layout.take()
    }

    pub(crate) fn restore_layout(&mut self, layout: LayoutKind) {
        self.layout = Some(layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let base = WidgetBase::new();
        assert!(base.visible());
        assert!(base.enabled());
        assert!(!base.focused());
        assert_eq!(base.pos(), Vec2i::ZERO);
        assert_eq!(base.fixed_size(), Vec2i::ZERO);
        assert!(base.layout().is_none());
        assert!(base.cursor().is_none());
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        let mut base = WidgetBase::new();
        base.set_size(Vec2i::new(-5, 12));
        assert_eq!(base.size(), Vec2i::new(0, 12));
    }

    #[test]
    fn test_contains_is_half_open() {
        let mut base = WidgetBase::new();
        base.set_size(Vec2i::new(10, 10));
        assert!(base.contains(Vec2i::ZERO));
        assert!(base.contains(Vec2i::new(9, 9)));
        assert!(!base.contains(Vec2i::new(10, 5)));
        assert!(!base.contains(Vec2i::new(-1, 5)));
    }
}
