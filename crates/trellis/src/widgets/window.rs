//! Top-level draggable window.

use std::any::Any;

use trellis_core::Vec2i;

use crate::widget::events::{MouseButton, WidgetEvent};
use crate::widget::{EventCx, Widget, WidgetBase};

/// A top-level child of the screen root. A titled window reserves a header
/// band at the top; pressing in the band and moving the pointer drags the
/// window, clamped so it cannot leave the screen. A modal window blocks
/// pointer input to everything outside it while it is front-most in the
/// focus path.
pub struct Window {
    base: WidgetBase,
    title: String,
    modal: bool,
    header_height: i32,
    drag: bool,
}

impl Window {
    pub const DEFAULT_HEADER_HEIGHT: i32 = 30;

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            title: title.into(),
            modal: false,
            header_height: Self::DEFAULT_HEADER_HEIGHT,
            drag: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn modal(&self) -> bool {
        self.modal
    }

    pub fn set_modal(&mut self, modal: bool) {
        self.modal = modal;
    }

    /// Height of the title band. Untitled windows have no band.
    pub fn header_height(&self) -> i32 {
        self.header_height
    }

    pub fn set_header_height(&mut self, height: i32) {
        self.header_height = height;
    }

    /// Whether a point in window-local coordinates falls in the drag band.
    pub fn header_contains(&self, local: Vec2i) -> bool {
        !self.title.is_empty()
            && local.x >= 0
            && local.x < self.base.size().x
            && local.y >= 0
            && local.y < self.header_height
    }
}

impl Widget for Window {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "window"
    }

    fn event(&mut self, cx: &mut EventCx<'_>, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(e) if e.button == MouseButton::Left => {
                self.drag = self.header_contains(e.local);
                self.drag
            }
            WidgetEvent::MouseRelease(e) if e.button == MouseButton::Left => {
                let was_dragging = self.drag;
                self.drag = false;
                was_dragging
            }
            WidgetEvent::MouseDrag(e) => {
                if !self.drag || e.buttons & MouseButton::Left.bit() == 0 {
                    return false;
                }
                let moved = self.base.pos() + e.delta;
                let limit = (cx.parent_size - self.base.size()).max(Vec2i::ZERO);
                self.base.set_pos(moved.clamp(Vec2i::ZERO, limit));
                true
            }
            _ => false,
        }
    }

    fn as_window(&self) -> Option<&Window> {
        Some(self)
    }

    fn as_window_mut(&mut self) -> Option<&mut Window> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
