//! Anchored popup window.

use std::any::Any;

use trellis_core::{Vec2i, WidgetId};

use crate::widget::traits::ContainerPolicy;
use crate::widget::{Widget, WidgetBase};
use crate::widgets::Window;

/// Which side of its anchor point the popup opens toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupSide {
    Left,
    #[default]
    Right,
}

/// A borderless window anchored to a point inside an owning window.
///
/// Popups are children of the screen root so they can extend past their
/// owner, but they follow it: every layout pass re-derives the popup
/// position from the owner's position and the anchor, they are only
/// hit-testable while the owner is effectively visible, and the z-order
/// pass keeps them stacked above it. Unlike a regular window a popup is
/// not draggable. A sole layout-less child is stretched to fill the popup.
pub struct Popup {
    window: Window,
    parent_window: WidgetId,
    anchor_pos: Vec2i,
    anchor_height: i32,
    side: PopupSide,
}

impl Popup {
    pub const DEFAULT_ANCHOR_HEIGHT: i32 = 30;

    pub fn new(parent_window: WidgetId) -> Self {
        Self {
            window: Window::new(""),
            parent_window,
            anchor_pos: Vec2i::ZERO,
            anchor_height: Self::DEFAULT_ANCHOR_HEIGHT,
            side: PopupSide::default(),
        }
    }

    /// The window this popup is anchored to.
    pub fn parent_window(&self) -> WidgetId {
        self.parent_window
    }

    /// Anchor point in the owning window's coordinate space.
    pub fn anchor_pos(&self) -> Vec2i {
        self.anchor_pos
    }

    pub fn set_anchor_pos(&mut self, pos: Vec2i) {
        self.anchor_pos = pos;
    }

    /// Vertical distance the popup rises above the anchor point.
    pub fn anchor_height(&self) -> i32 {
        self.anchor_height
    }

    pub fn set_anchor_height(&mut self, height: i32) {
        self.anchor_height = height;
    }

    pub fn side(&self) -> PopupSide {
        self.side
    }

    pub fn set_side(&mut self, side: PopupSide) {
        self.side = side;
    }

    /// Root-relative position derived from the owner's current position.
    pub(crate) fn placement(&self, owner_pos: Vec2i) -> Vec2i {
        let base = owner_pos + self.anchor_pos - Vec2i::new(0, self.anchor_height);
        match self.side {
            PopupSide::Right => base,
            PopupSide::Left => base - Vec2i::new(self.window.base().size().x, 0),
        }
    }
}

impl Widget for Popup {
    fn base(&self) -> &WidgetBase {
        self.window.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.window.base_mut()
    }

    fn kind_name(&self) -> &'static str {
        "popup"
    }

    fn container_policy(&self) -> ContainerPolicy {
        ContainerPolicy::FillSingleChild
    }

    fn as_window(&self) -> Option<&Window> {
        Some(&self.window)
    }

    fn as_window_mut(&mut self) -> Option<&mut Window> {
        Some(&mut self.window)
    }

    fn as_popup(&self) -> Option<&Popup> {
        Some(self)
    }

    fn as_popup_mut(&mut self) -> Option<&mut Popup> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_follows_owner_and_anchor() {
        let mut popup = Popup::new(Default::default());
        popup.set_anchor_pos(Vec2i::new(100, 40));
        popup.set_anchor_height(10);
        assert_eq!(
            popup.placement(Vec2i::new(20, 30)),
            Vec2i::new(120, 60)
        );
    }

    #[test]
    fn test_left_side_opens_leftward() {
        let mut popup = Popup::new(Default::default());
        popup.base_mut().set_size(Vec2i::new(50, 80));
        popup.set_anchor_pos(Vec2i::new(0, 40));
        popup.set_anchor_height(0);
        popup.set_side(PopupSide::Left);
        assert_eq!(popup.placement(Vec2i::ZERO), Vec2i::new(-50, 40));
    }
}
