//! The [`Widget`] trait and the embedder-facing [`RenderContext`] boundary.

use std::any::Any;

use trellis_core::Vec2i;

use crate::widget::base::WidgetBase;
use crate::widget::dispatcher::EventCx;
use crate::widget::events::WidgetEvent;
use crate::widgets::{Popup, StackedWidget, Window};

// ============================================================================
// Embedder boundary
// ============================================================================

/// Services a widget needs from the host during measurement and painting.
///
/// This is the only surface through which the toolkit touches the outside
/// world; the core never draws or measures text itself. Test code implements
/// it with fixed metrics.
pub trait RenderContext {
    /// Pixel extent of `text` rendered at `font_size`.
    fn text_size(&self, text: &str, font_size: f32) -> Vec2i;
}

/// Cursor shape requested while a widget is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    Arrow,
    Hand,
    IBeam,
    Crosshair,
    Move,
    ResizeHorizontal,
    ResizeVertical,
}

// ============================================================================
// Container behavior
// ============================================================================

/// How a widget without an attached layout treats its children during the
/// default layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerPolicy {
    /// Children are sized to their preferred size; positions are untouched.
    #[default]
    Default,
    /// A sole layout-less child is stretched to fill the container.
    FillSingleChild,
    /// Every child is moved to the origin and stretched to the container
    /// size. Used by page stacks.
    FillAllChildren,
}

// ============================================================================
// Widget trait
// ============================================================================

/// A node in the widget tree.
///
/// Implementations embed a [`WidgetBase`] and expose it through
/// [`base`](Widget::base); the tree, dispatcher and layout engine drive
/// every widget through this trait alone. The capability queries
/// (`as_window`, `container_policy`, ...) replace runtime type inspection:
/// a widget opts into special treatment by answering them, and the default
/// answers opt out of everything.
pub trait Widget: Send + Sync + 'static {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Short name used in tree dumps and trace output.
    fn kind_name(&self) -> &'static str {
        "widget"
    }

    /// Content-derived preferred size, before any attached layout or
    /// fixed-size override is considered. `None` means the widget has no
    /// intrinsic extent and falls back to its current size.
    fn intrinsic_size(&self, _ctx: &dyn RenderContext) -> Option<Vec2i> {
        None
    }

    /// Handles an event offered to this widget. Returning `true` consumes
    /// the event and stops propagation toward the parent.
    fn event(&mut self, _cx: &mut EventCx<'_>, _event: &mut WidgetEvent) -> bool {
        false
    }

    /// Called at the start of this widget's arrange visit, before children
    /// are positioned. Widgets that cache measurements refresh them here.
    fn prepare_layout(&mut self, _ctx: &dyn RenderContext, _self_size: Vec2i) {}

    /// Paints this widget. `origin` is the widget's top-left corner in
    /// window coordinates; children are painted by the caller afterwards.
    fn draw(&self, _ctx: &mut dyn RenderContext, _origin: Vec2i) {}

    fn container_policy(&self) -> ContainerPolicy {
        ContainerPolicy::Default
    }

    /// Whether group layouts treat this widget as a section heading that
    /// starts a new indented group.
    fn is_section_heading(&self) -> bool {
        false
    }

    fn as_window(&self) -> Option<&Window> {
        None
    }

    fn as_window_mut(&mut self) -> Option<&mut Window> {
        None
    }

    fn as_popup(&self) -> Option<&Popup> {
        None
    }

    fn as_popup_mut(&mut self) -> Option<&mut Popup> {
        None
    }

    fn as_stacked(&self) -> Option<&StackedWidget> {
        None
    }

    fn as_stacked_mut(&mut self) -> Option<&mut StackedWidget> {
        None
    }

    /// Typed access for application code.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
