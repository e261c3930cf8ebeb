//! Trellis is a retained-mode widget toolkit core: a widget ownership
//! tree, a constraint layout engine, and an input-event router, with no
//! rendering backend of its own.
//!
//! The embedding application owns a [`Screen`], builds a tree of
//! [`Widget`]s beneath it, and drives it with three calls:
//!
//! - [`Screen::perform_layout`] after the tree or its content changes,
//! - [`Screen::dispatch`] for every platform input event,
//! - [`Screen::draw_all`] once per frame.
//!
//! Text measurement and painting go through the [`RenderContext`] trait,
//! the only boundary to the host; the core never touches a GPU or a font
//! library.
//!
//! ```
//! use trellis::layout::{Alignment, BoxLayout, Orientation};
//! use trellis::widgets::{Label, Window};
//! use trellis::{Screen, Vec2i, Widget};
//!
//! let mut screen = Screen::new(Vec2i::new(800, 600));
//! let mut window = Window::new("hello");
//! window
//!     .base_mut()
//!     .set_layout(BoxLayout::new(Orientation::Vertical, Alignment::Minimum).with_margin(8));
//! let window = screen.add_window(window);
//! screen
//!     .tree_mut()
//!     .insert(window, Box::new(Label::new("trellis")))
//!     .unwrap();
//! ```

pub mod layout;
pub mod screen;
pub mod widget;
pub mod widgets;

pub use screen::Screen;
pub use widget::events::{
    CharEvent, EnterEvent, EventBase, FocusInEvent, FocusOutEvent, InputEvent, Key, KeyEvent,
    LeaveEvent, Modifiers, MouseButton, MouseDragEvent, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, WheelEvent, WidgetEvent,
};
pub use widget::{
    ContainerPolicy, CursorKind, EventCx, EventDispatcher, EventRequest, RenderContext, Widget,
    WidgetBase, WidgetTree,
};

pub use trellis_core::{Rect, Result, TreeError, Vec2f, Vec2i, Vector2, WidgetId, EPSILON};

/// Logging targets and tree-dump options, re-exported for embedders that
/// filter `tracing` output by subsystem.
pub use trellis_core::logging;

static_assertions::assert_impl_all!(Screen: Send, Sync);
static_assertions::assert_impl_all!(WidgetTree: Send, Sync);
