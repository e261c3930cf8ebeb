//! Concrete widgets shipped with the toolkit.

mod label;
mod popup;
mod stacked_widget;
mod tab_header;
mod tab_widget;
mod window;

pub use label::Label;
pub use popup::{Popup, PopupSide};
pub use stacked_widget::StackedWidget;
pub use tab_header::TabHeader;
pub use tab_widget::{TabWidget, TabWidgetParts};
pub use window::Window;

/// Fallback font size for widgets without an explicit override.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
