//! Widget fundamentals: the [`Widget`] trait, per-widget state, the
//! ownership tree, events, and dispatch.

pub mod base;
pub mod dispatcher;
pub mod events;
pub mod traits;
pub mod tree;

#[cfg(test)]
pub(crate) mod tests;

pub use base::WidgetBase;
pub use dispatcher::{EventCx, EventDispatcher, EventRequest};
pub use traits::{ContainerPolicy, CursorKind, RenderContext, Widget};
pub use tree::WidgetTree;
