//! Core primitives for the Trellis widget toolkit.
//!
//! This crate is the dependency-light substrate the widget crate builds
//! on: geometry, widget identity, error types, and logging facilities.
//! It deliberately knows nothing about widgets themselves.

pub mod error;
pub mod geometry;
pub mod id;
pub mod logging;

pub use error::{Result, TreeError};
pub use geometry::{EPSILON, Rect, Vec2f, Vec2i, Vector2};
pub use id::WidgetId;

use static_assertions::assert_impl_all;

// Ids and geometry flow freely through the embedder's event plumbing.
assert_impl_all!(WidgetId: Copy, Send, Sync);
assert_impl_all!(Vec2i: Copy, Send, Sync);
assert_impl_all!(Rect: Copy, Send, Sync);
