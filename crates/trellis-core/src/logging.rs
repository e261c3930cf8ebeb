//! Logging and debugging facilities for Trellis.
//!
//! Trellis instruments its dispatch, focus, layout, and z-order paths with
//! the `tracing` crate. To see logs, install a subscriber in the embedding
//! application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Application code...
//! }
//! ```
//!
//! The [`targets`] constants can be used with `tracing` directives to
//! filter logs by subsystem, e.g. `RUST_LOG=trellis::layout=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Widget tree mutation (insert/remove/reparent).
    pub const TREE: &str = "trellis::tree";
    /// The layout engine (preferred-size and arrange passes).
    pub const LAYOUT: &str = "trellis::layout";
    /// Event routing (hit testing, bubbling, drag capture).
    pub const DISPATCH: &str = "trellis::dispatch";
    /// Focus-path maintenance.
    pub const FOCUS: &str = "trellis::focus";
    /// Window/popup z-order maintenance.
    pub const ZORDER: &str = "trellis::zorder";
}

/// Branch glyph style for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

impl TreeStyle {
    /// Glyphs for (mid-branch, last-branch, vertical rule, blank).
    pub fn glyphs(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|-- ", "`-- ", "|   ", "    "),
            TreeStyle::Unicode => ("├── ", "└── ", "│   ", "    "),
        }
    }
}

/// Configuration for widget tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show widget ids.
    pub show_ids: bool,
    /// Whether to show geometry (position and size).
    pub show_geometry: bool,
    /// Maximum depth to traverse (`None` for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_geometry: true,
            max_depth: None,
        }
    }
}
