//! The layout engine.
//!
//! Layouts are values attached to a widget's [`WidgetBase`]; the engine
//! drives them through two free functions. [`preferred_size`] is a pure
//! bottom-up measurement and [`perform`] is the top-down arrange pass that
//! assigns child geometry and recurses. Widgets without a layout fall back
//! to their [`ContainerPolicy`].
//!
//! [`WidgetBase`]: crate::widget::WidgetBase

use tracing::trace;

use trellis_core::logging::targets;
use trellis_core::{Vec2i, WidgetId};

use crate::widget::traits::{ContainerPolicy, RenderContext};
use crate::widget::tree::WidgetTree;

mod advanced_grid;
mod box_layout;
mod grid_layout;
mod group_layout;

pub use advanced_grid::{AdvancedGridLayout, Anchor};
pub use box_layout::BoxLayout;
pub use grid_layout::GridLayout;
pub use group_layout::GroupLayout;

// ============================================================================
// Common vocabulary
// ============================================================================

/// Cross-axis (or in-cell) placement of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Flush with the leading edge.
    Minimum,
    /// Centered.
    #[default]
    Middle,
    /// Flush with the trailing edge.
    Maximum,
    /// Stretched to the full available extent.
    Fill,
}

/// Main axis of a box layout, or the fill direction of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `v` along this orientation.
    #[inline]
    pub fn main(self, v: Vec2i) -> i32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Component of `v` across this orientation.
    #[inline]
    pub fn cross(self, v: Vec2i) -> i32 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// Builds a vector from main- and cross-axis components.
    #[inline]
    pub fn pack(self, main: i32, cross: i32) -> Vec2i {
        match self {
            Self::Horizontal => Vec2i::new(main, cross),
            Self::Vertical => Vec2i::new(cross, main),
        }
    }
}

// ============================================================================
// Layout variants
// ============================================================================

/// All layout algorithms, as one attachable value.
///
/// A closed enum rather than a trait object: arrange needs mutable tree
/// access alongside the layout, and the engine temporarily detaches the
/// value from its widget for the duration of the pass.
#[derive(Debug, Clone)]
pub enum LayoutKind {
    Box(BoxLayout),
    Group(GroupLayout),
    Grid(GridLayout),
    AdvancedGrid(AdvancedGridLayout),
}

impl LayoutKind {
    /// Preferred size of `id` as computed by this layout over its children.
    pub fn preferred_size(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        id: WidgetId,
    ) -> Vec2i {
        match self {
            Self::Box(l) => l.preferred_size(tree, ctx, id),
            Self::Group(l) => l.preferred_size(tree, ctx, id),
            Self::Grid(l) => l.preferred_size(tree, ctx, id),
            Self::AdvancedGrid(l) => l.preferred_size(tree, ctx, id),
        }
    }

    /// Positions and sizes the direct children of `id` within its current
    /// size. Grandchildren are handled by the engine's recursion.
    pub fn arrange(&self, tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
        match self {
            Self::Box(l) => l.arrange(tree, ctx, id),
            Self::Group(l) => l.arrange(tree, ctx, id),
            Self::Grid(l) => l.arrange(tree, ctx, id),
            Self::AdvancedGrid(l) => l.arrange(tree, ctx, id),
        }
    }
}

impl From<BoxLayout> for LayoutKind {
    fn from(l: BoxLayout) -> Self {
        Self::Box(l)
    }
}

impl From<GroupLayout> for LayoutKind {
    fn from(l: GroupLayout) -> Self {
        Self::Group(l)
    }
}

impl From<GridLayout> for LayoutKind {
    fn from(l: GridLayout) -> Self {
        Self::Grid(l)
    }
}

impl From<AdvancedGridLayout> for LayoutKind {
    fn from(l: AdvancedGridLayout) -> Self {
        Self::AdvancedGrid(l)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Preferred size of `id`: its attached layout's answer, else its intrinsic
/// size, else whatever its container policy derives from the children, else
/// its current size. Fixed-size overrides are applied by the caller.
pub fn preferred_size(tree: &WidgetTree, ctx: &dyn RenderContext, id: WidgetId) -> Vec2i {
    let widget = tree.widget(id);
    if let Some(layout) = widget.base().layout() {
        return layout.preferred_size(tree, ctx, id);
    }
    if let Some(size) = widget.intrinsic_size(ctx) {
        return size;
    }
    match widget.container_policy() {
        ContainerPolicy::Default => widget.base().size(),
        ContainerPolicy::FillSingleChild => {
            let children = tree.children(id);
            if children.len() == 1 {
                fixed_or_preferred(tree, ctx, children[0])
            } else {
                widget.base().size()
            }
        }
        ContainerPolicy::FillAllChildren => {
            let mut size = Vec2i::ZERO;
            for &child in tree.children(id) {
                size = size.max(fixed_or_preferred(tree, ctx, child));
            }
            size
        }
    }
}

/// Runs the arrange pass over the subtree rooted at `id`. The widget's own
/// size must already be set; children receive geometry from the attached
/// layout or the container policy, then the pass recurses into them.
///
/// The pass is idempotent: running it twice in a row with unchanged inputs
/// produces identical geometry.
pub fn perform(tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
    let self_size = tree.widget(id).base().size();
    tree.widget_mut(id).prepare_layout(ctx, self_size);

    if let Some(layout) = tree.widget_mut(id).base_mut().take_layout() {
        trace!(target: targets::LAYOUT, ?id, size = %self_size, "arrange");
        layout.arrange(tree, ctx, id);
        tree.widget_mut(id).base_mut().restore_layout(layout);
    } else {
        match tree.widget(id).container_policy() {
            ContainerPolicy::Default => {
                for child in tree.children(id).to_vec() {
                    let size = fixed_or_preferred(tree, ctx, child);
                    tree.widget_mut(child).base_mut().set_size(size);
                }
            }
            ContainerPolicy::FillSingleChild => {
                let children = tree.children(id).to_vec();
                if children.len() == 1 {
                    let base = tree.widget_mut(children[0]).base_mut();
                    base.set_pos(Vec2i::ZERO);
                    base.set_size(self_size);
                } else {
                    for child in children {
                        let size = fixed_or_preferred(tree, ctx, child);
                        tree.widget_mut(child).base_mut().set_size(size);
                    }
                }
            }
            ContainerPolicy::FillAllChildren => {
                for child in tree.children(id).to_vec() {
                    let base = tree.widget_mut(child).base_mut();
                    base.set_pos(Vec2i::ZERO);
                    base.set_size(self_size);
                }
            }
        }
    }

    for child in tree.children(id).to_vec() {
        perform(tree, ctx, child);
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Applies the per-axis fixed-size override to a preferred size.
#[inline]
pub(crate) fn apply_fixed(preferred: Vec2i, fixed: Vec2i) -> Vec2i {
    Vec2i::new(
        if fixed.x > 0 { fixed.x } else { preferred.x },
        if fixed.y > 0 { fixed.y } else { preferred.y },
    )
}

/// Preferred size of `id` with its fixed-size override applied.
pub(crate) fn fixed_or_preferred(
    tree: &WidgetTree,
    ctx: &dyn RenderContext,
    id: WidgetId,
) -> Vec2i {
    let preferred = preferred_size(tree, ctx, id);
    apply_fixed(preferred, tree.widget(id).base().fixed_size())
}

/// Extra vertical offset reserved above the children of a titled window,
/// so the content starts below the drag band.
pub(crate) fn header_offset(tree: &WidgetTree, id: WidgetId) -> i32 {
    match tree.widget(id).as_window() {
        Some(window) if !window.title().is_empty() => window.header_height(),
        _ => 0,
    }
}
