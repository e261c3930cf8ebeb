//! Uniform grid layout with a fixed cell count along one axis.

use trellis_core::{Vec2i, WidgetId};

use crate::layout::{apply_fixed, fixed_or_preferred, header_offset, Alignment, Orientation};
use crate::widget::traits::RenderContext;
use crate::widget::tree::WidgetTree;

/// Lays visible children into a grid. `resolution` fixes the cell count
/// along the orientation axis; the other axis grows as children are added.
/// With `Horizontal` orientation children fill rows left to right, with
/// `Vertical` they fill columns top to bottom.
#[derive(Debug, Clone)]
pub struct GridLayout {
    orientation: Orientation,
    resolution: usize,
    default_alignment: [Alignment; 2],
    alignments: [Vec<Alignment>; 2],
    margin: i32,
    spacing: Vec2i,
}

impl GridLayout {
    /// # Panics
    ///
    /// Panics if `resolution` is zero.
    pub fn new(orientation: Orientation, resolution: usize) -> Self {
        assert!(resolution > 0, "grid resolution must be at least 1");
        Self {
            orientation,
            resolution,
            default_alignment: [Alignment::Middle; 2],
            alignments: [Vec::new(), Vec::new()],
            margin: 0,
            spacing: Vec2i::ZERO,
        }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_spacing(mut self, spacing: Vec2i) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_default_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.default_alignment = [horizontal, vertical];
        self
    }

    /// Per-column (axis 0) or per-row (axis 1) alignment overrides, applied
    /// positionally; cells beyond the vector fall back to the default.
    pub fn set_column_alignments(&mut self, alignments: Vec<Alignment>) {
        self.alignments[0] = alignments;
    }

    pub fn set_row_alignments(&mut self, alignments: Vec<Alignment>) {
        self.alignments[1] = alignments;
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    fn alignment(&self, axis: usize, cell: usize) -> Alignment {
        self.alignments[axis]
            .get(cell)
            .copied()
            .unwrap_or(self.default_alignment[axis])
    }

    fn visible_children(&self, tree: &WidgetTree, id: WidgetId) -> Vec<WidgetId> {
        tree.children(id)
            .iter()
            .copied()
            .filter(|&c| tree.widget(c).base().visible())
            .collect()
    }

    /// Grid extent as (columns, rows) for `n` visible children.
    fn dims(&self, n: usize) -> (usize, usize) {
        let minor = n.div_ceil(self.resolution);
        match self.orientation {
            Orientation::Horizontal => (self.resolution, minor),
            Orientation::Vertical => (minor, self.resolution),
        }
    }

    /// Cell coordinates (column, row) of the `i`th visible child.
    fn cell_of(&self, i: usize) -> (usize, usize) {
        match self.orientation {
            Orientation::Horizontal => (i % self.resolution, i / self.resolution),
            Orientation::Vertical => (i / self.resolution, i % self.resolution),
        }
    }

    /// Column widths and row heights from the children's target sizes.
    fn extents(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        children: &[WidgetId],
    ) -> (Vec<i32>, Vec<i32>) {
        let (cols, rows) = self.dims(children.len());
        let mut widths = vec![0; cols];
        let mut heights = vec![0; rows];
        for (i, &child) in children.iter().enumerate() {
            let target = fixed_or_preferred(tree, ctx, child);
            let (c, r) = self.cell_of(i);
            widths[c] = widths[c].max(target.x);
            heights[r] = heights[r].max(target.y);
        }
        (widths, heights)
    }

    fn span(&self, cells: &[i32], spacing: i32) -> i32 {
        let sum: i32 = cells.iter().sum();
        let gaps = cells.len().saturating_sub(1) as i32;
        sum + gaps * spacing + 2 * self.margin
    }

    pub(crate) fn preferred_size(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        id: WidgetId,
    ) -> Vec2i {
        let children = self.visible_children(tree, id);
        if children.is_empty() {
            return Vec2i::splat(2 * self.margin) + Vec2i::new(0, header_offset(tree, id));
        }
        let (widths, heights) = self.extents(tree, ctx, &children);
        Vec2i::new(
            self.span(&widths, self.spacing.x),
            self.span(&heights, self.spacing.y) + header_offset(tree, id),
        )
    }

    pub(crate) fn arrange(&self, tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
        let children = self.visible_children(tree, id);
        if children.is_empty() {
            return;
        }
        let header = header_offset(tree, id);
        let container = tree.widget(id).base().size() - Vec2i::new(0, header);
        let (mut widths, mut heights) = self.extents(tree, ctx, &children);

        // Spread surplus container space evenly over the cells of each axis.
        let width_surplus = container.x - self.span(&widths, self.spacing.x);
        let height_surplus = container.y - self.span(&heights, self.spacing.y);
        self.stretch(&mut widths, width_surplus);
        self.stretch(&mut heights, height_surplus);

        let xs = self.offsets(&widths, self.spacing.x, self.margin);
        let ys = self.offsets(&heights, self.spacing.y, self.margin + header);

        for (i, &child) in children.iter().enumerate() {
            let (c, r) = self.cell_of(i);
            let preferred = super::preferred_size(tree, ctx, child);
            let fixed = tree.widget(child).base().fixed_size();
            let target = apply_fixed(preferred, fixed);
            let cell = Vec2i::new(widths[c], heights[r]);
            let origin = Vec2i::new(xs[c], ys[r]);

            let (x, w) = Self::place(self.alignment(0, c), origin.x, cell.x, target.x, fixed.x);
            let (y, h) = Self::place(self.alignment(1, r), origin.y, cell.y, target.y, fixed.y);
            let base = tree.widget_mut(child).base_mut();
            base.set_pos(Vec2i::new(x, y));
            base.set_size(Vec2i::new(w, h));
        }
    }

    fn stretch(&self, cells: &mut [i32], surplus: i32) {
        if surplus <= 0 || cells.is_empty() {
            return;
        }
        let n = cells.len() as i32;
        let each = surplus / n;
        let rest = (surplus - each * n) as usize;
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell += each + i32::from(i < rest);
        }
    }

    fn offsets(&self, cells: &[i32], spacing: i32, start: i32) -> Vec<i32> {
        let mut out = Vec::with_capacity(cells.len());
        let mut acc = start;
        for &c in cells {
            out.push(acc);
            acc += c + spacing;
        }
        out
    }

    /// Position and extent of a child within one axis of its cell.
    fn place(align: Alignment, origin: i32, cell: i32, target: i32, fixed: i32) -> (i32, i32) {
        match align {
            Alignment::Minimum => (origin, target),
            Alignment::Middle => (origin + (cell - target) / 2, target),
            Alignment::Maximum => (origin + cell - target, target),
            Alignment::Fill => (origin, if fixed > 0 { fixed } else { cell }),
        }
    }
}
