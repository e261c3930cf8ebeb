//! Anchor-based grid with explicit tracks, spans, and stretch factors.

use std::collections::HashMap;

use trellis_core::{Vec2i, WidgetId, EPSILON};

use crate::layout::{fixed_or_preferred, header_offset, Alignment};
use crate::widget::traits::RenderContext;
use crate::widget::tree::WidgetTree;

/// Placement of one child within an [`AdvancedGridLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// (column, row) of the top-left occupied cell.
    pub pos: [usize; 2],
    /// (column span, row span), each at least 1.
    pub span: [usize; 2],
    /// (horizontal, vertical) placement within the spanned cells.
    pub align: [Alignment; 2],
}

impl Anchor {
    pub fn new(col: usize, row: usize) -> Self {
        Self {
            pos: [col, row],
            span: [1, 1],
            align: [Alignment::Fill, Alignment::Fill],
        }
    }

    pub fn with_span(mut self, cols: usize, rows: usize) -> Self {
        assert!(cols >= 1 && rows >= 1, "anchor span must be at least 1x1");
        self.span = [cols, rows];
        self
    }

    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.align = [horizontal, vertical];
        self
    }
}

/// Grid layout with explicitly declared columns and rows. Children are
/// placed by [`Anchor`] rather than insertion order, may span multiple
/// tracks, and tracks grow by their stretch factor when content or the
/// container demands more room.
#[derive(Debug, Clone, Default)]
pub struct AdvancedGridLayout {
    cols: Vec<i32>,
    rows: Vec<i32>,
    col_stretch: Vec<f32>,
    row_stretch: Vec<f32>,
    anchors: HashMap<WidgetId, Anchor>,
    margin: i32,
}

impl AdvancedGridLayout {
    /// Creates a grid from initial track sizes. Tracks of size zero size
    /// themselves to their content.
    pub fn new(cols: Vec<i32>, rows: Vec<i32>) -> Self {
        let col_stretch = vec![0.0; cols.len()];
        let row_stretch = vec![0.0; rows.len()];
        Self {
            cols,
            rows,
            col_stretch,
            row_stretch,
            anchors: HashMap::new(),
            margin: 0,
        }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn column_count(&self) -> usize {
        self.cols.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn append_column(&mut self, size: i32) {
        self.cols.push(size);
        self.col_stretch.push(0.0);
    }

    pub fn append_row(&mut self, size: i32) {
        self.rows.push(size);
        self.row_stretch.push(0.0);
    }

    /// # Panics
    ///
    /// Panics if `col` names a column that does not exist.
    pub fn set_column_stretch(&mut self, col: usize, stretch: f32) {
        self.col_stretch[col] = stretch;
    }

    pub fn set_row_stretch(&mut self, row: usize, stretch: f32) {
        self.row_stretch[row] = stretch;
    }

    /// Registers where `widget` lives in the grid. The anchor must fit
    /// within the declared tracks.
    pub fn set_anchor(&mut self, widget: WidgetId, anchor: Anchor) {
        assert!(
            anchor.pos[0] + anchor.span[0] <= self.cols.len()
                && anchor.pos[1] + anchor.span[1] <= self.rows.len(),
            "anchor {:?} exceeds a {}x{} grid",
            anchor.pos,
            self.cols.len(),
            self.rows.len(),
        );
        self.anchors.insert(widget, anchor);
    }

    pub fn has_anchor(&self, widget: WidgetId) -> bool {
        self.anchors.contains_key(&widget)
    }

    /// Anchor of a registered widget.
    ///
    /// # Panics
    ///
    /// Panics if `widget` was never registered with [`set_anchor`];
    /// arranging an unregistered child is a programming error.
    ///
    /// [`set_anchor`]: Self::set_anchor
    pub fn anchor(&self, widget: WidgetId) -> Anchor {
        match self.anchors.get(&widget) {
            Some(anchor) => *anchor,
            None => panic!("widget {widget:?} is not registered with this grid layout"),
        }
    }

    pub fn remove_anchor(&mut self, widget: WidgetId) {
        self.anchors.remove(&widget);
    }

    fn visible_children(&self, tree: &WidgetTree, id: WidgetId) -> Vec<WidgetId> {
        tree.children(id)
            .iter()
            .copied()
            .filter(|&c| tree.widget(c).base().visible())
            .collect()
    }

    /// Resolves track sizes along one axis. Content grows tracks beyond
    /// their declared size; spanning children distribute their deficit over
    /// stretchy spanned tracks, or dump it into the last spanned track when
    /// none stretch. `fill` finally grows stretchy tracks to `fill` pixels.
    fn track_sizes(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        children: &[WidgetId],
        axis: usize,
        fill: Option<i32>,
    ) -> Vec<i32> {
        let (mut tracks, stretch) = if axis == 0 {
            (self.cols.clone(), &self.col_stretch)
        } else {
            (self.rows.clone(), &self.row_stretch)
        };

        // Non-spanning children first so spans see settled track sizes.
        for phase in 0..2 {
            for &child in children {
                let anchor = self.anchor(child);
                let span = anchor.span[axis];
                if (span == 1) != (phase == 0) {
                    continue;
                }
                let start = anchor.pos[axis];
                let target = if axis == 0 {
                    fixed_or_preferred(tree, ctx, child).x
                } else {
                    fixed_or_preferred(tree, ctx, child).y
                };
                let current: i32 = tracks[start..start + span].iter().sum();
                if target <= current {
                    continue;
                }
                let deficit = target - current;
                let total: f32 = stretch[start..start + span].iter().sum();
                if total < EPSILON {
                    tracks[start + span - 1] += deficit;
                } else {
                    for i in start..start + span {
                        tracks[i] += (deficit as f32 * stretch[i] / total).round() as i32;
                    }
                }
            }
        }

        if let Some(fill) = fill {
            let current: i32 = tracks.iter().sum();
            let surplus = fill - current;
            let total: f32 = stretch.iter().sum();
            if surplus > 0 && total >= EPSILON {
                for (track, &s) in tracks.iter_mut().zip(stretch) {
                    *track += (surplus as f32 * s / total).round() as i32;
                }
            }
        }
        tracks
    }

    pub(crate) fn preferred_size(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        id: WidgetId,
    ) -> Vec2i {
        let children = self.visible_children(tree, id);
        let cols = self.track_sizes(tree, ctx, &children, 0, None);
        let rows = self.track_sizes(tree, ctx, &children, 1, None);
        Vec2i::new(
            cols.iter().sum::<i32>() + 2 * self.margin,
            rows.iter().sum::<i32>() + 2 * self.margin + header_offset(tree, id),
        )
    }

    pub(crate) fn arrange(&self, tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
        let children = self.visible_children(tree, id);
        if children.is_empty() {
            return;
        }
        let header = header_offset(tree, id);
        let container = tree.widget(id).base().size();
        let cols = self.track_sizes(tree, ctx, &children, 0, Some(container.x - 2 * self.margin));
        let rows = self.track_sizes(
            tree,
            ctx,
            &children,
            1,
            Some(container.y - 2 * self.margin - header),
        );

        let xs = Self::offsets(&cols, self.margin);
        let ys = Self::offsets(&rows, self.margin + header);

        for &child in &children {
            let anchor = self.anchor(child);
            let preferred = super::preferred_size(tree, ctx, child);
            let fixed = tree.widget(child).base().fixed_size();
            let target = super::apply_fixed(preferred, fixed);

            let [c, r] = anchor.pos;
            let cell_w: i32 = cols[c..c + anchor.span[0]].iter().sum();
            let cell_h: i32 = rows[r..r + anchor.span[1]].iter().sum();

            let (x, w) = Self::place(anchor.align[0], xs[c], cell_w, target.x, fixed.x);
            let (y, h) = Self::place(anchor.align[1], ys[r], cell_h, target.y, fixed.y);
            let base = tree.widget_mut(child).base_mut();
            base.set_pos(Vec2i::new(x, y));
            base.set_size(Vec2i::new(w, h));
        }
    }

    fn offsets(tracks: &[i32], start: i32) -> Vec<i32> {
        let mut out = Vec::with_capacity(tracks.len());
        let mut acc = start;
        for &t in tracks {
            out.push(acc);
            acc += t;
        }
        out
    }

    fn place(align: Alignment, origin: i32, cell: i32, target: i32, fixed: i32) -> (i32, i32) {
        match align {
            Alignment::Minimum => (origin, target),
            Alignment::Middle => (origin + (cell - target) / 2, target),
            Alignment::Maximum => (origin + cell - target, target),
            Alignment::Fill => (origin, if fixed > 0 { fixed } else { cell }),
        }
    }
}
