//! Single-axis stacking layout.

use trellis_core::{Vec2i, WidgetId};

use crate::layout::{apply_fixed, fixed_or_preferred, header_offset, Alignment, Orientation};
use crate::widget::traits::RenderContext;
use crate::widget::tree::WidgetTree;

/// Stacks visible children along one axis with uniform margin and spacing.
/// The cross axis is governed by a single [`Alignment`] applied to every
/// child.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    orientation: Orientation,
    alignment: Alignment,
    margin: i32,
    spacing: i32,
}

impl BoxLayout {
    pub fn new(orientation: Orientation, alignment: Alignment) -> Self {
        Self {
            orientation,
            alignment,
            margin: 0,
            spacing: 0,
        }
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: i32) {
        self.margin = margin;
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.spacing = spacing;
    }

    pub(crate) fn preferred_size(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        id: WidgetId,
    ) -> Vec2i {
        let mut main = 0;
        let mut cross = 0;
        let mut first = true;
        for &child in tree.children(id) {
            if !tree.widget(child).base().visible() {
                continue;
            }
            if !first {
                main += self.spacing;
            }
            first = false;
            let target = fixed_or_preferred(tree, ctx, child);
            main += self.orientation.main(target);
            cross = cross.max(self.orientation.cross(target));
        }
        let size = self
            .orientation
            .pack(main + 2 * self.margin, cross + 2 * self.margin);
        size + Vec2i::new(0, header_offset(tree, id))
    }

    pub(crate) fn arrange(&self, tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
        let header = header_offset(tree, id);
        let container = tree.widget(id).base().size() - Vec2i::new(0, header);
        let container_cross = self.orientation.cross(container);

        let mut position = self.margin;
        let mut first = true;
        for child in tree.children(id).to_vec() {
            if !tree.widget(child).base().visible() {
                continue;
            }
            if !first {
                position += self.spacing;
            }
            first = false;

            let preferred = super::preferred_size(tree, ctx, child);
            let fixed = tree.widget(child).base().fixed_size();
            let target = apply_fixed(preferred, fixed);
            let target_main = self.orientation.main(target);
            let mut target_cross = self.orientation.cross(target);

            let pos_cross = match self.alignment {
                Alignment::Minimum => self.margin,
                Alignment::Middle => (container_cross - target_cross) / 2,
                Alignment::Maximum => container_cross - target_cross - self.margin,
                Alignment::Fill => {
                    if self.orientation.cross(fixed) == 0 {
                        target_cross = container_cross - 2 * self.margin;
                    }
                    self.margin
                }
            };

            let mut pos = self.orientation.pack(position, pos_cross);
            pos.y += header;
            let base = tree.widget_mut(child).base_mut();
            base.set_pos(pos);
            base.set_size(self.orientation.pack(target_main, target_cross));
            position += target_main;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::perform;
    use crate::widget::tests::{FixedMeasure, MockWidget};
    use crate::widget::Widget;

    fn panel_with_layout(layout: BoxLayout) -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let mut panel = MockWidget::new();
        panel.base_mut().set_layout(layout);
        let panel = tree.insert_root(Box::new(panel));
        (tree, panel)
    }

    #[test]
    fn test_preferred_sums_main_axis_plus_margins() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) = panel_with_layout(
            BoxLayout::new(Orientation::Horizontal, Alignment::Minimum).with_margin(5),
        );
        for w in [10, 20, 30] {
            tree.insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(w, 8))))
                .unwrap();
        }
        let pref = tree
            .widget(panel)
            .base()
            .layout()
            .unwrap()
            .preferred_size(&tree, &ctx, panel);
        assert_eq!(pref, Vec2i::new(70, 18));
    }

    #[test]
    fn test_preferred_of_empty_container_is_twice_margin() {
        let ctx = FixedMeasure::default();
        let (tree, panel) = panel_with_layout(
            BoxLayout::new(Orientation::Vertical, Alignment::Middle).with_margin(7),
        );
        let pref = tree
            .widget(panel)
            .base()
            .layout()
            .unwrap()
            .preferred_size(&tree, &ctx, panel);
        assert_eq!(pref, Vec2i::new(14, 14));
    }

    #[test]
    fn test_spacing_applies_between_children_only() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) = panel_with_layout(
            BoxLayout::new(Orientation::Vertical, Alignment::Minimum).with_spacing(4),
        );
        for _ in 0..3 {
            tree.insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(10, 10))))
                .unwrap();
        }
        let pref = tree
            .widget(panel)
            .base()
            .layout()
            .unwrap()
            .preferred_size(&tree, &ctx, panel);
        assert_eq!(pref.y, 3 * 10 + 2 * 4);
    }

    #[test]
    fn test_arrange_stacks_and_fills_cross_axis() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) = panel_with_layout(
            BoxLayout::new(Orientation::Vertical, Alignment::Fill)
                .with_margin(5)
                .with_spacing(2),
        );
        tree.widget_mut(panel).base_mut().set_size(Vec2i::new(100, 80));
        let a = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(20, 10))))
            .unwrap();
        let b = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(30, 15))))
            .unwrap();

        perform(&mut tree, &ctx, panel);
        assert_eq!(tree.widget(a).base().pos(), Vec2i::new(5, 5));
        assert_eq!(tree.widget(a).base().size(), Vec2i::new(90, 10));
        assert_eq!(tree.widget(b).base().pos(), Vec2i::new(5, 17));
        assert_eq!(tree.widget(b).base().size(), Vec2i::new(90, 15));
    }

    #[test]
    fn test_fill_respects_fixed_cross_size() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) =
            panel_with_layout(BoxLayout::new(Orientation::Vertical, Alignment::Fill));
        tree.widget_mut(panel).base_mut().set_size(Vec2i::new(100, 50));
        let a = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(20, 10))))
            .unwrap();
        tree.widget_mut(a).base_mut().set_fixed_size(Vec2i::new(33, 0));

        perform(&mut tree, &ctx, panel);
        assert_eq!(tree.widget(a).base().size(), Vec2i::new(33, 10));
    }

    #[test]
    fn test_middle_alignment_centers_on_cross_axis() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) =
            panel_with_layout(BoxLayout::new(Orientation::Horizontal, Alignment::Middle));
        tree.widget_mut(panel).base_mut().set_size(Vec2i::new(100, 40));
        let a = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(10, 20))))
            .unwrap();

        perform(&mut tree, &ctx, panel);
        assert_eq!(tree.widget(a).base().pos().y, 10);
    }

    #[test]
    fn test_invisible_children_are_skipped() {
        let ctx = FixedMeasure::default();
        let (mut tree, panel) =
            panel_with_layout(BoxLayout::new(Orientation::Horizontal, Alignment::Minimum));
        let a = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(10, 10))))
            .unwrap();
        let b = tree
            .insert(panel, Box::new(MockWidget::with_preferred(Vec2i::new(10, 10))))
            .unwrap();
        tree.widget_mut(a).base_mut().hide();

        perform(&mut tree, &ctx, panel);
        assert_eq!(tree.widget(b).base().pos(), Vec2i::ZERO);
        let pref = tree
            .widget(panel)
            .base()
            .layout()
            .unwrap()
            .preferred_size(&tree, &ctx, panel);
        assert_eq!(pref, Vec2i::new(10, 10));
    }
}
