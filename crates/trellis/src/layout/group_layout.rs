//! Vertical form layout with indented groups under section headings.

use trellis_core::{Vec2i, WidgetId};

use crate::layout::{header_offset, preferred_size};
use crate::widget::traits::RenderContext;
use crate::widget::tree::WidgetTree;

/// Stacks children vertically at full width. A widget answering
/// [`is_section_heading`] starts a new group: it gets the wider group
/// spacing above it and the children after it are indented until the next
/// heading.
///
/// [`is_section_heading`]: crate::widget::Widget::is_section_heading
#[derive(Debug, Clone)]
pub struct GroupLayout {
    margin: i32,
    spacing: i32,
    group_spacing: i32,
    group_indent: i32,
}

impl Default for GroupLayout {
    fn default() -> Self {
        Self {
            margin: 15,
            spacing: 6,
            group_spacing: 14,
            group_indent: 20,
        }
    }
}

impl GroupLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_group_spacing(mut self, group_spacing: i32) -> Self {
        self.group_spacing = group_spacing;
        self
    }

    pub fn with_group_indent(mut self, group_indent: i32) -> Self {
        self.group_indent = group_indent;
        self
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn group_spacing(&self) -> i32 {
        self.group_spacing
    }

    pub fn group_indent(&self) -> i32 {
        self.group_indent
    }

    pub(crate) fn preferred_size(
        &self,
        tree: &WidgetTree,
        ctx: &dyn RenderContext,
        id: WidgetId,
    ) -> Vec2i {
        let mut height = self.margin;
        let mut width = 2 * self.margin;
        let mut first = true;
        let mut indent = false;
        for &child in tree.children(id) {
            if !tree.widget(child).base().visible() {
                continue;
            }
            let heading = tree.widget(child).is_section_heading();
            if !first {
                height += if heading { self.group_spacing } else { self.spacing };
            }
            first = false;

            let target = super::fixed_or_preferred(tree, ctx, child);
            let indent_cur = indent && !heading;
            height += target.y;
            width = width.max(
                target.x + 2 * self.margin + if indent_cur { self.group_indent } else { 0 },
            );
            if heading {
                indent = true;
            }
        }
        Vec2i::new(width, height + self.margin + header_offset(tree, id))
    }

    pub(crate) fn arrange(&self, tree: &mut WidgetTree, ctx: &dyn RenderContext, id: WidgetId) {
        let container = tree.widget(id).base();
        let total_width = if container.fixed_size().x > 0 {
            container.fixed_size().x
        } else {
            container.size().x
        };
        let available = total_width - 2 * self.margin;

        let mut height = self.margin + header_offset(tree, id);
        let mut first = true;
        let mut indent = false;
        for child in tree.children(id).to_vec() {
            if !tree.widget(child).base().visible() {
                continue;
            }
            let heading = tree.widget(child).is_section_heading();
            if !first {
                height += if heading { self.group_spacing } else { self.spacing };
            }
            first = false;

            let indent_px = if indent && !heading { self.group_indent } else { 0 };
            let preferred = Vec2i::new(available - indent_px, preferred_size(tree, ctx, child).y);
            let fixed = tree.widget(child).base().fixed_size();
            let target = super::apply_fixed(preferred, fixed);

            let base = tree.widget_mut(child).base_mut();
            base.set_pos(Vec2i::new(self.margin + indent_px, height));
            base.set_size(target);
            height += target.y;
            if heading {
                indent = true;
            }
        }
    }
}
