//! Page stack showing one child at a time.

use std::any::Any;

use trellis_core::{Result, WidgetId};

use crate::widget::traits::ContainerPolicy;
use crate::widget::{Widget, WidgetBase, WidgetTree};

/// Container whose children are pages: exactly one is visible and all of
/// them are stretched to the container size, so switching pages never moves
/// content. The preferred size is the maximum over all pages, hidden ones
/// included.
pub struct StackedWidget {
    base: WidgetBase,
    selected: usize,
}

impl StackedWidget {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            selected: 0,
        }
    }

    /// Index of the visible page. Only meaningful once a page exists.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Appends a page, hidden unless it becomes the selected one.
    pub fn add_page(
        tree: &mut WidgetTree,
        stack: WidgetId,
        page: Box<dyn Widget>,
    ) -> Result<WidgetId> {
        let index = tree.child_count(stack);
        let selected = tree
            .downcast_ref::<StackedWidget>(stack)
            .map(|s| s.selected)
            .unwrap_or(0);
        let id = tree.insert(stack, page)?;
        tree.widget_mut(id).base_mut().set_visible(index == selected);
        Ok(id)
    }

    /// Makes the page at `index` the visible one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn select(tree: &mut WidgetTree, stack: WidgetId, index: usize) {
        let children = tree.children(stack).to_vec();
        assert!(
            index < children.len(),
            "page index {index} out of range for stack with {} pages",
            children.len()
        );
        for (i, child) in children.into_iter().enumerate() {
            tree.widget_mut(child).base_mut().set_visible(i == index);
        }
        if let Some(stacked) = tree.downcast_mut::<StackedWidget>(stack) {
            stacked.selected = index;
        }
    }

    pub(crate) fn clamp_selection(&mut self, page_count: usize) {
        if page_count > 0 && self.selected >= page_count {
            self.selected = page_count - 1;
        }
    }
}

impl Default for StackedWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StackedWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "stacked"
    }

    fn container_policy(&self) -> ContainerPolicy {
        ContainerPolicy::FillAllChildren
    }

    fn as_stacked(&self) -> Option<&StackedWidget> {
        Some(self)
    }

    fn as_stacked_mut(&mut self) -> Option<&mut StackedWidget> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::Vec2i;

    use crate::layout::{perform, preferred_size};
    use crate::widget::tests::{FixedMeasure, MockWidget};

    fn stack_with_pages(n: usize) -> (WidgetTree, WidgetId, Vec<WidgetId>) {
        let mut tree = WidgetTree::new();
        let mut stack = StackedWidget::new();
        stack.base_mut().set_size(Vec2i::new(100, 80));
        let stack = tree.insert_root(Box::new(stack));
        let pages = (0..n)
            .map(|i| {
                StackedWidget::add_page(
                    &mut tree,
                    stack,
                    Box::new(MockWidget::with_preferred(Vec2i::new(10 * (i as i32 + 1), 20))),
                )
                .unwrap()
            })
            .collect();
        (tree, stack, pages)
    }

    #[test]
    fn test_only_selected_page_is_visible() {
        let (mut tree, stack, pages) = stack_with_pages(3);
        assert!(tree.widget(pages[0]).base().visible());
        assert!(!tree.widget(pages[1]).base().visible());

        StackedWidget::select(&mut tree, stack, 2);
        assert!(!tree.widget(pages[0]).base().visible());
        assert!(tree.widget(pages[2]).base().visible());
        assert_eq!(
            tree.downcast_ref::<StackedWidget>(stack).unwrap().selected_index(),
            2
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_select_out_of_range_panics() {
        let (mut tree, stack, _) = stack_with_pages(2);
        StackedWidget::select(&mut tree, stack, 2);
    }

    #[test]
    fn test_pages_fill_the_stack() {
        let ctx = FixedMeasure::default();
        let (mut tree, stack, pages) = stack_with_pages(2);
        perform(&mut tree, &ctx, stack);
        for page in pages {
            assert_eq!(tree.widget(page).base().pos(), Vec2i::ZERO);
            assert_eq!(tree.widget(page).base().size(), Vec2i::new(100, 80));
        }
    }

    #[test]
    fn test_preferred_covers_hidden_pages() {
        let ctx = FixedMeasure::default();
        let (tree, stack, _) = stack_with_pages(3);
        // The widest page (30 wide) is hidden, yet still counts.
        assert_eq!(preferred_size(&tree, &ctx, stack), Vec2i::new(30, 20));
    }
}
