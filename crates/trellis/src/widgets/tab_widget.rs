//! Tab container: a header row over a page stack.

use std::any::Any;

use trellis_core::{Result, WidgetId};

use crate::layout::{Alignment, BoxLayout, Orientation};
use crate::widget::{Widget, WidgetBase, WidgetTree};
use crate::widgets::{StackedWidget, TabHeader};

/// Ids of a freshly built tab widget and its two fixed children.
#[derive(Debug, Clone, Copy)]
pub struct TabWidgetParts {
    pub widget: WidgetId,
    pub header: WidgetId,
    pub content: WidgetId,
}

/// Couples a [`TabHeader`] with a [`StackedWidget`] and keeps them in
/// lockstep: tab `i` in the header always corresponds to page `i` in the
/// stack. All mutation goes through the associated functions here, which
/// maintain that invariant.
pub struct TabWidget {
    base: WidgetBase,
}

impl TabWidget {
    /// Builds a tab widget under `parent`, with its header and page stack
    /// stacked vertically at full width.
    pub fn build(tree: &mut WidgetTree, parent: WidgetId) -> Result<TabWidgetParts> {
        let mut widget = TabWidget {
            base: WidgetBase::new(),
        };
        widget
            .base
            .set_layout(BoxLayout::new(Orientation::Vertical, Alignment::Fill));
        let widget = tree.insert(parent, Box::new(widget))?;
        let header = tree.insert(widget, Box::new(TabHeader::new()))?;
        let content = tree.insert(widget, Box::new(StackedWidget::new()))?;
        Ok(TabWidgetParts {
            widget,
            header,
            content,
        })
    }

    /// The header and stack children of a built tab widget.
    ///
    /// # Panics
    ///
    /// Panics if `widget` was not created by [`build`](Self::build).
    fn parts(tree: &WidgetTree, widget: WidgetId) -> (WidgetId, WidgetId) {
        let mut header = None;
        let mut content = None;
        for &child in tree.children(widget) {
            if tree.downcast_ref::<TabHeader>(child).is_some() {
                header.get_or_insert(child);
            } else if tree.widget(child).as_stacked().is_some() {
                content.get_or_insert(child);
            }
        }
        match (header, content) {
            (Some(h), Some(c)) => (h, c),
            _ => panic!("tab widget is missing its header or page stack"),
        }
    }

    /// Appends a tab labelled `label` with `page` as its content, returning
    /// the new tab's index.
    pub fn add_tab(
        tree: &mut WidgetTree,
        widget: WidgetId,
        label: impl Into<String>,
        page: Box<dyn Widget>,
    ) -> Result<usize> {
        let (header, content) = Self::parts(tree, widget);
        let page_id = StackedWidget::add_page(tree, content, page)?;
        let index = tree
            .downcast_mut::<TabHeader>(header)
            .expect("tab header child changed type")
            .add_tab(label);
        debug_assert_eq!(index + 1, tree.child_count(content));
        let selected = tree
            .downcast_ref::<StackedWidget>(content)
            .expect("page stack child changed type")
            .selected_index();
        tree.widget_mut(page_id)
            .base_mut()
            .set_visible(index == selected);
        Ok(index)
    }

    /// Removes tab and page `index` together.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_tab(tree: &mut WidgetTree, widget: WidgetId, index: usize) {
        let (header, content) = Self::parts(tree, widget);
        tree.downcast_mut::<TabHeader>(header)
            .expect("tab header child changed type")
            .remove_tab(index);
        tree.remove_child_at(content, index);
        let pages = tree.child_count(content);
        if let Some(stack) = tree.downcast_mut::<StackedWidget>(content) {
            stack.clamp_selection(pages);
        }
        if pages > 0 {
            let active = tree
                .downcast_ref::<TabHeader>(header)
                .expect("tab header child changed type")
                .active_tab();
            StackedWidget::select(tree, content, active);
        }
    }

    /// Activates tab `index`, switching both the header highlight and the
    /// visible page, and scrolls the header so the tab can be seen.
    pub fn set_active(tree: &mut WidgetTree, widget: WidgetId, index: usize) {
        let (header, content) = Self::parts(tree, widget);
        let header_widget = tree
            .downcast_mut::<TabHeader>(header)
            .expect("tab header child changed type");
        header_widget.set_active_tab(index);
        header_widget.ensure_tab_visible(index);
        StackedWidget::select(tree, content, index);
    }

    pub fn active(tree: &WidgetTree, widget: WidgetId) -> usize {
        let (header, _) = Self::parts(tree, widget);
        tree.downcast_ref::<TabHeader>(header)
            .expect("tab header child changed type")
            .active_tab()
    }

    pub fn tab_count(tree: &WidgetTree, widget: WidgetId) -> usize {
        let (header, _) = Self::parts(tree, widget);
        tree.downcast_ref::<TabHeader>(header)
            .expect("tab header child changed type")
            .tab_count()
    }
}

impl Widget for TabWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "tab-widget"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
