//! The widget ownership tree.
//!
//! All widgets live in a single slotmap arena keyed by [`WidgetId`]. Parent
//! and child links are stored per node; removing a widget despawns its whole
//! subtree. The tree itself is policy-free: focus, capture and z-order
//! bookkeeping live in [`Screen`](crate::Screen).

use slotmap::SlotMap;
use tracing::trace;

use trellis_core::logging::{targets, TreeFormatOptions};
use trellis_core::{Result, TreeError, Vec2i, WidgetId};

use crate::widget::traits::Widget;

struct WidgetNode {
    widget: Box<dyn Widget>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

/// Arena of widgets plus their ownership links.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    // ========================================================================
    // Insertion and removal
    // ========================================================================

    /// Inserts a widget with no parent. Screens use this once for their root.
    pub fn insert_root(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let kind = widget.kind_name();
        let id = self.nodes.insert(WidgetNode {
            widget,
            parent: None,
            children: Vec::new(),
        });
        trace!(target: targets::TREE, ?id, kind, "insert root");
        id
    }

    /// Appends `widget` as the last child of `parent`.
    pub fn insert(&mut self, parent: WidgetId, widget: Box<dyn Widget>) -> Result<WidgetId> {
        let index = self.node(parent)?.children.len();
        self.insert_at(parent, index, widget)
    }

    /// Inserts `widget` as a child of `parent` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` exceeds the current child count; an out-of-range
    /// index is a programming error, matching [`remove_child_at`].
    ///
    /// [`remove_child_at`]: Self::remove_child_at
    pub fn insert_at(
        &mut self,
        parent: WidgetId,
        index: usize,
        widget: Box<dyn Widget>,
    ) -> Result<WidgetId> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownWidget(parent));
        }
        let kind = widget.kind_name();
        let id = self.nodes.insert(WidgetNode {
            widget,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.insert(index, id);
        trace!(target: targets::TREE, ?id, ?parent, index, kind, "insert");
        Ok(id)
    }

    /// Re-homes an existing widget under a new parent, appending it as the
    /// last child. The widget must currently be parentless (freshly
    /// detached); re-parenting an attached widget is reported as an error.
    pub fn attach(&mut self, parent: WidgetId, id: WidgetId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownWidget(parent));
        }
        let node = self.node(id)?;
        if node.parent.is_some() {
            return Err(TreeError::AlreadyParented(id));
        }
        self.nodes[id].parent = Some(parent);
        self.nodes[parent].children.push(id);
        Ok(())
    }

    /// Removes `id` and its entire subtree, returning the removed ids in
    /// pre-order. Removing an unknown id is a no-op returning an empty list.
    pub fn remove(&mut self, id: WidgetId) -> Vec<WidgetId> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|&c| c != id);
        }
        let mut removed = Vec::new();
        self.despawn(id, &mut removed);
        trace!(target: targets::TREE, ?id, count = removed.len(), "remove subtree");
        removed
    }

    fn despawn(&mut self, id: WidgetId, removed: &mut Vec<WidgetId>) {
        removed.push(id);
        let node = self.nodes.remove(id).expect("despawn of missing node");
        for child in node.children {
            self.despawn(child, removed);
        }
    }

    /// Removes the child of `parent` at `index` together with its subtree.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is unknown or `index` is out of range.
    pub fn remove_child_at(&mut self, parent: WidgetId, index: usize) -> Vec<WidgetId> {
        let children = &self.nodes[parent].children;
        assert!(
            index < children.len(),
            "child index {index} out of range for widget with {} children",
            children.len()
        );
        let child = children[index];
        self.remove(child)
    }

    // ========================================================================
    // Access
    // ========================================================================

    fn node(&self, id: WidgetId) -> Result<&WidgetNode> {
        self.nodes.get(id).ok_or(TreeError::UnknownWidget(id))
    }

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id).map(|n| n.widget.as_ref())
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id).map(|n| n.widget.as_mut())
    }

    /// Borrow a widget that is known to exist.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn widget(&self, id: WidgetId) -> &dyn Widget {
        self.nodes[id].widget.as_ref()
    }

    /// See [`widget`](Self::widget).
    pub fn widget_mut(&mut self, id: WidgetId) -> &mut (dyn Widget + 'static) {
        self.nodes[id].widget.as_mut()
    }

    /// Typed access to a widget's concrete type.
    pub fn downcast_ref<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.get_mut(id)?.as_any_mut().downcast_mut::<T>()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id)?.parent
    }

    /// Children in z-order: front-to-back is the reverse of this slice.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: WidgetId) -> usize {
        self.children(id).len()
    }

    pub(crate) fn children_mut(&mut self, id: WidgetId) -> &mut Vec<WidgetId> {
        &mut self.nodes[id].children
    }

    /// Parent chain starting at `id`'s parent, ending at the root.
    pub fn ancestor_chain(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.parent(p);
        }
        chain
    }

    /// Position of `id`'s origin in window (root) coordinates.
    pub fn absolute_pos(&self, id: WidgetId) -> Vec2i {
        let mut pos = self.widget(id).base().pos();
        for ancestor in self.ancestor_chain(id) {
            pos += self.widget(ancestor).base().pos();
        }
        pos
    }

    /// Whether `id` and all of its ancestors are visible. A popup is
    /// additionally gated on its owning window being effectively visible.
    pub fn is_effectively_visible(&self, id: WidgetId) -> bool {
        let mut cur = Some(id);
        while let Some(w) = cur {
            let widget = match self.get(w) {
                Some(widget) => widget,
                None => return false,
            };
            if !widget.base().visible() {
                return false;
            }
            if let Some(popup) = widget.as_popup() {
                if !self.is_effectively_visible(popup.parent_window()) {
                    return false;
                }
            }
            cur = self.parent(w);
        }
        true
    }

    /// Finds a widget by its application-assigned string id.
    pub fn find_by_id(&self, needle: &str) -> Option<WidgetId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.widget.base().id() == Some(needle))
            .map(|(id, _)| id)
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    /// Deepest visible descendant of `id` containing `local` (a point in
    /// `id`'s coordinate space). Later siblings win, so the front-most
    /// widget is found first. Returns `id` itself when no child matches but
    /// `id` contains the point.
    pub fn find_widget(&self, id: WidgetId, local: Vec2i) -> Option<WidgetId> {
        self.find_widget_inner(id, local, false)
    }

    pub(crate) fn find_widget_inner(
        &self,
        id: WidgetId,
        local: Vec2i,
        gate_popups: bool,
    ) -> Option<WidgetId> {
        let widget = self.get(id)?;
        for &child in self.children(id).iter().rev() {
            let cw = self.widget(child);
            if !cw.base().visible() {
                continue;
            }
            if gate_popups {
                if let Some(popup) = cw.as_popup() {
                    if !self.is_effectively_visible(popup.parent_window()) {
                        continue;
                    }
                }
            }
            let child_local = local - cw.base().pos();
            if cw.base().contains(child_local) {
                if let Some(hit) = self.find_widget_inner(child, child_local, gate_popups) {
                    return Some(hit);
                }
            }
        }
        widget.base().contains(local).then_some(id)
    }

    // ========================================================================
    // Debug formatting
    // ========================================================================

    /// Renders the subtree under `root` as an indented tree, one widget per
    /// line, for logs and test failures.
    pub fn format_tree(&self, root: WidgetId, opts: &TreeFormatOptions) -> String {
        let mut out = String::new();
        self.format_node(root, opts, "", true, true, 0, &mut out);
        out
    }

    fn format_node(
        &self,
        id: WidgetId,
        opts: &TreeFormatOptions,
        prefix: &str,
        is_root: bool,
        is_last: bool,
        depth: usize,
        out: &mut String,
    ) {
        if let Some(max) = opts.max_depth {
            if depth > max {
                return;
            }
        }
        let widget = match self.get(id) {
            Some(w) => w,
            None => return,
        };
        let (mid, last, rule, blank) = opts.style.glyphs();
        if is_root {
            out.push_str(widget.kind_name());
        } else {
            out.push_str(prefix);
            out.push_str(if is_last { last } else { mid });
            out.push_str(widget.kind_name());
        }
        if let Some(sid) = widget.base().id() {
            out.push_str(" #");
            out.push_str(sid);
        }
        if opts.show_ids {
            out.push_str(&format!(" {:?}", id));
        }
        if opts.show_geometry {
            let b = widget.base();
            out.push_str(&format!(
                " [{},{} {}x{}]",
                b.pos().x,
                b.pos().y,
                b.size().x,
                b.size().y
            ));
        }
        if !widget.base().visible() {
            out.push_str(" (hidden)");
        }
        out.push('\n');
        let children = self.children(id).to_vec();
        for (i, child) in children.iter().enumerate() {
            let child_last = i + 1 == children.len();
            let child_prefix = if is_root {
                String::new()
            } else {
                format!("{prefix}{}", if is_last { blank } else { rule })
            };
            self.format_node(*child, opts, &child_prefix, false, child_last, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::base::WidgetBase;
    use crate::widget::tests::MockWidget;

    fn sized(pos: Vec2i, size: Vec2i) -> Box<MockWidget> {
        let mut w = MockWidget::new();
        w.base_mut().set_pos(pos);
        w.base_mut().set_size(size);
        Box::new(w)
    }

    #[test]
    fn test_insert_and_parent_links() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let a = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        let b = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_insert_at_index() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let a = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        let b = tree.insert_at(root, 0, Box::new(MockWidget::new())).unwrap();
        assert_eq!(tree.children(root), &[b, a]);
    }

    #[test]
    fn test_insert_under_unknown_parent_errors() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let removed = tree.remove(root);
        assert_eq!(removed, vec![root]);
        assert!(matches!(
            tree.insert(root, Box::new(MockWidget::new())),
            Err(TreeError::UnknownWidget(_))
        ));
    }

    #[test]
    fn test_remove_despawns_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let mid = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        let leaf = tree.insert(mid, Box::new(MockWidget::new())).unwrap();
        let removed = tree.remove(mid);
        assert_eq!(removed, vec![mid, leaf]);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_remove_child_at_out_of_range_panics() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        tree.remove_child_at(root, 0);
    }

    #[test]
    fn test_attach_rejects_parented_widget() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let a = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        let b = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        assert!(matches!(
            tree.attach(b, a),
            Err(TreeError::AlreadyParented(_))
        ));
    }

    #[test]
    fn test_absolute_pos_accumulates() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(sized(Vec2i::ZERO, Vec2i::new(100, 100)));
        let mid = tree
            .insert(root, sized(Vec2i::new(10, 20), Vec2i::new(50, 50)))
            .unwrap();
        let leaf = tree
            .insert(mid, sized(Vec2i::new(5, 5), Vec2i::new(10, 10)))
            .unwrap();
        assert_eq!(tree.absolute_pos(leaf), Vec2i::new(15, 25));
    }

    #[test]
    fn test_find_widget_prefers_later_siblings() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(sized(Vec2i::ZERO, Vec2i::new(100, 100)));
        let _under = tree
            .insert(root, sized(Vec2i::new(10, 10), Vec2i::new(40, 40)))
            .unwrap();
        let over = tree
            .insert(root, sized(Vec2i::new(10, 10), Vec2i::new(40, 40)))
            .unwrap();
        assert_eq!(tree.find_widget(root, Vec2i::new(20, 20)), Some(over));
    }

    #[test]
    fn test_find_widget_skips_invisible() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(sized(Vec2i::ZERO, Vec2i::new(100, 100)));
        let child = tree
            .insert(root, sized(Vec2i::new(10, 10), Vec2i::new(40, 40)))
            .unwrap();
        tree.widget_mut(child).base_mut().hide();
        assert_eq!(tree.find_widget(root, Vec2i::new(20, 20)), Some(root));
    }

    #[test]
    fn test_find_widget_outside_returns_none() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(sized(Vec2i::ZERO, Vec2i::new(100, 100)));
        assert_eq!(tree.find_widget(root, Vec2i::new(150, 20)), None);
    }

    #[test]
    fn test_find_by_id() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let mut named = MockWidget::new();
        named.base_mut().set_id("status-bar");
        let id = tree.insert(root, Box::new(named)).unwrap();
        assert_eq!(tree.find_by_id("status-bar"), Some(id));
        assert_eq!(tree.find_by_id("missing"), None);
    }

    #[test]
    fn test_format_tree_lists_all_nodes() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(MockWidget::new()));
        let a = tree.insert(root, Box::new(MockWidget::new())).unwrap();
        tree.insert(a, Box::new(MockWidget::new())).unwrap();
        tree.insert(root, Box::new(MockWidget::new())).unwrap();
        let text = tree.format_tree(root, &TreeFormatOptions::default());
        assert_eq!(text.lines().count(), 4);
    }
}
