//! Event delivery: hit testing, bubbling, and the deferred-request channel
//! widgets use to ask for tree-level effects.

use tracing::trace;

use trellis_core::logging::targets;
use trellis_core::{Vec2i, WidgetId};

use crate::widget::events::WidgetEvent;
use crate::widget::traits::CursorKind;
use crate::widget::tree::WidgetTree;

// ============================================================================
// Deferred requests
// ============================================================================

/// Effects a widget cannot apply itself during dispatch (the tree is
/// mutably borrowed by its own handler). The screen drains these after the
/// event returns and applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRequest {
    /// Move the focus path to this widget.
    Focus(WidgetId),
    /// A tab header activated the tab at `index`; the owning container
    /// switches the matching page.
    TabActivated { header: WidgetId, index: usize },
}

/// Per-delivery context handed to [`Widget::event`](crate::widget::Widget::event).
pub struct EventCx<'a> {
    /// The widget currently being offered the event.
    pub widget: WidgetId,
    /// Size of the widget's parent, in its own coordinate space. Top-level
    /// widgets see the screen size here.
    pub parent_size: Vec2i,
    requests: &'a mut Vec<EventRequest>,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(
        widget: WidgetId,
        parent_size: Vec2i,
        requests: &'a mut Vec<EventRequest>,
    ) -> Self {
        Self {
            widget,
            parent_size,
            requests,
        }
    }

    /// Asks the screen to focus the current widget after dispatch.
    pub fn request_focus(&mut self) {
        self.requests.push(EventRequest::Focus(self.widget));
    }

    pub fn push(&mut self, request: EventRequest) {
        self.requests.push(request);
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Stateless routing helpers. All state (capture, focus, hover) lives in
/// [`Screen`](crate::Screen); these functions only walk the tree.
pub struct EventDispatcher;

impl EventDispatcher {
    /// Front-most visible widget under `pos` (window coordinates), or `None`
    /// when only empty space is under the pointer. `root` itself is never
    /// reported as a hit. Popups whose owning window is hidden are skipped.
    pub fn hit_test(tree: &WidgetTree, root: WidgetId, pos: Vec2i) -> Option<WidgetId> {
        let hit = tree.find_widget_inner(root, pos, true)?;
        (hit != root).then_some(hit)
    }

    /// Converts a window-space point into `id`'s local coordinates.
    pub fn window_to_local(tree: &WidgetTree, id: WidgetId, pos: Vec2i) -> Vec2i {
        pos - tree.absolute_pos(id)
    }

    /// Offers `event` to `target`, then to each ancestor in turn until one
    /// consumes it or it reaches the root. Disabled widgets are skipped.
    /// Returns `true` if some widget consumed the event.
    pub fn send_event(
        tree: &mut WidgetTree,
        screen_size: Vec2i,
        requests: &mut Vec<EventRequest>,
        target: WidgetId,
        event: &mut WidgetEvent,
    ) -> bool {
        let mut cur = Some(target);
        while let Some(id) = cur {
            let parent = tree.parent(id);
            if tree.widget(id).base().enabled() {
                let parent_size = match parent {
                    Some(p) => tree.widget(p).base().size(),
                    None => screen_size,
                };
                if let Some(pos) = event.pos() {
                    event.set_local(EventDispatcher::window_to_local(tree, id, pos));
                }
                let mut cx = EventCx::new(id, parent_size, requests);
                if tree.widget_mut(id).event(&mut cx, event) {
                    trace!(
                        target: targets::DISPATCH,
                        ?id,
                        event = event.name(),
                        "consumed"
                    );
                    event.base_mut().accept();
                    return true;
                }
            }
            if !event.propagates() {
                return false;
            }
            cur = parent;
        }
        false
    }

    /// Delivers `event` to `target` only, without bubbling. Used for focus,
    /// hover, and capture deliveries that are addressed to a known widget.
    pub fn send_event_direct(
        tree: &mut WidgetTree,
        screen_size: Vec2i,
        requests: &mut Vec<EventRequest>,
        target: WidgetId,
        event: &mut WidgetEvent,
    ) -> bool {
        if !tree.contains(target) || !tree.widget(target).base().enabled() {
            return false;
        }
        let parent_size = match tree.parent(target) {
            Some(p) => tree.widget(p).base().size(),
            None => screen_size,
        };
        if let Some(pos) = event.pos() {
            event.set_local(EventDispatcher::window_to_local(tree, target, pos));
        }
        let mut cx = EventCx::new(target, parent_size, requests);
        let consumed = tree.widget_mut(target).event(&mut cx, event);
        if consumed {
            event.base_mut().accept();
        }
        consumed
    }

    /// Cursor to show for the pointer resting on `id`: the nearest widget in
    /// the parent chain with an explicit cursor, defaulting to the arrow.
    pub fn effective_cursor(tree: &WidgetTree, id: WidgetId) -> CursorKind {
        let mut cur = Some(id);
        while let Some(w) = cur {
            if let Some(cursor) = tree.get(w).and_then(|widget| widget.base().cursor()) {
                return cursor;
            }
            cur = tree.parent(w);
        }
        CursorKind::Arrow
    }

    /// Tooltip to show for the pointer resting on `id`, inherited from the
    /// nearest ancestor that sets one.
    pub fn effective_tooltip(tree: &WidgetTree, id: WidgetId) -> Option<String> {
        let mut cur = Some(id);
        while let Some(w) = cur {
            if let Some(tip) = tree.get(w).and_then(|widget| widget.base().tooltip()) {
                return Some(tip.to_owned());
            }
            cur = tree.parent(w);
        }
        None
    }
}
