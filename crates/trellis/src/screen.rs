//! The screen: root of the widget tree and owner of all routing state.

use std::any::Any;

use tracing::{debug, trace};

use trellis_core::logging::targets;
use trellis_core::{Result, TreeError, Vec2i, WidgetId};

use crate::layout;
use crate::widget::dispatcher::{EventDispatcher, EventRequest};
use crate::widget::events::{
    CharEvent, EnterEvent, EventBase, FocusInEvent, FocusOutEvent, InputEvent, Key, KeyEvent,
    LeaveEvent, Modifiers, MouseButton, MouseDragEvent, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, WheelEvent, WidgetEvent,
};
use crate::widget::traits::{CursorKind, RenderContext, Widget};
use crate::widget::tree::WidgetTree;
use crate::widget::WidgetBase;
use crate::widgets::{Popup, Window};

/// Invisible container at the top of the tree. It exists so windows and
/// popups have a common parent whose child order is the z-order.
struct RootWidget {
    base: WidgetBase,
}

impl Widget for RootWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "screen-root"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owns the widget tree and turns raw [`InputEvent`]s into widget events.
///
/// All cross-widget state lives here: the focus path, the drag capture
/// slot, the hovered widget, pressed buttons, and the z-order of top-level
/// windows. Widgets themselves never hold references to one another.
pub struct Screen {
    tree: WidgetTree,
    root: WidgetId,
    size: Vec2i,
    /// Focus chain ordered root first, focused leaf last.
    focus_path: Vec<WidgetId>,
    /// Widget receiving drag deliveries while a left button is held.
    drag_widget: Option<WidgetId>,
    hovered: Option<WidgetId>,
    mouse_pos: Vec2i,
    buttons: u8,
    modifiers: Modifiers,
    requests: Vec<EventRequest>,
}

impl Screen {
    pub fn new(size: Vec2i) -> Self {
        let mut tree = WidgetTree::new();
        let mut root = RootWidget {
            base: WidgetBase::new(),
        };
        root.base.set_size(size);
        let root = tree.insert_root(Box::new(root));
        Self {
            tree,
            root,
            size,
            focus_path: Vec::new(),
            drag_widget: None,
            hovered: None,
            mouse_pos: Vec2i::ZERO,
            buttons: 0,
            modifiers: Modifiers::NONE,
            requests: Vec::new(),
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn size(&self) -> Vec2i {
        self.size
    }

    pub fn set_size(&mut self, size: Vec2i) {
        self.size = size;
    }

    pub fn mouse_pos(&self) -> Vec2i {
        self.mouse_pos
    }

    pub fn focus_path(&self) -> &[WidgetId] {
        &self.focus_path
    }

    pub fn drag_target(&self) -> Option<WidgetId> {
        self.drag_widget
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    // ========================================================================
    // Top-level management
    // ========================================================================

    /// Adds a window as the front-most top-level widget.
    pub fn add_window(&mut self, window: Window) -> WidgetId {
        self.tree
            .insert(self.root, Box::new(window))
            .expect("screen root is always present")
    }

    /// Adds a popup as a top-level widget. Its owner must be an existing
    /// window (or popup).
    pub fn add_popup(&mut self, popup: Popup) -> Result<WidgetId> {
        let owner = popup.parent_window();
        match self.tree.get(owner) {
            Some(w) if w.as_window().is_some() => {}
            Some(_) => return Err(TreeError::NotAWindow(owner)),
            None => return Err(TreeError::UnknownWidget(owner)),
        }
        self.tree.insert(self.root, Box::new(popup))
    }

    /// Removes a widget and its subtree, dropping any routing state that
    /// pointed into it.
    pub fn remove_widget(&mut self, id: WidgetId) {
        let removed = self.tree.remove(id);
        if removed.is_empty() {
            return;
        }
        self.focus_path.retain(|w| !removed.contains(w));
        if self.drag_widget.is_some_and(|w| removed.contains(&w)) {
            self.drag_widget = None;
        }
        if self.hovered.is_some_and(|w| removed.contains(&w)) {
            self.hovered = None;
        }
    }

    /// Moves a top-level widget to the front, then re-stacks popups above
    /// their owners until the order is stable.
    pub fn move_window_to_front(&mut self, id: WidgetId) {
        if self.tree.parent(id) != Some(self.root) {
            return;
        }
        let children = self.tree.children_mut(self.root);
        children.retain(|&c| c != id);
        children.push(id);

        // A popup below its owner is hoisted to the front; repeat until no
        // popup moves, so popup-of-popup chains settle too.
        loop {
            let order = self.tree.children(self.root).to_vec();
            let mut moved = None;
            for (i, &child) in order.iter().enumerate() {
                if let Some(popup) = self.tree.widget(child).as_popup() {
                    let owner = popup.parent_window();
                    if order.iter().position(|&c| c == owner).is_some_and(|o| o > i) {
                        moved = Some(child);
                        break;
                    }
                }
            }
            match moved {
                Some(popup) => {
                    let children = self.tree.children_mut(self.root);
                    children.retain(|&c| c != popup);
                    children.push(popup);
                }
                None => break,
            }
        }
        trace!(target: targets::ZORDER, ?id, "window to front");
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Moves the focus path to `target` (or clears it), notifying every
    /// widget leaving the old path and entering the new one exactly once.
    /// The window containing the new focus is raised.
    pub fn update_focus(&mut self, target: Option<WidgetId>) {
        let new_path = match target {
            Some(t) if self.tree.contains(t) => {
                let mut path = self.tree.ancestor_chain(t);
                path.reverse();
                path.push(t);
                path
            }
            _ => Vec::new(),
        };
        let old_path = std::mem::take(&mut self.focus_path);

        for &w in old_path.iter().rev() {
            if !new_path.contains(&w) && self.tree.contains(w) {
                self.tree.widget_mut(w).base_mut().set_focused(false);
                let mut ev = WidgetEvent::FocusOut(FocusOutEvent {
                    base: EventBase::new(),
                });
                self.direct(w, &mut ev);
            }
        }
        for &w in &new_path {
            if !old_path.contains(&w) {
                self.tree.widget_mut(w).base_mut().set_focused(true);
                let mut ev = WidgetEvent::FocusIn(FocusInEvent {
                    base: EventBase::new(),
                });
                self.direct(w, &mut ev);
            }
        }
        debug!(target: targets::FOCUS, depth = new_path.len(), "focus path updated");
        self.focus_path = new_path;

        if let Some(&top) = self.focus_path.get(1) {
            if self.tree.widget(top).as_window().is_some() {
                self.move_window_to_front(top);
            }
        }
    }

    pub fn request_focus(&mut self, id: WidgetId) {
        self.update_focus(Some(id));
    }

    pub fn clear_focus(&mut self) {
        self.update_focus(None);
    }

    // ========================================================================
    // Layout and painting
    // ========================================================================

    /// Runs the full layout pass: sizes every top-level widget, arranges
    /// the whole tree, then re-anchors popups to their owners.
    pub fn perform_layout(&mut self, ctx: &dyn RenderContext) {
        self.tree.widget_mut(self.root).base_mut().set_size(self.size);
        layout::perform(&mut self.tree, ctx, self.root);
        self.refresh_popup_placement();
    }

    fn refresh_popup_placement(&mut self) {
        for child in self.tree.children(self.root).to_vec() {
            let placement = match self.tree.widget(child).as_popup() {
                Some(popup) => {
                    if !self.tree.contains(popup.parent_window()) {
                        continue;
                    }
                    let owner_pos = self.tree.absolute_pos(popup.parent_window());
                    popup.placement(owner_pos)
                }
                None => continue,
            };
            self.tree.widget_mut(child).base_mut().set_pos(placement);
        }
    }

    /// Paints every effectively visible widget, parents before children,
    /// top-level widgets in back-to-front order.
    pub fn draw_all(&self, ctx: &mut dyn RenderContext) {
        self.draw_widget(self.root, Vec2i::ZERO, ctx);
    }

    fn draw_widget(&self, id: WidgetId, parent_origin: Vec2i, ctx: &mut dyn RenderContext) {
        let widget = self.tree.widget(id);
        if !widget.base().visible() {
            return;
        }
        if let Some(popup) = widget.as_popup() {
            if !self.tree.is_effectively_visible(popup.parent_window()) {
                return;
            }
        }
        let origin = parent_origin + widget.base().pos();
        widget.draw(ctx, origin);
        for &child in self.tree.children(id) {
            self.draw_widget(child, origin, ctx);
        }
    }

    // ========================================================================
    // Input dispatch
    // ========================================================================

    /// Routes one platform event through the tree. Returns whether some
    /// widget consumed it.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        let consumed = match event {
            InputEvent::PointerButton {
                pos,
                button,
                pressed,
                modifiers,
            } => self.dispatch_button(pos, button, pressed, modifiers),
            InputEvent::PointerMove { pos, modifiers } => self.dispatch_move(pos, modifiers),
            InputEvent::Scroll {
                pos,
                delta,
                modifiers,
            } => self.dispatch_scroll(pos, delta, modifiers),
            InputEvent::Key {
                key,
                pressed,
                modifiers,
            } => self.dispatch_key(key, pressed, modifiers),
            InputEvent::Char { codepoint } => self.dispatch_char(codepoint),
        };
        self.drain_requests();
        consumed
    }

    fn dispatch_button(
        &mut self,
        pos: Vec2i,
        button: MouseButton,
        pressed: bool,
        modifiers: Modifiers,
    ) -> bool {
        self.modifiers = modifiers;
        self.mouse_pos = pos;
        // A release that ends a drag capture is always delivered, even when
        // the pointer has wandered outside a modal window.
        let capture_release =
            !pressed && button == MouseButton::Left && self.drag_widget.is_some();
        if !capture_release && self.modal_blocks(pos) {
            trace!(target: targets::DISPATCH, "pointer button blocked by modal window");
            return false;
        }

        if pressed {
            self.buttons |= button.bit();
            let target = EventDispatcher::hit_test(&self.tree, self.root, pos);
            if button == MouseButton::Left {
                self.drag_widget = target;
                match target {
                    Some(t) if self.tree.widget(t).base().enabled() => self.update_focus(Some(t)),
                    Some(_) => {}
                    None => self.update_focus(None),
                }
            }
            let Some(target) = target else { return false };
            let mut ev = WidgetEvent::MousePress(MousePressEvent {
                base: EventBase::new(),
                button,
                pos,
                local: Vec2i::ZERO,
                modifiers,
            });
            self.bubble(target, &mut ev)
        } else {
            self.buttons &= !button.bit();
            let captured = if button == MouseButton::Left {
                self.drag_widget.take()
            } else {
                None
            };
            let mut ev = WidgetEvent::MouseRelease(MouseReleaseEvent {
                base: EventBase::new(),
                button,
                pos,
                local: Vec2i::ZERO,
                modifiers,
            });
            match captured {
                // The captured widget hears the release even if the pointer
                // has left it.
                Some(captured) => self.direct(captured, &mut ev),
                None => match EventDispatcher::hit_test(&self.tree, self.root, pos) {
                    Some(target) => self.bubble(target, &mut ev),
                    None => false,
                },
            }
        }
    }

    fn dispatch_move(&mut self, pos: Vec2i, modifiers: Modifiers) -> bool {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        self.modifiers = modifiers;

        if self.buttons & MouseButton::Left.bit() != 0 {
            if let Some(captured) = self.drag_widget {
                let mut ev = WidgetEvent::MouseDrag(MouseDragEvent {
                    base: EventBase::new(),
                    pos,
                    delta,
                    buttons: self.buttons,
                    modifiers,
                });
                return self.direct(captured, &mut ev);
            }
        }

        if self.modal_blocks(pos) {
            return false;
        }
        let target = EventDispatcher::hit_test(&self.tree, self.root, pos);
        self.update_hover(target, pos);
        let Some(target) = target else { return false };
        let mut ev = WidgetEvent::MouseMove(MouseMoveEvent {
            base: EventBase::new(),
            pos,
            local: Vec2i::ZERO,
            delta,
            buttons: self.buttons,
            modifiers,
        });
        self.bubble(target, &mut ev)
    }

    fn update_hover(&mut self, target: Option<WidgetId>, pos: Vec2i) {
        if target == self.hovered {
            return;
        }
        if let Some(old) = self.hovered {
            if self.tree.contains(old) {
                self.tree.widget_mut(old).base_mut().set_hovered(false);
                let mut ev = WidgetEvent::Leave(LeaveEvent {
                    base: EventBase::new(),
                });
                self.direct(old, &mut ev);
            }
        }
        if let Some(new) = target {
            self.tree.widget_mut(new).base_mut().set_hovered(true);
            let mut ev = WidgetEvent::Enter(EnterEvent {
                base: EventBase::new(),
                pos,
            });
            self.direct(new, &mut ev);
        }
        self.hovered = target;
    }

    fn dispatch_scroll(&mut self, pos: Vec2i, delta: trellis_core::Vec2f, modifiers: Modifiers) -> bool {
        self.modifiers = modifiers;
        if self.modal_blocks(pos) {
            return false;
        }
        let Some(target) = EventDispatcher::hit_test(&self.tree, self.root, pos) else {
            return false;
        };
        let mut ev = WidgetEvent::Wheel(WheelEvent {
            base: EventBase::new(),
            pos,
            local: Vec2i::ZERO,
            delta,
            modifiers,
        });
        self.bubble(target, &mut ev)
    }

    fn dispatch_key(&mut self, key: Key, pressed: bool, modifiers: Modifiers) -> bool {
        self.modifiers = modifiers;
        // Leaf first, root last.
        for target in self.focus_path.clone().into_iter().rev() {
            let mut ev = WidgetEvent::Key(KeyEvent {
                base: EventBase::new(),
                key,
                pressed,
                modifiers,
            });
            if self.direct(target, &mut ev) {
                return true;
            }
        }
        false
    }

    fn dispatch_char(&mut self, codepoint: char) -> bool {
        for target in self.focus_path.clone().into_iter().rev() {
            let mut ev = WidgetEvent::Char(CharEvent {
                base: EventBase::new(),
                codepoint,
            });
            if self.direct(target, &mut ev) {
                return true;
            }
        }
        false
    }

    /// Whether a front-most modal window swallows a pointer event at `pos`.
    fn modal_blocks(&self, pos: Vec2i) -> bool {
        let Some(&top) = self.focus_path.get(1) else {
            return false;
        };
        let Some(widget) = self.tree.get(top) else {
            return false;
        };
        let Some(window) = widget.as_window() else {
            return false;
        };
        if !window.modal() {
            return false;
        }
        let local = pos - self.tree.absolute_pos(top);
        !widget.base().contains(local)
    }

    fn bubble(&mut self, target: WidgetId, event: &mut WidgetEvent) -> bool {
        EventDispatcher::send_event(&mut self.tree, self.size, &mut self.requests, target, event)
    }

    fn direct(&mut self, target: WidgetId, event: &mut WidgetEvent) -> bool {
        EventDispatcher::send_event_direct(
            &mut self.tree,
            self.size,
            &mut self.requests,
            target,
            event,
        )
    }

    fn drain_requests(&mut self) {
        while !self.requests.is_empty() {
            for request in std::mem::take(&mut self.requests) {
                match request {
                    EventRequest::Focus(id) => self.update_focus(Some(id)),
                    EventRequest::TabActivated { header, index } => {
                        self.activate_tab_page(header, index)
                    }
                }
            }
        }
    }

    /// Routes a tab activation from a header to the page stack beside it.
    fn activate_tab_page(&mut self, header: WidgetId, index: usize) {
        let Some(parent) = self.tree.parent(header) else {
            return;
        };
        for sibling in self.tree.children(parent).to_vec() {
            if self.tree.widget(sibling).as_stacked().is_some() {
                if index < self.tree.child_count(sibling) {
                    crate::widgets::StackedWidget::select(&mut self.tree, sibling, index);
                }
                return;
            }
        }
    }

    // ========================================================================
    // Pointer feedback
    // ========================================================================

    /// Cursor shape for the current pointer position.
    pub fn cursor(&self) -> CursorKind {
        match self.hovered {
            Some(id) => EventDispatcher::effective_cursor(&self.tree, id),
            None => CursorKind::Arrow,
        }
    }

    /// Tooltip for the current pointer position, if any widget under it
    /// (or an ancestor) declares one.
    pub fn tooltip(&self) -> Option<String> {
        EventDispatcher::effective_tooltip(&self.tree, self.hovered?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::tests::MockWidget;

    fn press(pos: Vec2i) -> InputEvent {
        InputEvent::PointerButton {
            pos,
            button: MouseButton::Left,
            pressed: true,
            modifiers: Modifiers::NONE,
        }
    }

    fn release(pos: Vec2i) -> InputEvent {
        InputEvent::PointerButton {
            pos,
            button: MouseButton::Left,
            pressed: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn moved(pos: Vec2i) -> InputEvent {
        InputEvent::PointerMove {
            pos,
            modifiers: Modifiers::NONE,
        }
    }

    fn window_at(screen: &mut Screen, pos: Vec2i, size: Vec2i, title: &str) -> WidgetId {
        let mut window = Window::new(title);
        window.base_mut().set_pos(pos);
        window.base_mut().set_size(size);
        screen.add_window(window)
    }

    #[test]
    fn test_press_sets_focus_path_to_chain() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");
        let mut child = MockWidget::new();
        child.base_mut().set_pos(Vec2i::new(20, 50));
        child.base_mut().set_size(Vec2i::new(50, 50));
        let child = screen.tree_mut().insert(win, Box::new(child)).unwrap();

        screen.dispatch(press(Vec2i::new(130, 160)));
        assert_eq!(screen.focus_path(), &[screen.root(), win, child]);
        assert!(screen.tree().widget(child).base().focused());
    }

    #[test]
    fn test_press_on_empty_space_clears_focus() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");
        screen.dispatch(press(Vec2i::new(150, 150)));
        assert!(!screen.focus_path().is_empty());

        screen.dispatch(release(Vec2i::new(150, 150)));
        screen.dispatch(press(Vec2i::new(700, 500)));
        assert!(screen.focus_path().is_empty());
        assert!(!screen.tree().widget(win).base().focused());
    }

    #[test]
    fn test_repeated_layout_leaves_geometry_unchanged() {
        use crate::layout::{Alignment, BoxLayout, Orientation};
        use crate::widget::tests::FixedMeasure;

        let ctx = FixedMeasure::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");
        screen
            .tree_mut()
            .widget_mut(win)
            .base_mut()
            .set_layout(BoxLayout::new(Orientation::Vertical, Alignment::Fill).with_margin(5));
        let child = screen
            .tree_mut()
            .insert(win, Box::new(MockWidget::with_preferred(Vec2i::new(40, 20))))
            .unwrap();

        screen.perform_layout(&ctx);
        let snapshot = |screen: &Screen, id| {
            (
                screen.tree().widget(id).base().pos(),
                screen.tree().widget(id).base().size(),
            )
        };
        let before = (snapshot(&screen, win), snapshot(&screen, child));
        screen.perform_layout(&ctx);
        assert_eq!(before, (snapshot(&screen, win), snapshot(&screen, child)));
    }

    #[test]
    fn test_window_drag_through_screen() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");

        screen.dispatch(press(Vec2i::new(150, 110)));
        assert_eq!(screen.drag_target(), Some(win));
        screen.dispatch(moved(Vec2i::new(170, 130)));
        assert_eq!(
            screen.tree().widget(win).base().pos(),
            Vec2i::new(120, 120)
        );
        screen.dispatch(release(Vec2i::new(170, 130)));
        assert_eq!(screen.drag_target(), None);
    }

    #[test]
    fn test_modal_window_blocks_outside_presses() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let behind = window_at(&mut screen, Vec2i::new(20, 20), Vec2i::new(100, 100), "b");
        let mut modal = Window::new("m");
        modal.set_modal(true);
        modal.base_mut().set_pos(Vec2i::new(300, 300));
        modal.base_mut().set_size(Vec2i::new(150, 100));
        let modal = screen.add_window(modal);

        screen.dispatch(press(Vec2i::new(350, 330)));
        assert_eq!(screen.focus_path(), &[screen.root(), modal]);

        // Press over the background window is swallowed.
        screen.dispatch(release(Vec2i::new(350, 330)));
        let consumed = screen.dispatch(press(Vec2i::new(50, 50)));
        assert!(!consumed);
        assert_eq!(screen.focus_path(), &[screen.root(), modal]);
        assert!(!screen.tree().widget(behind).base().focused());
    }

    #[test]
    fn test_focus_click_raises_window() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let first = window_at(&mut screen, Vec2i::new(50, 50), Vec2i::new(100, 100), "a");
        let second = window_at(&mut screen, Vec2i::new(200, 50), Vec2i::new(100, 100), "b");
        assert_eq!(screen.tree().children(screen.root()), &[first, second]);

        screen.dispatch(press(Vec2i::new(80, 80)));
        assert_eq!(screen.tree().children(screen.root()), &[second, first]);
    }

    #[test]
    fn test_popups_stay_above_their_owner() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win_a = window_at(&mut screen, Vec2i::new(50, 50), Vec2i::new(100, 100), "a");
        let win_b = window_at(&mut screen, Vec2i::new(200, 50), Vec2i::new(100, 100), "b");
        let mut popup = Popup::new(win_a);
        popup.base_mut().set_size(Vec2i::new(60, 40));
        let popup = screen.add_popup(popup).unwrap();
        assert_eq!(screen.tree().children(screen.root()), &[win_a, win_b, popup]);

        // Raising the owner re-hoists the popup above it.
        screen.move_window_to_front(win_a);
        assert_eq!(screen.tree().children(screen.root()), &[win_b, win_a, popup]);
    }

    #[test]
    fn test_add_popup_rejects_non_window_owner() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::ZERO, Vec2i::new(100, 100), "w");
        let plain = screen
            .tree_mut()
            .insert(win, Box::new(MockWidget::new()))
            .unwrap();
        assert!(matches!(
            screen.add_popup(Popup::new(plain)),
            Err(TreeError::NotAWindow(_))
        ));
    }

    #[test]
    fn test_remove_widget_clears_routing_state() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");
        screen.dispatch(press(Vec2i::new(150, 110)));
        assert_eq!(screen.drag_target(), Some(win));
        assert!(screen.focus_path().contains(&win));

        screen.remove_widget(win);
        assert_eq!(screen.drag_target(), None);
        assert!(!screen.focus_path().contains(&win));
    }

    #[test]
    fn test_hover_enter_leave() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");

        screen.dispatch(moved(Vec2i::new(150, 150)));
        assert_eq!(screen.hovered(), Some(win));
        assert!(screen.tree().widget(win).base().hovered());

        screen.dispatch(moved(Vec2i::new(700, 500)));
        assert_eq!(screen.hovered(), None);
        assert!(!screen.tree().widget(win).base().hovered());
    }

    #[test]
    fn test_cursor_follows_hovered_widget() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let win = window_at(&mut screen, Vec2i::new(100, 100), Vec2i::new(200, 150), "w");
        screen
            .tree_mut()
            .widget_mut(win)
            .base_mut()
            .set_cursor(CursorKind::Move);

        assert_eq!(screen.cursor(), CursorKind::Arrow);
        screen.dispatch(moved(Vec2i::new(150, 150)));
        assert_eq!(screen.cursor(), CursorKind::Move);
    }
}
