//! Test doubles shared across the crate, plus cross-module scenarios that
//! exercise the screen, tree, layout, and dispatch together.

use std::any::Any;
use std::sync::{Arc, Mutex};

use trellis_core::Vec2i;

use crate::widget::base::WidgetBase;
use crate::widget::dispatcher::EventCx;
use crate::widget::events::WidgetEvent;
use crate::widget::traits::{RenderContext, Widget};

/// Shared event journal: (widget name, event name) in delivery order.
pub(crate) type SharedLog = Arc<Mutex<Vec<(String, String)>>>;

/// Installs a log subscriber honoring `RUST_LOG`, defaulting to full trace
/// output for the crate's targets. First caller wins; later installs are
/// no-ops, so any test may call this.
pub(crate) fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=trace"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Render context with fixed glyph metrics.
pub(crate) struct FixedMeasure {
    pub char_width: i32,
    pub line_height: i32,
}

impl FixedMeasure {
    pub fn new(char_width: i32, line_height: i32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for FixedMeasure {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl RenderContext for FixedMeasure {
    fn text_size(&self, text: &str, _font_size: f32) -> Vec2i {
        Vec2i::new(
            text.chars().count() as i32 * self.char_width,
            self.line_height,
        )
    }
}

/// Configurable stand-in widget.
#[derive(Default)]
pub(crate) struct MockWidget {
    base: WidgetBase,
    pub preferred: Option<Vec2i>,
    pub consume_mouse: bool,
    pub consume_keys: bool,
    pub section_heading: bool,
    pub last_local: Option<Vec2i>,
    pub log: Option<(String, SharedLog)>,
}

impl MockWidget {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            ..Default::default()
        }
    }

    pub fn with_preferred(size: Vec2i) -> Self {
        let mut w = Self::new();
        w.preferred = Some(size);
        w
    }

    /// A mock that records every event it receives into `log` under `name`.
    pub fn logged(name: impl Into<String>, log: &SharedLog) -> Self {
        let mut w = Self::new();
        w.log = Some((name.into(), Arc::clone(log)));
        w
    }
}

impl Widget for MockWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "mock"
    }

    fn intrinsic_size(&self, _ctx: &dyn RenderContext) -> Option<Vec2i> {
        self.preferred
    }

    fn is_section_heading(&self) -> bool {
        self.section_heading
    }

    fn event(&mut self, _cx: &mut EventCx<'_>, event: &mut WidgetEvent) -> bool {
        if let Some((name, log)) = &self.log {
            log.lock()
                .unwrap()
                .push((name.clone(), event.name().to_owned()));
        }
        match event {
            WidgetEvent::MousePress(e) => {
                self.last_local = Some(e.local);
                self.consume_mouse
            }
            WidgetEvent::MouseRelease(_) => self.consume_mouse,
            WidgetEvent::Key(_) | WidgetEvent::Char(_) => self.consume_keys,
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ============================================================================
// Cross-module scenarios
// ============================================================================

mod scenarios {
    use super::*;
    use trellis_core::WidgetId;

    use crate::screen::Screen;
    use crate::widget::events::{InputEvent, Key, Modifiers, MouseButton};
    use crate::widgets::{Popup, StackedWidget, TabHeader, TabWidget, Window};

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

    /// root -> a -> b -> leaf, each sized so the leaf is hittable.
    fn logged_chain(screen: &mut Screen, log: &SharedLog) -> (WidgetId, WidgetId, WidgetId) {
        let mut a = MockWidget::logged("a", log);
        a.base_mut().set_pos(Vec2i::new(10, 10));
        a.base_mut().set_size(Vec2i::new(300, 300));
        let root = screen.root();
        let a = screen.tree_mut().insert(root, Box::new(a)).unwrap();

        let mut b = MockWidget::logged("b", log);
        b.base_mut().set_pos(Vec2i::new(10, 10));
        b.base_mut().set_size(Vec2i::new(200, 200));
        let b = screen.tree_mut().insert(a, Box::new(b)).unwrap();

        let mut leaf = MockWidget::logged("leaf", log);
        leaf.base_mut().set_pos(Vec2i::new(10, 10));
        leaf.base_mut().set_size(Vec2i::new(100, 100));
        let leaf = screen.tree_mut().insert(b, Box::new(leaf)).unwrap();
        (a, b, leaf)
    }

    fn events_of(log: &SharedLog, kind: &str) -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|(_, ev)| ev == kind)
            .map(|(name, _)| name.clone())
            .collect()
    }

    #[test]
    fn test_click_focuses_whole_chain_once() {
        init_logging();
        let log: SharedLog = Default::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let (a, b, leaf) = logged_chain(&mut screen, &log);

        screen.dispatch(press(Vec2i::new(50, 50)));
        assert_eq!(screen.focus_path(), &[screen.root(), a, b, leaf]);
        // Every widget on the chain saw exactly one focus-in, parents first.
        assert_eq!(events_of(&log, "focus-in"), ["a", "b", "leaf"]);

        // Clicking the same chain again fires no further focus events.
        screen.dispatch(release(Vec2i::new(50, 50)));
        screen.dispatch(press(Vec2i::new(50, 50)));
        assert_eq!(events_of(&log, "focus-in"), ["a", "b", "leaf"]);
    }

    #[test]
    fn test_empty_click_unfocuses_in_reverse_order() {
        let log: SharedLog = Default::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        logged_chain(&mut screen, &log);

        screen.dispatch(press(Vec2i::new(50, 50)));
        screen.dispatch(release(Vec2i::new(50, 50)));
        screen.dispatch(press(Vec2i::new(700, 500)));

        assert!(screen.focus_path().is_empty());
        assert_eq!(events_of(&log, "focus-out"), ["leaf", "b", "a"]);
    }

    #[test]
    fn test_key_events_walk_focus_path_leaf_first() {
        let log: SharedLog = Default::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let (a, _b, _leaf) = logged_chain(&mut screen, &log);
        screen
            .tree_mut()
            .downcast_mut::<MockWidget>(a)
            .unwrap()
            .consume_keys = true;

        screen.dispatch(press(Vec2i::new(50, 50)));
        log.lock().unwrap().clear();

        let consumed = screen.dispatch(InputEvent::Key {
            key: Key::Enter,
            pressed: true,
            modifiers: Modifiers::NONE,
        });
        assert!(consumed);
        assert_eq!(events_of(&log, "key"), ["leaf", "b", "a"]);
    }

    #[test]
    fn test_key_without_focus_goes_nowhere() {
        let log: SharedLog = Default::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        logged_chain(&mut screen, &log);
        let consumed = screen.dispatch(InputEvent::Key {
            key: Key::Escape,
            pressed: true,
            modifiers: Modifiers::NONE,
        });
        assert!(!consumed);
        assert!(events_of(&log, "key").is_empty());
    }

    #[test]
    fn test_tab_click_switches_page_end_to_end() {
        let ctx = FixedMeasure::new(10, 16);
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let mut window = Window::new("tabs");
        window.base_mut().set_layout(
            crate::layout::BoxLayout::new(
                crate::layout::Orientation::Vertical,
                crate::layout::Alignment::Fill,
            ),
        );
        let window = screen.add_window(window);
        let parts = TabWidget::build(screen.tree_mut(), window).unwrap();
        for label in ["a", "b", "c"] {
            TabWidget::add_tab(
                screen.tree_mut(),
                parts.widget,
                label,
                Box::new(MockWidget::with_preferred(Vec2i::new(50, 40))),
            )
            .unwrap();
        }
        screen.perform_layout(&ctx);

        // Header sits below the 30px title band; tab 1 spans local x
        // [50, 80) past the 20px arrow band, each tab being 30 wide.
        let header_pos = screen.tree().absolute_pos(parts.header);
        let click = header_pos + Vec2i::new(65, 5);
        assert!(screen.dispatch(press(click)));

        let header = screen.tree().downcast_ref::<TabHeader>(parts.header).unwrap();
        assert_eq!(header.active_tab(), 1);
        let stack = screen
            .tree()
            .downcast_ref::<StackedWidget>(parts.content)
            .unwrap();
        assert_eq!(stack.selected_index(), 1);
        let pages = screen.tree().children(parts.content).to_vec();
        assert!(!screen.tree().widget(pages[0]).base().visible());
        assert!(screen.tree().widget(pages[1]).base().visible());
    }

    #[test]
    fn test_screen_layout_sizes_window_to_preferred() {
        let ctx = FixedMeasure::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let mut window = Window::new("w");
        window.base_mut().set_layout(
            crate::layout::BoxLayout::new(
                crate::layout::Orientation::Vertical,
                crate::layout::Alignment::Minimum,
            )
            .with_margin(5),
        );
        let window = screen.add_window(window);
        let child = screen
            .tree_mut()
            .insert(window, Box::new(MockWidget::with_preferred(Vec2i::new(60, 40))))
            .unwrap();

        screen.perform_layout(&ctx);
        // Content plus margins, plus the 30px title band.
        assert_eq!(
            screen.tree().widget(window).base().size(),
            Vec2i::new(70, 80)
        );
        // The child starts below the title band.
        assert_eq!(screen.tree().widget(child).base().pos(), Vec2i::new(5, 35));
    }

    #[test]
    fn test_popup_follows_dragged_owner() {
        init_logging();
        let ctx = FixedMeasure::default();
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let mut window = Window::new("owner");
        window.base_mut().set_pos(Vec2i::new(100, 100));
        window.base_mut().set_size(Vec2i::new(200, 150));
        let window = screen.add_window(window);

        let mut popup = Popup::new(window);
        popup.set_anchor_pos(Vec2i::new(50, 20));
        popup.set_anchor_height(10);
        popup.base_mut().set_size(Vec2i::new(80, 60));
        let popup_id = screen.add_popup(popup).unwrap();

        screen.perform_layout(&ctx);
        assert_eq!(
            screen.tree().widget(popup_id).base().pos(),
            Vec2i::new(150, 110)
        );

        screen.dispatch(press(Vec2i::new(110, 105)));
        screen.dispatch(moved(Vec2i::new(140, 105)));
        screen.dispatch(release(Vec2i::new(140, 105)));
        screen.perform_layout(&ctx);
        assert_eq!(
            screen.tree().widget(popup_id).base().pos(),
            Vec2i::new(180, 110)
        );
    }

    #[test]
    fn test_hidden_owner_makes_popup_unhittable() {
        let mut screen = Screen::new(Vec2i::new(800, 600));
        let mut window = Window::new("owner");
        window.base_mut().set_pos(Vec2i::new(100, 100));
        window.base_mut().set_size(Vec2i::new(200, 150));
        let window = screen.add_window(window);

        let mut popup = Popup::new(window);
        popup.base_mut().set_pos(Vec2i::new(400, 100));
        popup.base_mut().set_size(Vec2i::new(80, 60));
        let popup = screen.add_popup(popup).unwrap();

        screen.dispatch(moved(Vec2i::new(420, 120)));
        assert_eq!(screen.hovered(), Some(popup));

        screen.tree_mut().widget_mut(window).base_mut().hide();
        screen.dispatch(moved(Vec2i::new(421, 120)));
        assert_eq!(screen.hovered(), None);
    }
}
