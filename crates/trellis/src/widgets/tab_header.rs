//! Scrollable row of tab buttons.

use std::any::Any;

use tracing::trace;

use trellis_core::logging::targets;
use trellis_core::Vec2i;

use crate::widget::events::{MouseButton, WidgetEvent};
use crate::widget::{EventCx, EventRequest, RenderContext, Widget, WidgetBase};
use crate::widgets::DEFAULT_FONT_SIZE;

/// Horizontal padding inside each tab button.
const TAB_PADDING_H: i32 = 10;
/// Vertical padding inside each tab button.
const TAB_PADDING_V: i32 = 4;

#[derive(Debug, Clone)]
struct TabButton {
    label: String,
    /// Measured extent, cached at layout time so click resolution needs no
    /// render context.
    size: Vec2i,
}

/// A row of clickable tab buttons flanked by two scroll arrows.
///
/// When the tabs overflow the header width, only a contiguous window of
/// them is shown; the arrows (and clicks past the last visible tab) shift
/// that window one tab at a time. Activating a tab emits
/// [`EventRequest::TabActivated`], which a surrounding
/// [`TabWidget`](crate::widgets::TabWidget) turns into a page switch.
pub struct TabHeader {
    base: WidgetBase,
    tabs: Vec<TabButton>,
    active: usize,
    visible_start: usize,
    visible_end: usize,
}

impl TabHeader {
    /// Width of each scroll-arrow band at the header's edges.
    pub const SCROLL_ARROW_WIDTH: i32 = 20;

    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            tabs: Vec::new(),
            active: 0,
            visible_start: 0,
            visible_end: 0,
        }
    }

    pub fn font_size(&self) -> f32 {
        self.base.font_size().unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn tab_label(&self, index: usize) -> &str {
        &self.tabs[index].label
    }

    /// Index of the active tab. Only meaningful once a tab exists.
    pub fn active_tab(&self) -> usize {
        self.active
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_active_tab(&mut self, index: usize) {
        assert!(
            index < self.tabs.len(),
            "tab index {index} out of range for {} tabs",
            self.tabs.len()
        );
        self.active = index;
    }

    /// Appends a tab and returns its index. The first tab becomes active.
    pub fn add_tab(&mut self, label: impl Into<String>) -> usize {
        self.tabs.push(TabButton {
            label: label.into(),
            size: Vec2i::ZERO,
        });
        self.tabs.len() - 1
    }

    /// Removes the tab at `index`, keeping the active tab stable where
    /// possible.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_tab(&mut self, index: usize) {
        assert!(
            index < self.tabs.len(),
            "tab index {index} out of range for {} tabs",
            self.tabs.len()
        );
        self.tabs.remove(index);
        if self.active > index || (self.active == index && self.active == self.tabs.len()) {
            self.active = self.active.saturating_sub(1);
        }
        self.visible_start = self.visible_start.min(self.tabs.len().saturating_sub(1));
        self.recompute_visible_end();
    }

    /// Currently shown tab range as a half-open `[start, end)` interval.
    pub fn visible_range(&self) -> (usize, usize) {
        (self.visible_start, self.visible_end)
    }

    /// Pixel budget available to tab buttons between the two arrows.
    fn budget(&self) -> i32 {
        (self.base.size().x - 2 * Self::SCROLL_ARROW_WIDTH).max(0)
    }

    /// Scrolls the visible window the minimal amount that brings `index`
    /// into it. Tabs that were never measured keep the window at the start.
    pub fn ensure_tab_visible(&mut self, index: usize) {
        assert!(
            index < self.tabs.len(),
            "tab index {index} out of range for {} tabs",
            self.tabs.len()
        );
        if index < self.visible_start {
            self.visible_start = index;
        } else if index >= self.visible_end {
            // Walk backwards from `index` until the budget is spent; the
            // window then ends just past `index`.
            let budget = self.budget();
            let mut start = index;
            let mut used = self.tabs[index].size.x;
            while start > 0 && used + self.tabs[start - 1].size.x <= budget {
                start -= 1;
                used += self.tabs[start].size.x;
            }
            self.visible_start = start;
        }
        self.recompute_visible_end();
        trace!(
            target: targets::DISPATCH,
            index,
            start = self.visible_start,
            end = self.visible_end,
            "ensure tab visible"
        );
    }

    /// Greedily refits `visible_end` to the budget from `visible_start`.
    /// At least one tab stays visible so the header cannot lock up.
    fn recompute_visible_end(&mut self) {
        let budget = self.budget();
        let mut end = self.visible_start;
        let mut used = 0;
        while end < self.tabs.len() {
            used += self.tabs[end].size.x;
            if used > budget && end > self.visible_start {
                break;
            }
            end += 1;
        }
        self.visible_end = end;
    }

    fn scroll_back(&mut self) {
        if self.visible_start > 0 {
            self.visible_start -= 1;
            self.recompute_visible_end();
        }
    }

    fn scroll_forward(&mut self) {
        if self.visible_end < self.tabs.len() {
            self.visible_start += 1;
            self.recompute_visible_end();
        }
    }

    fn measure_tab(ctx: &dyn RenderContext, label: &str, font_size: f32) -> Vec2i {
        ctx.text_size(label, font_size) + Vec2i::new(2 * TAB_PADDING_H, 2 * TAB_PADDING_V)
    }

    /// Resolves a press at local `x` to a tab or an arrow.
    fn handle_press(&mut self, x: i32, cx: &mut EventCx<'_>) {
        let width = self.base.size().x;
        if x < Self::SCROLL_ARROW_WIDTH {
            self.scroll_back();
            return;
        }
        if x >= width - Self::SCROLL_ARROW_WIDTH {
            self.scroll_forward();
            return;
        }
        let mut edge = Self::SCROLL_ARROW_WIDTH;
        for index in self.visible_start..self.visible_end {
            edge += self.tabs[index].size.x;
            if x < edge {
                self.active = index;
                cx.push(EventRequest::TabActivated {
                    header: cx.widget,
                    index,
                });
                return;
            }
        }
        // Past the last visible tab.
        self.scroll_forward();
    }
}

impl Default for TabHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TabHeader {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "tab-header"
    }

    fn intrinsic_size(&self, ctx: &dyn RenderContext) -> Option<Vec2i> {
        let font_size = self.font_size();
        let mut width = 2 * Self::SCROLL_ARROW_WIDTH;
        let mut height = ctx.text_size("", font_size).y + 2 * TAB_PADDING_V;
        for tab in &self.tabs {
            let size = Self::measure_tab(ctx, &tab.label, font_size);
            width += size.x;
            height = height.max(size.y);
        }
        Some(Vec2i::new(width, height))
    }

    fn prepare_layout(&mut self, ctx: &dyn RenderContext, _self_size: Vec2i) {
        let font_size = self.font_size();
        for tab in &mut self.tabs {
            tab.size = Self::measure_tab(ctx, &tab.label, font_size);
        }
        self.recompute_visible_end();
    }

    fn event(&mut self, cx: &mut EventCx<'_>, event: &mut WidgetEvent) -> bool {
        match event {
            WidgetEvent::MousePress(e) if e.button == MouseButton::Left => {
                if self.tabs.is_empty() {
                    return false;
                }
                self.handle_press(e.local.x, cx);
                true
            }
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
