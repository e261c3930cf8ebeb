//! Static text.

use std::any::Any;

use trellis_core::Vec2i;

use crate::widget::{RenderContext, Widget, WidgetBase};
use crate::widgets::DEFAULT_FONT_SIZE;

/// A passive text widget. Its preferred size is the measured extent of its
/// text; an empty label collapses to zero. Marking a label as a heading
/// makes [`GroupLayout`](crate::layout::GroupLayout) start a new indented
/// group at it.
pub struct Label {
    base: WidgetBase,
    text: String,
    heading: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            heading: false,
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        let mut label = Self::new(text);
        label.heading = true;
        label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font_size(&self) -> f32 {
        self.base.font_size().unwrap_or(DEFAULT_FONT_SIZE)
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind_name(&self) -> &'static str {
        "label"
    }

    fn intrinsic_size(&self, ctx: &dyn RenderContext) -> Option<Vec2i> {
        if self.text.is_empty() {
            return Some(Vec2i::ZERO);
        }
        Some(ctx.text_size(&self.text, self.font_size()))
    }

    fn is_section_heading(&self) -> bool {
        self.heading
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
    use crate::widget::tests::FixedMeasure;

    #[test]
    fn test_label_measures_its_text() {
        let ctx = FixedMeasure::new(8, 16);
        let label = Label::new("abcd");
        assert_eq!(label.intrinsic_size(&ctx), Some(Vec2i::new(32, 16)));
    }

    #[test]
    fn test_empty_label_is_zero_sized() {
        let ctx = FixedMeasure::default();
        let label = Label::new("");
        assert_eq!(label.intrinsic_size(&ctx), Some(Vec2i::ZERO));
    }

    #[test]
    fn test_heading_flag() {
        assert!(Label::heading("Section").is_section_heading());
        assert!(!Label::new("plain").is_section_heading());
    }
}
