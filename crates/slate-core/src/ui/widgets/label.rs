//! Single-line text label.

use embedded_graphics::pixelcolor::Rgb565;
use log::trace;

use crate::display::DisplayInterface;
use crate::ui::theme;
use crate::ui::widget::{WidgetCore, measure_text_height, measure_text_width};
use crate::ui::widgets::{WidgetText, clip_text};

/// Text at a position. Intrinsic size tracks the current text, so a label
/// that grows re-triggers its container's layout; one that merely changes
/// content repaints in place.
pub struct Label {
    pub core: WidgetCore,
    text: WidgetText,
    color: Rgb565,
    bg_color: Rgb565,
    text_size: u8,
    /// Area painted by the previous draw, cleared before redrawing so a
    /// shorter text does not leave stale glyphs behind.
    prev_area: Option<(i32, i32, i32, i32)>,
}

impl Label {
    pub fn new(text: &str, color: Rgb565, text_size: u8) -> Self {
        Self {
            core: WidgetCore::new(0, 0, 0, 0),
            text: clip_text(text),
            color,
            bg_color: theme::COLOR_BACKGROUND,
            text_size,
            prev_area: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. A changed rendered size marks layout stale so the
    /// owning container redistributes; an in-place change only repaints.
    pub fn set_text(&mut self, text: &str) {
        let new = clip_text(text);
        if new == self.text {
            return;
        }
        let size_changed = new.chars().count() != self.text.chars().count();
        trace!("label text -> '{new}' (size_changed={size_changed})");
        self.text = new;
        self.core.mark_dirty();
        if size_changed {
            self.core.mark_layout_dirty();
        }
    }

    pub fn set_color(&mut self, color: Rgb565) {
        if color != self.color {
            self.color = color;
            self.core.mark_dirty();
        }
    }

    pub fn set_background(&mut self, bg: Rgb565) {
        if bg != self.bg_color {
            self.bg_color = bg;
            self.core.mark_dirty();
        }
    }

    pub fn set_text_size(&mut self, text_size: u8) {
        if text_size != self.text_size {
            self.text_size = text_size;
            self.core.mark_dirty();
            self.core.mark_layout_dirty();
        }
    }

    pub(crate) fn intrinsic_width(&self, display: &mut dyn DisplayInterface) -> i32 {
        measure_text_width(display, &self.text, self.text_size)
    }

    pub(crate) fn intrinsic_height(&self, display: &mut dyn DisplayInterface) -> i32 {
        measure_text_height(display, self.text_size)
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        if let Some((px, py, pw, ph)) = self.prev_area {
            display.fill_rect(px, py, pw, ph, self.bg_color);
        }
        display.set_text_size(self.text_size);
        display.draw_string(&self.text, self.core.x, self.core.y, self.color, self.bg_color);

        let w = display.text_width(&self.text);
        let h = display.font_height();
        self.prev_area = Some((self.core.x, self.core.y, w, h));
        self.core.mark_clean();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use embedded_graphics::prelude::*;

    fn display() -> DirectDisplay<RecordingPanel> {
        DirectDisplay::new(RecordingPanel::new(320, 240))
    }

    #[test]
    fn same_length_text_repaints_without_relayout() {
        let mut label = Label::new("12.5", Rgb565::WHITE, 1);
        label.core.mark_clean();
        label.core.layout_dirty = false;

        label.set_text("13.1");
        assert!(label.core.dirty());
        assert!(!label.core.layout_dirty());
    }

    #[test]
    fn changed_length_marks_layout_stale() {
        let mut label = Label::new("9", Rgb565::WHITE, 1);
        label.core.layout_dirty = false;
        label.set_text("10");
        assert!(label.core.layout_dirty());
    }

    #[test]
    fn unchanged_text_is_a_no_op() {
        let mut label = Label::new("idle", Rgb565::WHITE, 1);
        label.core.mark_clean();
        label.set_text("idle");
        assert!(!label.core.dirty());
    }

    #[test]
    fn redraw_clears_the_previously_painted_area() {
        let mut display = display();
        let mut label = Label::new("hello", Rgb565::WHITE, 1);
        label.set_background(Rgb565::BLACK);
        label.core.set_position(10, 10);

        label.draw(&mut display);
        assert_eq!(display.panel().texts.len(), 1);
        assert_eq!(display.panel().texts[0].text, "hello");

        label.set_text("hi");
        label.draw(&mut display);
        // "hello" at scale 1 covered 30x8 from the label origin.
        assert!(
            display
                .panel()
                .fill_rects
                .contains(&(10, 10, 30, 8, Rgb565::BLACK))
        );
        assert_eq!(display.panel().texts.last().unwrap().text, "hi");
    }

    #[test]
    fn intrinsic_size_tracks_text_and_scale() {
        let mut display = display();
        let label = Label::new("abc", Rgb565::WHITE, 2);
        assert_eq!(label.intrinsic_width(&mut display), 3 * 6 * 2);
        assert_eq!(label.intrinsic_height(&mut display), 8 * 2);
    }
}
