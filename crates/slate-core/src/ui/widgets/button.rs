//! Push button with a centered caption and click callback.

use alloc::boxed::Box;

use embedded_graphics::pixelcolor::Rgb565;
use log::trace;

use crate::display::{DisplayInterface, FALLBACK_CHAR_WIDTH, FALLBACK_LINE_HEIGHT};
use crate::ui::theme;
use crate::ui::widget::{WidgetCore, measure_text_height, measure_text_width};
use crate::ui::widgets::{WidgetText, clip_text};
use crate::ui::{BUTTON_PADDING_HORIZONTAL, BUTTON_PADDING_VERTICAL};

/// A click fires on release inside the bounds after a press inside the
/// bounds; dragging off before releasing cancels it.
pub struct Button {
    pub core: WidgetCore,
    text: WidgetText,
    text_size: u8,
    bg_color: Rgb565,
    border_color: Rgb565,
    text_color: Rgb565,
    pressed: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(text: &str, text_size: u8) -> Self {
        // Seed geometry from fallback metrics so the first layout pass has
        // something to work with before real metrics are consulted.
        let size = text_size.max(1) as i32;
        let w = text.chars().count() as i32 * FALLBACK_CHAR_WIDTH * size + BUTTON_PADDING_HORIZONTAL;
        let h = FALLBACK_LINE_HEIGHT * size + BUTTON_PADDING_VERTICAL;
        Self {
            core: WidgetCore::new(0, 0, w, h),
            text: clip_text(text),
            text_size,
            bg_color: theme::COLOR_SURFACE,
            border_color: theme::COLOR_STROKE,
            text_color: theme::WHITE,
            pressed: false,
            on_click: None,
        }
    }

    pub fn set_colors(&mut self, bg: Rgb565, border: Rgb565, text: Rgb565) {
        self.bg_color = bg;
        self.border_color = border;
        self.text_color = text;
        self.core.mark_dirty();
    }

    pub fn set_on_click(&mut self, callback: Box<dyn FnMut()>) {
        self.on_click = Some(callback);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        let new = clip_text(text);
        if new == self.text {
            return;
        }
        let size_changed = new.chars().count() != self.text.chars().count();
        self.text = new;
        self.core.mark_dirty();
        if size_changed {
            self.core.mark_layout_dirty();
        }
    }

    pub(crate) fn intrinsic_width(&self, display: &mut dyn DisplayInterface) -> i32 {
        measure_text_width(display, &self.text, self.text_size) + BUTTON_PADDING_HORIZONTAL
    }

    pub(crate) fn intrinsic_height(&self, display: &mut dyn DisplayInterface) -> i32 {
        measure_text_height(display, self.text_size) + BUTTON_PADDING_VERTICAL
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);

        display.fill_rect(x, y, w, h, self.bg_color);

        // 1-pixel border
        display.fill_rect(x, y, w, 1, self.border_color);
        display.fill_rect(x, y + h - 1, w, 1, self.border_color);
        display.fill_rect(x, y, 1, h, self.border_color);
        display.fill_rect(x + w - 1, y, 1, h, self.border_color);

        display.set_text_size(self.text_size);
        let text_w = display.text_width(&self.text);
        let text_h = display.font_height();
        let tx = x + (w - text_w) / 2;
        let ty = y + (h - text_h) / 2;
        display.draw_string(&self.text, tx, ty, self.text_color, self.bg_color);

        self.core.mark_clean();
    }

    pub(crate) fn handle_touch(&mut self, px: i32, py: i32, pressed: bool) -> bool {
        if !self.core.visible() {
            return false;
        }
        let inside = self.core.contains(px, py);
        if pressed && inside && !self.pressed {
            self.pressed = true;
            false
        } else if !pressed && self.pressed {
            self.pressed = false;
            if inside {
                trace!("button '{}' clicked", self.text);
                if let Some(callback) = &mut self.on_click {
                    callback();
                }
                true
            } else {
                false
            }
        } else {
            false
        }
    }
}
