//! Horizontal separator line.

use embedded_graphics::pixelcolor::Rgb565;
use log::warn;

use crate::display::DisplayInterface;
use crate::ui::widget::WidgetCore;

/// Full-width rule of a given thickness; typically added with `Fill`
/// gravity so the layout stretches it across the row.
pub struct HorizontalLine {
    pub core: WidgetCore,
    color: Rgb565,
}

impl HorizontalLine {
    pub fn new(color: Rgb565, thickness: i32) -> Self {
        Self {
            core: WidgetCore::new(0, 0, 0, thickness.max(1)),
            color,
        }
    }

    pub fn set_color(&mut self, color: Rgb565) {
        if color != self.color {
            self.color = color;
            self.core.mark_dirty();
        }
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);
        if w > 0 && h > 0 {
            display.fill_rect(x, y, w, h, self.color);
        } else {
            warn!("separator skipped, non-positive size {w}x{h}");
        }
        self.core.mark_clean();
    }
}
