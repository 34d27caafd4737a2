//! Square checkbox toggled by touch.

use alloc::boxed::Box;

use embedded_graphics::pixelcolor::Rgb565;

use crate::display::DisplayInterface;
use crate::ui::theme;
use crate::ui::widget::WidgetCore;

pub struct CheckBox {
    pub core: WidgetCore,
    checked: bool,
    box_color: Rgb565,
    tick_color: Rgb565,
    on_changed: Option<Box<dyn FnMut(bool)>>,
}

impl CheckBox {
    pub fn new(size: i32) -> Self {
        Self {
            core: WidgetCore::new(0, 0, size, size),
            checked: false,
            box_color: theme::COLOR_SURFACE,
            tick_color: theme::COLOR_ACCENT,
            on_changed: None,
        }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        if checked != self.checked {
            self.checked = checked;
            self.core.mark_dirty();
        }
    }

    pub fn set_colors(&mut self, box_color: Rgb565, tick_color: Rgb565) {
        self.box_color = box_color;
        self.tick_color = tick_color;
        self.core.mark_dirty();
    }

    pub fn set_on_changed(&mut self, callback: Box<dyn FnMut(bool)>) {
        self.on_changed = Some(callback);
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);

        display.fill_rect(x, y, w, h, self.box_color);

        display.fill_rect(x, y, w, 1, self.tick_color);
        display.fill_rect(x, y + h - 1, w, 1, self.tick_color);
        display.fill_rect(x, y, 1, h, self.tick_color);
        display.fill_rect(x + w - 1, y, 1, h, self.tick_color);

        if self.checked {
            let inset = w / 4;
            display.fill_rect(
                x + inset,
                y + inset,
                w - 2 * inset,
                h - 2 * inset,
                self.tick_color,
            );
        }

        self.core.mark_clean();
    }

    pub(crate) fn handle_touch(&mut self, px: i32, py: i32, pressed: bool) -> bool {
        if !self.core.visible() || !pressed {
            return false;
        }
        if self.core.contains(px, py) {
            self.checked = !self.checked;
            self.core.mark_dirty();
            if let Some(callback) = &mut self.on_changed {
                callback(self.checked);
            }
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use embedded_graphics::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn checkbox_at(x: i32, y: i32, size: i32) -> CheckBox {
        let mut checkbox = CheckBox::new(size);
        checkbox.core.set_position(x, y);
        checkbox
    }

    #[test]
    fn press_inside_toggles_and_notifies() {
        let seen = Rc::new(Cell::new(None));
        let hook = Rc::clone(&seen);
        let mut checkbox = checkbox_at(10, 10, 20);
        checkbox.set_on_changed(Box::new(move |checked| hook.set(Some(checked))));

        assert!(checkbox.handle_touch(15, 15, true));
        assert!(checkbox.checked());
        assert_eq!(seen.get(), Some(true));

        assert!(checkbox.handle_touch(15, 15, true));
        assert!(!checkbox.checked());
        assert_eq!(seen.get(), Some(false));
    }

    #[test]
    fn release_and_outside_presses_do_nothing() {
        let mut checkbox = checkbox_at(0, 0, 20);
        assert!(!checkbox.handle_touch(5, 5, false));
        assert!(!checkbox.handle_touch(50, 50, true));
        assert!(!checkbox.checked());
    }

    #[test]
    fn draws_tick_only_when_checked() {
        let mut display = DirectDisplay::new(RecordingPanel::new(64, 64));
        let mut checkbox = checkbox_at(0, 0, 20);
        checkbox.set_colors(Rgb565::BLACK, Rgb565::GREEN);
        checkbox.draw(&mut display);
        assert_eq!(display.panel().pixel(10, 10), Some(Rgb565::BLACK));

        checkbox.set_checked(true);
        checkbox.draw(&mut display);
        // Inset tick (w / 4 from each edge) covers the box center.
        assert_eq!(display.panel().pixel(10, 10), Some(Rgb565::GREEN));
        assert_eq!(display.panel().pixel(2, 10), Some(Rgb565::BLACK));
    }
}
