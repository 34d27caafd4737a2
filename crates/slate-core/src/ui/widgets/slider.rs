//! Horizontal slider with a square knob.

use alloc::boxed::Box;

use embedded_graphics::pixelcolor::Rgb565;

use crate::display::DisplayInterface;
use crate::ui::theme;
use crate::ui::widget::WidgetCore;

/// Value in `[0, 1]` picked by touching along the track.
pub struct Slider {
    pub core: WidgetCore,
    value: f32,
    track_color: Rgb565,
    knob_color: Rgb565,
    on_changed: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(height: i32) -> Self {
        Self {
            core: WidgetCore::new(0, 0, 0, height),
            value: 0.0,
            track_color: theme::COLOR_STROKE,
            knob_color: theme::COLOR_ACCENT,
            on_changed: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        let value = value.clamp(0.0, 1.0);
        if value != self.value {
            self.value = value;
            self.core.mark_dirty();
        }
    }

    pub fn set_colors(&mut self, track: Rgb565, knob: Rgb565) {
        self.track_color = track;
        self.knob_color = knob;
        self.core.mark_dirty();
    }

    pub fn set_on_changed(&mut self, callback: Box<dyn FnMut(f32)>) {
        self.on_changed = Some(callback);
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);

        display.fill_rect(x, y + h / 2 - 2, w, 4, self.track_color);

        // Square knob with side h, travelling over w - h.
        let kx = x + (self.value * (w - h) as f32) as i32;
        display.fill_rect(kx, y, h, h, self.knob_color);

        self.core.mark_clean();
    }

    pub(crate) fn handle_touch(&mut self, px: i32, py: i32, pressed: bool) -> bool {
        if !self.core.visible() || !pressed {
            return false;
        }
        if !self.core.contains(px, py) || self.core.w <= 0 {
            return false;
        }
        let rel = (px - self.core.x) as f32 / self.core.w as f32;
        let before = self.value;
        self.set_value(rel);
        if let Some(callback) = &mut self.on_changed {
            callback(self.value);
        }
        self.value != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use std::cell::Cell;
    use std::rc::Rc;

    fn slider_at(x: i32, w: i32, h: i32) -> Slider {
        let mut slider = Slider::new(h);
        slider.core.set_position(x, 0);
        slider.core.set_size(w, h);
        slider
    }

    #[test]
    fn press_sets_value_from_relative_x() {
        let seen = Rc::new(Cell::new(-1.0f32));
        let hook = Rc::clone(&seen);
        let mut slider = slider_at(100, 200, 20);
        slider.set_on_changed(Box::new(move |value| hook.set(value)));

        assert!(slider.handle_touch(150, 10, true));
        assert!((slider.value() - 0.25).abs() < 1e-6);
        assert!((seen.get() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn repeated_press_at_same_spot_reports_no_change() {
        let mut slider = slider_at(0, 100, 10);
        assert!(slider.handle_touch(50, 5, true));
        assert!(!slider.handle_touch(50, 5, true));
    }

    #[test]
    fn set_value_clamps_to_unit_range() {
        let mut slider = slider_at(0, 100, 10);
        slider.set_value(2.0);
        assert_eq!(slider.value(), 1.0);
        slider.set_value(-1.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn outside_or_release_is_ignored() {
        let mut slider = slider_at(0, 100, 10);
        assert!(!slider.handle_touch(50, 50, true));
        assert!(!slider.handle_touch(50, 5, false));
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn draw_places_knob_by_value() {
        let mut display = DirectDisplay::new(RecordingPanel::new(200, 40));
        let mut slider = slider_at(0, 120, 20);
        slider.set_value(0.5);
        slider.draw(&mut display);
        // Knob travels over w - h = 100 px, so half way is x = 50.
        assert!(
            display
                .panel()
                .fill_rects
                .contains(&(50, 0, 20, 20, theme::COLOR_ACCENT))
        );
    }
}
