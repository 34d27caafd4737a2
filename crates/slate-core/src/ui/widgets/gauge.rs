//! Radial gauge with a needle swept over a 270-degree arc.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use libm::{cosf, sinf};

use crate::display::DisplayInterface;
use crate::ui::theme;
use crate::ui::widget::WidgetCore;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Needle position in `[0, 1]`, mapped from -135 to +135 degrees.
pub struct Gauge {
    pub core: WidgetCore,
    value: f32,
    needle_color: Rgb565,
}

impl Gauge {
    pub fn new(size: i32) -> Self {
        Self {
            core: WidgetCore::new(0, 0, size, size),
            value: 0.0,
            needle_color: theme::COLOR_ALERT,
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

    pub fn set_needle_color(&mut self, color: Rgb565) {
        self.needle_color = color;
        self.core.mark_dirty();
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);

        let angle = (-135.0 + 270.0 * self.value) * DEG_TO_RAD;
        let cx = x + w / 2;
        let cy = y + h / 2;
        let r = w / 2;
        let nx = cx + (cosf(angle) * (r - 2) as f32) as i32;
        let ny = cy + (sinf(angle) * (r - 2) as f32) as i32;

        // Blank the dial, then stamp the needle pixel by pixel straight
        // into the cache so only the needle's rows go dirty next frame.
        display.fill_rect(x, y, w, h, Rgb565::BLACK);

        let steps = r.max(1);
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            let px = cx + ((nx - cx) as f32 * t) as i32;
            let py = cy + ((ny - cy) as f32 * t) as i32;
            display.update_cache_pixel(px, py, self.needle_color);
        }

        self.core.mark_clean();
    }
}
