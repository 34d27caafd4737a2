//! Progress bar with incremental repaint.

use embedded_graphics::pixelcolor::Rgb565;

use crate::display::DisplayInterface;
use crate::ui::widget::WidgetCore;

/// Fill fraction in `[0, 1]`.
///
/// Repaints only the delta between the previous and current fill width, so
/// a slowly advancing bar costs a sliver of pixels per frame instead of the
/// whole rectangle.
pub struct ProgressBar {
    pub core: WidgetCore,
    progress: f32,
    /// Fill fraction at the last draw; negative until first drawn.
    prev_progress: f32,
    fill_color: Rgb565,
    bg_color: Rgb565,
}

impl ProgressBar {
    pub fn new(fill: Rgb565, bg: Rgb565) -> Self {
        Self {
            core: WidgetCore::new(0, 0, 0, 20),
            progress: 0.0,
            prev_progress: -1.0,
            fill_color: fill,
            bg_color: bg,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        if progress != self.progress {
            self.progress = progress;
            self.core.mark_dirty();
        }
    }

    pub fn set_colors(&mut self, fill: Rgb565, bg: Rgb565) {
        self.fill_color = fill;
        self.bg_color = bg;
        self.prev_progress = -1.0;
        self.core.mark_dirty();
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() || !self.core.dirty() {
            return;
        }
        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);
        let first_draw = self.prev_progress < 0.0;

        if first_draw {
            display.fill_rect(x, y, w, h, self.bg_color);
        }

        let prev_width = if first_draw {
            0
        } else {
            (self.prev_progress * w as f32) as i32
        };
        let new_width = (self.progress * w as f32) as i32;

        // Shrinking: blank the strip that emptied out.
        if new_width < prev_width {
            display.fill_rect(x + new_width, y, prev_width - new_width, h, self.bg_color);
        }

        if new_width > 0 {
            display.fill_rect(x, y, new_width, h, self.fill_color);
        }

        if first_draw {
            display.fill_rect(x + new_width, y, w - new_width, h, self.bg_color);
        }

        self.prev_progress = self.progress;
        self.core.mark_clean();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use embedded_graphics::prelude::*;

    fn bar_sized(w: i32, h: i32) -> ProgressBar {
        let mut bar = ProgressBar::new(Rgb565::GREEN, Rgb565::BLACK);
        bar.core.set_size(w, h);
        bar
    }

    #[test]
    fn first_draw_paints_the_full_background() {
        let mut display = DirectDisplay::new(RecordingPanel::new(100, 20));
        let mut bar = bar_sized(100, 20);
        bar.set_progress(0.3);
        bar.draw(&mut display);

        assert!(
            display
                .panel()
                .fill_rects
                .contains(&(0, 0, 100, 20, Rgb565::BLACK))
        );
        assert_eq!(display.panel().pixel(10, 10), Some(Rgb565::GREEN));
        assert_eq!(display.panel().pixel(50, 10), Some(Rgb565::BLACK));
    }

    #[test]
    fn advancing_repaints_without_background() {
        let mut display = DirectDisplay::new(RecordingPanel::new(100, 20));
        let mut bar = bar_sized(100, 20);
        bar.set_progress(0.3);
        bar.draw(&mut display);

        display.panel_mut().clear_recording();
        bar.set_progress(0.6);
        bar.draw(&mut display);
        assert!(display.panel().fill_rects.iter().all(|r| r.4 != Rgb565::BLACK));
        assert_eq!(display.panel().pixel(59, 10), Some(Rgb565::GREEN));
    }

    #[test]
    fn shrinking_blanks_the_emptied_strip() {
        let mut display = DirectDisplay::new(RecordingPanel::new(100, 20));
        let mut bar = bar_sized(100, 20);
        bar.set_progress(0.8);
        bar.draw(&mut display);

        display.panel_mut().clear_recording();
        bar.set_progress(0.5);
        bar.draw(&mut display);
        assert!(
            display
                .panel()
                .fill_rects
                .contains(&(50, 0, 30, 20, Rgb565::BLACK))
        );
        assert_eq!(display.panel().pixel(60, 10), Some(Rgb565::BLACK));
        assert_eq!(display.panel().pixel(40, 10), Some(Rgb565::GREEN));
    }

    #[test]
    fn clean_bar_skips_drawing() {
        let mut display = DirectDisplay::new(RecordingPanel::new(100, 20));
        let mut bar = bar_sized(100, 20);
        bar.draw(&mut display);
        display.panel_mut().clear_recording();
        bar.draw(&mut display);
        assert_eq!(display.panel().touched_pixel_count(), 0);
    }
}
