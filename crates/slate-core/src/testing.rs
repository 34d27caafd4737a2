//! Shared test doubles for host-side tests.

use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;

use crate::display::PanelDriver;

/// A recorded `draw_string` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Rgb565,
    pub bg: Rgb565,
}

/// Panel driver that records every pixel and text call.
///
/// Uses the same fixed metrics as the classic 5x7 bitmap font scaled by the
/// text size: 6 px advance and 8 px line height per size unit, so layout
/// results in tests are exact.
pub struct RecordingPanel {
    width: i32,
    height: i32,
    text_size: u8,
    pixels: BTreeMap<(i32, i32), Rgb565>,
    pub texts: Vec<TextCall>,
    pub fill_rects: Vec<(i32, i32, i32, i32, Rgb565)>,
    pub rotation: u8,
}

impl RecordingPanel {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            text_size: 1,
            pixels: BTreeMap::new(),
            texts: Vec::new(),
            fill_rects: Vec::new(),
            rotation: 0,
        }
    }

    /// Last color written to `(x, y)`, or `None` if never touched.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.pixels.get(&(x, y)).copied()
    }

    pub fn touched_pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn clear_recording(&mut self) {
        self.pixels.clear();
        self.texts.clear();
        self.fill_rects.clear();
    }
}

impl PanelDriver for RecordingPanel {
    fn begin(&mut self) -> bool {
        true
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation;
    }

    fn fill_screen(&mut self, color: Rgb565) {
        let (w, h) = (self.width, self.height);
        self.fill_rect(0, 0, w, h, color);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.pixels.insert((x, y), color);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.fill_rects.push((x, y, w, h, color));
        for py in y..y + h {
            for px in x..x + w {
                self.draw_pixel(px, py, color);
            }
        }
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, color: Rgb565, bg: Rgb565) {
        self.texts.push(TextCall {
            text: String::from(text),
            x,
            y,
            color,
            bg,
        });
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size.max(1);
    }

    fn text_width(&mut self, text: &str) -> i32 {
        text.chars().count() as i32 * 6 * self.text_size as i32
    }

    fn font_height(&mut self) -> i32 {
        8 * self.text_size as i32
    }
}
