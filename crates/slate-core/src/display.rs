//! Display adapters bridging widget drawing to real hardware.
//!
//! Widgets draw against the [`DisplayInterface`] trait and never know whether
//! their pixels go straight to glass or through the cache:
//!
//! - [`DirectDisplay`] forwards every call to the underlying panel driver
//!   immediately. Good for bring-up and small screens.
//! - [`CachedDisplay`] routes drawing into a [`PixelCache`] and only pushes
//!   dirty rows to the panel when [`DisplayInterface::update_cache`] is
//!   called, which turns repeated widget redraws into a handful of row
//!   transfers.
//!
//! [`PanelDriver`] is the hardware-facing side; [`GraphicsPanel`] implements
//! it on top of any `embedded-graphics` draw target so both the firmware
//! display driver and the simulator window plug in the same way.

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X18, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::trace;

use crate::cache::PixelCache;

/// Per-character advance assumed when no real font metrics are available,
/// at text size 1.
pub const FALLBACK_CHAR_WIDTH: i32 = 6;

/// Line height assumed when no real font metrics are available, at text
/// size 1.
pub const FALLBACK_LINE_HEIGHT: i32 = 8;

/// Hardware-facing driver for one physical panel.
///
/// This is the narrow contract the adapters need: init, orientation, pixel
/// and rectangle writes, and text with metrics. Coordinates are `i32` so
/// callers can pass partially off-screen shapes; implementations clip.
pub trait PanelDriver {
    /// Initialize the panel. Returns whether the hardware came up.
    fn begin(&mut self) -> bool;

    /// Panel width in pixels, after rotation.
    fn width(&self) -> i32;

    /// Panel height in pixels, after rotation.
    fn height(&self) -> i32;

    /// Select one of the four 90-degree orientations.
    fn set_rotation(&mut self, rotation: u8);

    fn fill_screen(&mut self, color: Rgb565);

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565);

    /// Draw `text` with its top-left corner at `(x, y)`, painting the glyph
    /// background with `bg`.
    fn draw_string(&mut self, text: &str, x: i32, y: i32, color: Rgb565, bg: Rgb565);

    /// Select the text size used by subsequent text calls and metrics.
    fn set_text_size(&mut self, size: u8);

    /// Rendered width of `text` at the current text size.
    fn text_width(&mut self, text: &str) -> i32;

    /// Line height of the current font at the current text size.
    fn font_height(&mut self) -> i32;
}

/// Drawing surface the widget tree renders against.
///
/// Mirrors the [`PanelDriver`] surface and adds the two cache hooks.
/// Widgets receive `&mut dyn DisplayInterface` so the same tree runs over
/// either adapter, and the host drives panel bring-up and rotation through
/// the same handle.
pub trait DisplayInterface {
    /// Initialize the underlying panel. Returns whether it came up.
    fn begin(&mut self) -> bool;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Select one of the four 90-degree orientations on the panel.
    fn set_rotation(&mut self, rotation: u8);

    fn fill_screen(&mut self, color: Rgb565);

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565);

    fn draw_string(&mut self, text: &str, x: i32, y: i32, color: Rgb565, bg: Rgb565);

    fn set_text_size(&mut self, size: u8);

    fn text_width(&mut self, text: &str) -> i32;

    fn font_height(&mut self) -> i32;

    /// Write one pixel into the cache without flushing. Direct adapters
    /// draw it immediately instead.
    fn update_cache_pixel(&mut self, x: i32, y: i32, color: Rgb565);

    /// Push accumulated dirty rows to the panel. No-op on direct adapters.
    fn update_cache(&mut self);
}

/// Adapter that forwards every drawing call straight to the panel.
pub struct DirectDisplay<P> {
    panel: P,
}

impl<P: PanelDriver> DirectDisplay<P> {
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn into_panel(self) -> P {
        self.panel
    }
}

impl<P: PanelDriver> DisplayInterface for DirectDisplay<P> {
    fn begin(&mut self) -> bool {
        self.panel.begin()
    }

    fn width(&self) -> i32 {
        self.panel.width()
    }

    fn height(&self) -> i32 {
        self.panel.height()
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.panel.set_rotation(rotation);
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.panel.fill_screen(color);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.panel.draw_pixel(x, y, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.panel.fill_rect(x, y, w, h, color);
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, color: Rgb565, bg: Rgb565) {
        self.panel.draw_string(text, x, y, color, bg);
    }

    fn set_text_size(&mut self, size: u8) {
        self.panel.set_text_size(size);
    }

    fn text_width(&mut self, text: &str) -> i32 {
        self.panel.text_width(text)
    }

    fn font_height(&mut self) -> i32 {
        self.panel.font_height()
    }

    fn update_cache_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.panel.draw_pixel(x, y, color);
    }

    fn update_cache(&mut self) {}
}

/// Adapter that draws into a shared [`PixelCache`] and defers panel writes
/// until [`DisplayInterface::update_cache`].
///
/// Text is approximated: the string's bounding box (measured with the real
/// panel metrics) is stamped into the cache as a background-color fill, and
/// glyphs themselves are not rasterized into runs. The panel still provides
/// exact metrics so layout stays correct.
pub struct CachedDisplay<'a, P> {
    cache: &'a PixelCache,
    panel: P,
}

impl<'a, P: PanelDriver> CachedDisplay<'a, P> {
    pub fn new(cache: &'a PixelCache, panel: P) -> Self {
        Self { cache, panel }
    }

    pub fn cache(&self) -> &PixelCache {
        self.cache
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}

impl<P: PanelDriver> DisplayInterface for CachedDisplay<'_, P> {
    fn begin(&mut self) -> bool {
        self.panel.begin()
    }

    fn width(&self) -> i32 {
        self.cache.width() as i32
    }

    fn height(&self) -> i32 {
        self.cache.height() as i32
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.panel.set_rotation(rotation);
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.cache.clear(color);
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.cache.set_pixel(x, y, color);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        self.cache.fill_rect(x, y, w, h, color);
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, _color: Rgb565, bg: Rgb565) {
        let w = self.panel.text_width(text);
        let h = self.panel.font_height();
        self.cache.fill_rect(x, y, w, h, bg);
    }

    fn set_text_size(&mut self, size: u8) {
        self.panel.set_text_size(size);
    }

    fn text_width(&mut self, text: &str) -> i32 {
        self.panel.text_width(text)
    }

    fn font_height(&mut self) -> i32 {
        self.panel.font_height()
    }

    fn update_cache_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.cache.set_pixel(x, y, color);
    }

    fn update_cache(&mut self) {
        trace!("pushing cached rows to panel");
        self.cache.flush(&mut self.panel);
    }
}

/// [`PanelDriver`] over any `embedded-graphics` draw target.
///
/// Maps the integer text sizes of the widget layer onto the bundled mono
/// fonts. Draw errors from the target are discarded; a panel that can fail
/// mid-frame has nothing useful to report back to a widget.
pub struct GraphicsPanel<D> {
    target: D,
    text_size: u8,
    rotation: u8,
}

impl<D> GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            text_size: 1,
            rotation: 0,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    fn font(&self) -> &'static embedded_graphics::mono_font::MonoFont<'static> {
        match self.text_size {
            0 | 1 => &FONT_6X10,
            2 => &FONT_9X18,
            _ => &FONT_10X20,
        }
    }
}

impl<D> PanelDriver for GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    fn begin(&mut self) -> bool {
        true
    }

    fn width(&self) -> i32 {
        self.target.size().width as i32
    }

    fn height(&self) -> i32 {
        self.target.size().height as i32
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 0x3;
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.target.clear(color).ok();
    }

    fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        Pixel(Point::new(x, y), color).draw(&mut self.target).ok();
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
            .ok();
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32, color: Rgb565, bg: Rgb565) {
        let style = MonoTextStyleBuilder::new()
            .font(self.font())
            .text_color(color)
            .background_color(bg)
            .build();
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(&mut self.target)
            .ok();
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn text_width(&mut self, text: &str) -> i32 {
        let font = self.font();
        let advance = font.character_size.width + font.character_spacing;
        text.chars().count() as i32 * advance as i32
    }

    fn font_height(&mut self) -> i32 {
        self.font().character_size.height as i32
    }
}
