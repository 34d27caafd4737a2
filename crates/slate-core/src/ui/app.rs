//! Application root: owns the top-level widgets and drives the frame loop.

use alloc::vec::Vec;

use log::debug;

use crate::display::DisplayInterface;
use crate::ui::widget::Widget;

/// Owns the top-level widget trees and runs the cooperative per-frame pass:
/// refresh stale layouts, redraw dirty widgets, flush the cache once.
///
/// One global dirty flag gates whether a frame does any work at all, so an
/// idle page costs a flag check per loop iteration. The app is an explicit
/// context, not a process-wide singleton; several trees can coexist and be
/// tested independently.
pub struct UiApp {
    widgets: Vec<Widget>,
    dirty: bool,
    frames: u32,
}

impl Default for UiApp {
    fn default() -> Self {
        Self::new()
    }
}

impl UiApp {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            dirty: true,
            frames: 0,
        }
    }

    /// Append a top-level widget. Returns its index for later access via
    /// [`UiApp::widget_mut`].
    pub fn add_widget(&mut self, widget: impl Into<Widget>) -> usize {
        self.widgets.push(widget.into());
        self.dirty = true;
        self.widgets.len() - 1
    }

    /// Drop every widget. The next frame starts from an empty tree.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.dirty = true;
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Mutable access to a top-level widget. Marks the app dirty, since the
    /// caller is presumably about to change something visible.
    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.dirty = true;
        self.widgets.get_mut(index)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run one frame: layout pass, draw pass, one cache flush. Skipped
    /// entirely while the app is clean.
    pub fn update(&mut self, display: &mut dyn DisplayInterface) {
        if !self.dirty {
            return;
        }

        let mut layout_passes = 0u32;
        for widget in &mut self.widgets {
            if widget.core().visible() && widget.layout_tree_dirty() {
                widget.update_layout_if_needed(display);
                layout_passes += 1;
            }
        }

        let mut visible = 0u32;
        for widget in &mut self.widgets {
            if widget.core().visible() {
                widget.draw(display);
                visible += 1;
            }
        }

        display.update_cache();
        self.dirty = false;

        self.frames = self.frames.wrapping_add(1);
        if self.frames % 100 == 0 {
            debug!("frame {}: {visible} visible widgets, {layout_passes} layout passes", self.frames);
        }
    }

    /// Route a touch sample to every widget; overlapping widgets all see
    /// it. Returns whether any widget state changed, in which case the app
    /// is already marked dirty for the next frame.
    pub fn handle_touch(&mut self, x: i32, y: i32, pressed: bool) -> bool {
        let mut changed = false;
        for widget in &mut self.widgets {
            changed |= widget.handle_touch(x, y, pressed);
        }
        if changed {
            self.dirty = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use crate::ui::widgets::Button;
    use alloc::boxed::Box;
    use std::cell::Cell;
    use std::rc::Rc;

    fn display() -> DirectDisplay<RecordingPanel> {
        DirectDisplay::new(RecordingPanel::new(320, 240))
    }

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let mut button = Button::new("ok", 1);
        button.core.set_position(0, 0);
        button.core.set_size(40, 20);
        let hook = Rc::clone(&clicks);
        button.set_on_click(Box::new(move || hook.set(hook.get() + 1)));
        (button, clicks)
    }

    #[test]
    fn press_then_release_inside_fires_once() {
        let (button, clicks) = counting_button();
        let mut app = UiApp::new();
        app.add_widget(button);

        assert!(!app.handle_touch(20, 10, true));
        assert!(app.handle_touch(20, 10, false));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn release_outside_cancels_the_click() {
        let (button, clicks) = counting_button();
        let mut app = UiApp::new();
        app.add_widget(button);

        app.handle_touch(20, 10, true);
        assert!(!app.handle_touch(100, 100, false));
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn update_skips_all_work_while_clean() {
        let mut display = display();
        let mut app = UiApp::new();
        let (button, _clicks) = counting_button();
        app.add_widget(button);

        app.update(&mut display);
        assert!(!app.is_dirty());
        assert!(display.panel().touched_pixel_count() > 0);

        display.panel_mut().clear_recording();
        app.update(&mut display);
        assert_eq!(display.panel().touched_pixel_count(), 0);
        assert!(display.panel().texts.is_empty());
    }

    #[test]
    fn touch_is_broadcast_to_overlapping_widgets() {
        let (first, first_clicks) = counting_button();
        let (second, second_clicks) = counting_button();
        let mut app = UiApp::new();
        app.add_widget(first);
        app.add_widget(second);
        let mut display = display();
        app.update(&mut display);

        app.handle_touch(20, 10, true);
        assert!(app.handle_touch(20, 10, false));
        assert_eq!(first_clicks.get(), 1);
        assert_eq!(second_clicks.get(), 1);
        assert!(app.is_dirty());
    }

    #[test]
    fn widget_access_marks_the_app_dirty() {
        let mut display = display();
        let mut app = UiApp::new();
        let index = app.add_widget(Button::new("go", 1));
        app.update(&mut display);
        assert!(!app.is_dirty());

        let button = app.widget_mut(index).unwrap().as_button_mut().unwrap();
        button.set_text("stop");
        assert!(app.is_dirty());
    }
}
