//! Panel: bordered surface delegating its inner area to its children.

use embedded_graphics::pixelcolor::Rgb565;
use log::{debug, trace};

use crate::display::DisplayInterface;
use crate::ui::container::ContainerCore;
use crate::ui::theme;
use crate::ui::widget::WidgetCore;

/// Container that paints a background and border and hands the
/// border-excluded inner area to its children.
///
/// With exactly one child the whole inner area is delegated to it; with
/// multiple children each gets the same inner area (panels stack, they do
/// not split).
pub struct Panel {
    pub core: WidgetCore,
    pub children: ContainerCore,
    bg_color: Rgb565,
    border_color: Rgb565,
    border_thickness: i32,
    bg_drawn: bool,
}

impl Panel {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            core: WidgetCore::new(x, y, w, h),
            children: ContainerCore::new(),
            bg_color: theme::COLOR_SURFACE,
            border_color: theme::COLOR_STROKE,
            border_thickness: 1,
            bg_drawn: false,
        }
    }

    pub fn set_colors(&mut self, bg: Rgb565, border: Rgb565) {
        self.bg_color = bg;
        self.border_color = border;
        self.bg_drawn = false;
        self.core.mark_dirty();
    }

    pub fn set_border_thickness(&mut self, thickness: i32) {
        self.border_thickness = thickness;
        self.core.mark_dirty();
    }

    pub(crate) fn update_layout_if_needed(&mut self, display: &mut dyn DisplayInterface) {
        if self.children.changed {
            self.children.changed = false;
            self.core.mark_layout_dirty();
        }
        if self.core.layout_dirty && !self.children.in_layout {
            self.recalculate_layout(display);
            self.core.layout_dirty = false;
        }
        self.children.update_child_layouts(display);
    }

    /// Hand the inner area to the children and forward recalculation into
    /// any child that is itself a layout container.
    pub fn recalculate_layout(&mut self, display: &mut dyn DisplayInterface) {
        if self.children.in_layout {
            debug!("panel recalculation already in progress, skipping");
            return;
        }
        self.children.in_layout = true;
        self.children.depth += 1;

        let bt = self.border_thickness;
        let inner_w = self.core.w - 2 * bt;
        let inner_h = self.core.h - 2 * bt;
        let child_x = self.core.x + bt;
        let child_y = self.core.y + bt;
        trace!("panel inner area {inner_w}x{inner_h} at ({child_x},{child_y})");

        for cell in self.children.cells_mut() {
            cell.position_widget(child_x, child_y, inner_w, inner_h, display);
            if cell.widget().is_layout() {
                cell.widget_mut().update_layout_if_needed(display);
            }
        }

        self.children.depth -= 1;
        self.children.in_layout = false;
    }

    pub fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() {
            return;
        }
        self.update_layout_if_needed(display);

        let (x, y, w, h) = (self.core.x, self.core.y, self.core.w, self.core.h);

        // Repaint the full background once when dirty.
        if self.core.dirty() || !self.bg_drawn {
            display.fill_rect(x, y, w, h, self.bg_color);
            self.bg_drawn = true;
            self.core.mark_clean();
        }

        // The border is redrawn every pass so children cannot leave it
        // partially overwritten.
        let bt = self.border_thickness;
        display.fill_rect(x, y, w, bt, self.border_color);
        display.fill_rect(x, y + h - bt, w, bt, self.border_color);
        display.fill_rect(x, y, bt, h, self.border_color);
        display.fill_rect(x + w - bt, y, bt, h, self.border_color);

        self.children.draw_children(display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use crate::ui::cell::Gravity;
    use crate::ui::vertical::VerticalLayout;
    use crate::ui::widgets::ProgressBar;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    #[test]
    fn single_child_gets_border_excluded_inner_area() {
        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut panel = Panel::new(0, 0, 100, 80);
        panel.set_border_thickness(2);
        let child = VerticalLayout::with_margins(0, 0, 0, 0, 0, 0);
        panel.children.add_child(child, 1.0, Gravity::Fill);

        panel.update_layout_if_needed(&mut display);

        let child = panel.children.cells()[0].widget().core();
        assert_eq!((child.x, child.y, child.w, child.h), (2, 2, 96, 76));
    }

    #[test]
    fn multiple_children_share_the_same_inner_area() {
        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut panel = Panel::new(10, 10, 60, 40);
        panel.children.add_child(
            ProgressBar::new(Rgb565::RED, Rgb565::BLACK),
            1.0,
            Gravity::Fill,
        );
        panel.children.add_child(
            ProgressBar::new(Rgb565::BLUE, Rgb565::BLACK),
            1.0,
            Gravity::Fill,
        );
        panel.update_layout_if_needed(&mut display);

        for cell in panel.children.cells() {
            let core = cell.widget().core();
            assert_eq!((core.x, core.y, core.w, core.h), (11, 11, 58, 38));
        }
    }

    #[test]
    fn draws_background_once_and_border_every_pass() {
        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut panel = Panel::new(0, 0, 40, 30);
        panel.set_colors(Rgb565::BLUE, Rgb565::WHITE);

        panel.draw(&mut display);
        assert_eq!(display.panel().pixel(20, 15), Some(Rgb565::BLUE));
        assert_eq!(display.panel().pixel(0, 0), Some(Rgb565::WHITE));
        assert_eq!(display.panel().pixel(39, 29), Some(Rgb565::WHITE));

        // Second pass: background is clean, border still repainted.
        display.panel_mut().clear_recording();
        panel.draw(&mut display);
        assert_eq!(display.panel().pixel(20, 15), None);
        assert_eq!(display.panel().pixel(0, 0), Some(Rgb565::WHITE));
    }
}
