//! Horizontal layout: places cells left to right with weighted widths.

use log::{debug, trace};

use crate::display::DisplayInterface;
use crate::ui::MIN_WIDGET_SIZE;
use crate::ui::cell::{Cell, Gravity};
use crate::ui::container::ContainerCore;
use crate::ui::widget::WidgetCore;

/// Container distributing its width among cells.
///
/// Cells with weight 0 keep their natural width; flexible cells (explicit
/// weight, or `Fill` gravity which implies weight 1) split the leftover.
/// When nothing is flexible but space remains, the first right-aligned cell
/// is shifted so its far edge is flush with the container's far edge,
/// enabling a right-aligned field without an explicit spacer.
pub struct HorizontalLayout {
    pub core: WidgetCore,
    pub children: ContainerCore,
}

/// Effective flexible weight: `Fill` gravity implies weight 1.
fn effective_weight(cell: &Cell) -> f32 {
    let weight = cell.weight();
    if weight > 0.0 {
        weight
    } else if cell.gravity() == Gravity::Fill {
        1.0
    } else {
        0.0
    }
}

/// Natural width of a cell; flexible-weight cells claim none up front.
fn natural_width(cell: &Cell, display: &mut dyn DisplayInterface) -> i32 {
    if cell.weight() > 0.0 {
        return 0;
    }
    let mut w = cell.widget().intrinsic_width(display);
    if w == 0 && cell.gravity() == Gravity::Fill {
        w = MIN_WIDGET_SIZE;
    }
    w
}

impl HorizontalLayout {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            core: WidgetCore::new(x, y, w, h),
            children: ContainerCore::new(),
        }
    }

    pub fn with_margins(x: i32, y: i32, w: i32, h: i32, margin: i32, spacing: i32) -> Self {
        let mut layout = Self::new(x, y, w, h);
        layout.children.set_margin(margin);
        layout.children.set_spacing(spacing);
        layout
    }

    /// Preferred height: tallest child plus margins, so parent vertical
    /// layouts allocate enough room for a freshly built row.
    pub(crate) fn intrinsic_height(&self, display: &mut dyn DisplayInterface) -> i32 {
        if self.children.cells().is_empty() {
            return self.core.h;
        }
        let mut max_child_h = 0;
        for cell in self.children.cells() {
            max_child_h = max_child_h.max(cell.widget().intrinsic_height(display));
        }
        max_child_h + 2 * self.children.margin()
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

    /// Redistribute child geometry, then refresh our own reported height to
    /// the tallest child. The width handed down by our parent is never
    /// overridden.
    pub fn recalculate_layout(&mut self, display: &mut dyn DisplayInterface) {
        if self.children.in_layout {
            debug!("horizontal layout recalculation already in progress, skipping");
            return;
        }
        self.children.in_layout = true;
        self.children.depth += 1;
        trace!(
            "horizontal layout recalculating at depth {}",
            self.children.depth
        );

        self.distribute(display);

        if !self.children.cells().is_empty() {
            let margin = self.children.margin();
            let mut max_child_h = 0;
            for cell in self.children.cells() {
                max_child_h = max_child_h.max(cell.widget().intrinsic_height(display));
            }
            self.core.h = max_child_h + 2 * margin;
        }

        self.children.depth -= 1;
        self.children.in_layout = false;
    }

    fn distribute(&mut self, display: &mut dyn DisplayInterface) {
        let n = self.children.cells().len();
        if n == 0 {
            return;
        }
        let margin = self.children.margin();
        let spacing = self.children.spacing();
        let total_spacing = spacing * (n as i32 - 1).max(0);
        let inner_w = self.core.w - 2 * margin - total_spacing;
        if inner_w <= 0 {
            return;
        }
        let inner_h = self.core.h - 2 * margin;

        // Pass 1: collect natural widths and flexible weight.
        let mut total_natural = 0i32;
        let mut total_eff = 0.0f32;
        for cell in self.children.cells() {
            total_natural += natural_width(cell, display);
            total_eff += effective_weight(cell);
        }

        // Widgets that do not fit touch but never overlap.
        let remaining = (inner_w - total_natural).max(0);

        // No flexible cell but leftover space: nominate the first cell that
        // wants the far edge and let it absorb the slack by shifting.
        let mut candidate = None;
        if total_eff <= 0.0 && remaining > 0 {
            candidate = self
                .children
                .cells()
                .iter()
                .position(|c| c.gravity() == Gravity::Fill || c.gravity().is_right_aligned());
        }
        if total_eff <= 0.0 {
            total_eff = 1.0;
        }
        trace!(
            "horizontal distribute: inner={inner_w} natural={total_natural} remaining={remaining}"
        );

        let last_eff = self
            .children
            .cells()
            .iter()
            .rposition(|c| effective_weight(c) > 0.0);

        // Pass 2: assign widths and position cells in order.
        let y = self.core.y + margin;
        let left = self.core.x + margin;
        let mut cursor = left;
        let mut eff_given = 0i32;
        for i in 0..n {
            let cell = &self.children.cells()[i];
            let eff = effective_weight(cell);
            let natural = natural_width(cell, display);

            let extra = if eff > 0.0 && remaining > 0 {
                if last_eff == Some(i) {
                    remaining - eff_given
                } else {
                    let share = (remaining as f32 * eff / total_eff) as i32;
                    eff_given += share;
                    share
                }
            } else {
                0
            };
            let cell_w = natural + extra;

            // The nominated right-aligned cell is shifted, not stretched.
            if candidate == Some(i) && remaining > 0 && eff == 0.0 {
                cursor = left + inner_w - cell_w;
            }

            self.children.cells_mut()[i].position_widget(cursor, y, cell_w, inner_h, display);
            cursor += cell_w + spacing;
        }
    }

    pub fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if !self.core.visible() {
            return;
        }
        self.update_layout_if_needed(display);
        self.children.draw_children(display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use crate::ui::widgets::{CheckBox, ProgressBar};
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;

    fn display() -> DirectDisplay<RecordingPanel> {
        DirectDisplay::new(RecordingPanel::new(320, 240))
    }

    #[test]
    fn flexible_cell_gets_leftover_width() {
        // 300 wide, margin 0, spacing 10, fixed 50 + flexible + fixed 50.
        let mut display = display();
        let mut layout = HorizontalLayout::with_margins(0, 0, 300, 60, 0, 10);
        layout.children.add_child(CheckBox::new(50), 0.0, Gravity::Center);
        layout.children.add_child(
            ProgressBar::new(Rgb565::GREEN, Rgb565::BLACK),
            1.0,
            Gravity::Fill,
        );
        layout.children.add_child(CheckBox::new(50), 0.0, Gravity::Center);
        layout.update_layout_if_needed(&mut display);

        let flexible = layout.children.cells()[1].widget().core();
        assert_eq!(flexible.w, 300 - 50 - 50 - 2 * 10);
        assert_eq!(flexible.x, 60);
        // The trailing fixed cell starts after the flexible one.
        assert_eq!(layout.children.cells()[2].widget().core().x, 250);
    }

    #[test]
    fn conserves_inner_extent_between_weights() {
        let mut display = display();
        let mut layout = HorizontalLayout::with_margins(0, 0, 100, 40, 0, 0);
        layout.children.add_child(
            ProgressBar::new(Rgb565::RED, Rgb565::BLACK),
            1.0,
            Gravity::Fill,
        );
        layout.children.add_child(
            ProgressBar::new(Rgb565::BLUE, Rgb565::BLACK),
            2.0,
            Gravity::Fill,
        );
        layout.update_layout_if_needed(&mut display);

        let first = layout.children.cells()[0].widget().core().w;
        let second = layout.children.cells()[1].widget().core().w;
        assert_eq!(first + second, 100);
        assert_eq!(first, 33);
        assert_eq!(second, 67);
    }

    #[test]
    fn right_aligned_cell_absorbs_slack_by_shifting() {
        let mut display = display();
        let mut layout = HorizontalLayout::with_margins(0, 0, 300, 60, 0, 0);
        layout.children.add_child(CheckBox::new(50), 0.0, Gravity::TopLeft);
        layout
            .children
            .add_child(CheckBox::new(40), 0.0, Gravity::CenterRight);
        layout.update_layout_if_needed(&mut display);

        let left = layout.children.cells()[0].widget().core();
        let right = layout.children.cells()[1].widget().core();
        assert_eq!(left.x, 0);
        // Shifted flush to the far edge, not stretched.
        assert_eq!(right.x, 260);
        assert_eq!(right.w, 40);
    }

    #[test]
    fn fill_gravity_implies_weight_one() {
        let mut display = display();
        let mut layout = HorizontalLayout::with_margins(0, 0, 200, 40, 0, 0);
        layout.children.add_child(CheckBox::new(40), 0.0, Gravity::Center);
        layout.children.add_child(
            ProgressBar::new(Rgb565::RED, Rgb565::BLACK),
            0.0,
            Gravity::Fill,
        );
        layout.update_layout_if_needed(&mut display);

        // The Fill cell behaves as flexible even with weight 0. Its natural
        // width (stored 0 -> minimum 1) is kept and the slack is added.
        let fill = layout.children.cells()[1].widget().core();
        assert_eq!(fill.w, 1 + (200 - 40 - 1));
    }

    #[test]
    fn reports_tallest_child_as_height() {
        let mut display = display();
        let mut layout = HorizontalLayout::with_margins(0, 0, 200, 100, 10, 0);
        layout.children.add_child(CheckBox::new(30), 0.0, Gravity::Center);
        layout.children.add_child(CheckBox::new(55), 0.0, Gravity::Center);
        layout.update_layout_if_needed(&mut display);
        assert_eq!(layout.core.h, 55 + 2 * 10);
    }
}
