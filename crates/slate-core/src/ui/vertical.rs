//! Vertical layout: stacks cells top to bottom with weighted heights.

use log::{debug, trace};

use crate::display::DisplayInterface;
use crate::ui::cell::{Cell, Gravity};
use crate::ui::container::ContainerCore;
use crate::ui::widget::{Widget, WidgetCore};
use crate::ui::{MIN_LAYOUT_EXTENT, MIN_WIDGET_SIZE};

/// Container distributing its height among cells: fixed cells (weight 0)
/// keep their intrinsic height, flexible cells split what remains in
/// proportion to their weights.
pub struct VerticalLayout {
    pub core: WidgetCore,
    pub children: ContainerCore,
}

/// Main-axis extent of a fixed (weight 0) cell.
///
/// A nested layout that reports no height yet but is expected to fill gets
/// a workable minimum so a freshly built row of buttons is not collapsed to
/// nothing on the first pass.
fn fixed_height(cell: &Cell, display: &mut dyn DisplayInterface) -> i32 {
    let mut size = cell.widget().intrinsic_height(display);
    if size == 0 && cell.gravity() == Gravity::Fill {
        size = match cell.widget() {
            Widget::Vertical(_) | Widget::Horizontal(_) => MIN_LAYOUT_EXTENT,
            _ => MIN_WIDGET_SIZE,
        };
    }
    size
}

impl VerticalLayout {
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

    /// Redistribute child geometry, then refresh our own reported width to
    /// the widest child so ancestor horizontal layouts allocate enough
    /// space. The height handed down by our parent is never overridden.
    pub fn recalculate_layout(&mut self, display: &mut dyn DisplayInterface) {
        if self.children.in_layout {
            debug!("vertical layout recalculation already in progress, skipping");
            return;
        }
        self.children.in_layout = true;
        self.children.depth += 1;
        trace!("vertical layout recalculating at depth {}", self.children.depth);

        self.distribute(display);

        if !self.children.cells().is_empty() {
            let margin = self.children.margin();
            let mut max_child_w = 0;
            for cell in self.children.cells() {
                max_child_w = max_child_w.max(cell.widget().intrinsic_width(display));
            }
            self.core.w = max_child_w + 2 * margin;
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
        let inner_h = self.core.h - 2 * margin - total_spacing;
        if inner_h <= 0 {
            return;
        }
        let inner_w = self.core.w - 2 * margin;

        // Pass 1: fixed cells accumulate intrinsic height, flexible cells
        // accumulate weight.
        let mut total_fixed = 0i32;
        let mut flex_weight = 0.0f32;
        for cell in self.children.cells() {
            let weight = cell.weight();
            if weight > 0.0 {
                flex_weight += weight;
            } else {
                total_fixed += fixed_height(cell, display);
            }
        }

        let remaining = inner_h - total_fixed;
        let constrained = remaining < 0;
        if flex_weight <= 0.0 {
            flex_weight = 1.0;
        }
        trace!(
            "vertical distribute: inner={inner_h} fixed={total_fixed} remaining={remaining} constrained={constrained}"
        );

        // The last flexible cell takes the exact remainder so integer
        // truncation never leaks pixels.
        let last_flex = self
            .children
            .cells()
            .iter()
            .rposition(|c| c.weight() > 0.0);

        // Pass 2: assign heights and position cells in order.
        let x = self.core.x + margin;
        let mut cursor = self.core.y + margin;
        let mut flex_given = 0i32;
        for i in 0..n {
            let cell = &self.children.cells()[i];
            let weight = cell.weight();

            let mut cell_h = if weight > 0.0 {
                if constrained {
                    (inner_h as f32 * weight / flex_weight) as i32
                } else if last_flex == Some(i) {
                    remaining - flex_given
                } else {
                    let share = (remaining as f32 * weight / flex_weight) as i32;
                    flex_given += share;
                    share
                }
            } else {
                let mut fixed = fixed_height(cell, display);
                if constrained && total_fixed > 0 {
                    let squeezed = inner_h * fixed / total_fixed;
                    if squeezed < fixed {
                        fixed = squeezed;
                    }
                }
                fixed
            };
            cell_h = cell_h.max(MIN_WIDGET_SIZE);

            self.children.cells_mut()[i].position_widget(x, cursor, inner_w, cell_h, display);
            cursor += cell_h + spacing;
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
