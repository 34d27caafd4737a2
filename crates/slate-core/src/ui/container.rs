//! Shared child management for the three layout containers.

use alloc::boxed::Box;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use log::debug;

use crate::display::DisplayInterface;
use crate::ui::cell::{Cell, Gravity};
use crate::ui::theme;
use crate::ui::widget::Widget;
use crate::ui::widgets::{
    Button, CheckBox, Gauge, HorizontalLine, Label, ProgressBar, Slider, Spacer,
};

/// Ordered child cells plus the layout knobs shared by every container.
///
/// Containers exclusively own their children; dropping a container drops the
/// whole subtree. `in_layout` and `depth` guard against re-entrant
/// recalculation through parent/child forwarding.
pub struct ContainerCore {
    pub(crate) cells: Vec<Cell>,
    margin: i32,
    spacing: i32,
    pub(crate) in_layout: bool,
    pub(crate) depth: u8,
    /// Set whenever children or layout knobs change; the owning container
    /// mirrors it into its widget-level `layout_dirty` flag.
    pub(crate) changed: bool,
}

impl Default for ContainerCore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerCore {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            margin: 10,
            spacing: 5,
            in_layout: false,
            depth: 0,
            changed: true,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: i32) {
        self.margin = margin;
        self.changed = true;
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.spacing = spacing;
        self.changed = true;
    }

    pub fn set_cell_weight(&mut self, index: usize, weight: f32) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.set_weight(weight);
            self.changed = true;
        }
    }

    pub fn set_cell_gravity(&mut self, index: usize, gravity: Gravity) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.set_gravity(gravity);
            self.changed = true;
        }
    }

    /// Append a widget wrapped in a new cell and return the cell index.
    pub fn add_child(&mut self, widget: impl Into<Widget>, weight: f32, gravity: Gravity) -> usize {
        self.add_cell(Cell::new(widget.into(), gravity, weight))
    }

    pub fn add_cell(&mut self, cell: Cell) -> usize {
        self.cells.push(cell);
        self.changed = true;
        debug!("container now holds {} cells", self.cells.len());
        self.cells.len() - 1
    }

    pub fn add_label(&mut self, text: &str, color: Rgb565, text_size: u8) -> usize {
        self.add_child(Label::new(text, color, text_size), 1.0, Gravity::Center)
    }

    pub fn add_button(
        &mut self,
        text: &str,
        text_size: u8,
        on_click: impl FnMut() + 'static,
    ) -> usize {
        let mut button = Button::new(text, text_size);
        button.set_on_click(Box::new(on_click));
        self.add_child(button, 1.0, Gravity::Center)
    }

    pub fn add_progress_bar(&mut self, progress: f32) -> usize {
        let mut bar = ProgressBar::new(theme::COLOR_ACCENT, theme::COLOR_SURFACE);
        bar.set_progress(progress);
        self.add_child(bar, 1.0, Gravity::Fill)
    }

    pub fn add_checkbox(&mut self, size: i32) -> usize {
        self.add_child(CheckBox::new(size), 1.0, Gravity::Center)
    }

    pub fn add_slider(&mut self, height: i32) -> usize {
        self.add_child(Slider::new(height), 1.0, Gravity::Fill)
    }

    pub fn add_gauge(&mut self, size: i32) -> usize {
        self.add_child(Gauge::new(size), 1.0, Gravity::Center)
    }

    pub fn add_horizontal_line(&mut self, color: Rgb565, thickness: i32) -> usize {
        self.add_child(HorizontalLine::new(color, thickness), 0.0, Gravity::Fill)
    }

    /// Flexible spacer absorbing leftover space in proportion to `weight`.
    pub fn add_spacer(&mut self, weight: f32) -> usize {
        self.add_child(Spacer::flexible(), weight, Gravity::Center)
    }

    /// Fixed-size spacer contributing a constant gap.
    pub fn add_fixed_spacer(&mut self, size: i32) -> usize {
        self.add_child(Spacer::fixed(size), 0.0, Gravity::Center)
    }

    /// Whether any nested layout container in this subtree is stale.
    pub(crate) fn any_child_layout_dirty(&self) -> bool {
        self.cells.iter().any(|c| c.widget().layout_tree_dirty())
    }

    /// Let stale nested containers recompute after our own pass.
    pub(crate) fn update_child_layouts(&mut self, display: &mut dyn DisplayInterface) {
        for cell in &mut self.cells {
            if cell.widget().layout_tree_dirty() {
                cell.widget_mut().update_layout_if_needed(display);
            }
        }
    }

    pub(crate) fn draw_children(&mut self, display: &mut dyn DisplayInterface) {
        for cell in &mut self.cells {
            cell.draw(display);
        }
    }

    /// Broadcast the event to every child with no z-order short-circuit;
    /// overlapping widgets all see it.
    pub(crate) fn handle_touch(&mut self, x: i32, y: i32, pressed: bool) -> bool {
        let mut changed = false;
        for cell in &mut self.cells {
            changed |= cell.handle_touch(x, y, pressed);
        }
        changed
    }
}
