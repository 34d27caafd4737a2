//! Cell: binds one widget to gravity/weight/padding within a container.

use alloc::boxed::Box;

use log::trace;

use crate::display::DisplayInterface;
use crate::ui::widget::Widget;

/// Anchor rule for placing a widget inside its allotted cell area.
///
/// The eight edge/corner anchors and `Center` place the widget at its
/// intrinsic size; `Fill` stretches it over the whole padded area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    Fill,
}

impl Gravity {
    /// Anchors whose horizontal edge is the right side of the cell.
    pub(crate) fn is_right_aligned(self) -> bool {
        matches!(
            self,
            Gravity::TopRight | Gravity::CenterRight | Gravity::BottomRight
        )
    }
}

/// Per-side inner padding of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Equal padding on all four sides.
    pub fn all(padding: i32) -> Self {
        Self::new(padding, padding, padding, padding)
    }

    /// Equal left/right and equal top/bottom padding.
    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }
}

/// Positioning wrapper owning exactly one widget inside a container.
pub struct Cell {
    widget: Box<Widget>,
    gravity: Gravity,
    weight: f32,
    padding: Padding,
}

impl Cell {
    pub fn new(widget: Widget, gravity: Gravity, weight: f32) -> Self {
        Self {
            widget: Box::new(widget),
            gravity,
            weight,
            padding: Padding::default(),
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        self.gravity = gravity;
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    pub fn is_spacer(&self) -> bool {
        matches!(&*self.widget, Widget::Spacer(_))
    }

    /// Compute and apply the widget's final geometry inside the cell bounds.
    ///
    /// Position and size are always written, even for anchor gravities, so
    /// later passes and the widget's own draw see correct geometry. A nested
    /// layout container gets its `layout_dirty` flag forced instead of being
    /// recursed into immediately, which bounds recursion depth.
    pub fn position_widget(
        &mut self,
        cell_x: i32,
        cell_y: i32,
        cell_w: i32,
        cell_h: i32,
        display: &mut dyn DisplayInterface,
    ) {
        let pad = self.padding;
        let avail_w = cell_w - pad.left - pad.right;
        let avail_h = cell_h - pad.top - pad.bottom;
        if avail_w <= 0 || avail_h <= 0 {
            return;
        }

        let pref_w = self.widget.intrinsic_width(display);
        let pref_h = self.widget.intrinsic_height(display);

        let left = cell_x + pad.left;
        let top = cell_y + pad.top;
        let h_center = cell_x + pad.left + (avail_w - pref_w) / 2;
        let h_right = cell_x + cell_w - pad.right - pref_w;
        let v_center = cell_y + pad.top + (avail_h - pref_h) / 2;
        let v_bottom = cell_y + cell_h - pad.bottom - pref_h;

        let (x, y, w, h) = match self.gravity {
            Gravity::Fill => (left, top, avail_w, avail_h),
            Gravity::Center => (h_center, v_center, pref_w, pref_h),
            Gravity::TopLeft => (left, top, pref_w, pref_h),
            Gravity::TopCenter => (h_center, top, pref_w, pref_h),
            Gravity::TopRight => (h_right, top, pref_w, pref_h),
            Gravity::CenterLeft => (left, v_center, pref_w, pref_h),
            Gravity::CenterRight => (h_right, v_center, pref_w, pref_h),
            Gravity::BottomLeft => (left, v_bottom, pref_w, pref_h),
            Gravity::BottomCenter => (h_center, v_bottom, pref_w, pref_h),
            Gravity::BottomRight => (h_right, v_bottom, pref_w, pref_h),
        };

        self.widget.core_mut().set_position(x, y);
        self.widget.core_mut().set_size(w, h);

        if self.widget.is_layout() {
            self.widget.core_mut().mark_layout_dirty();
        }

        trace!(
            "cell ({cell_x},{cell_y}) {cell_w}x{cell_h} -> widget ({x},{y}) {w}x{h} g={:?}",
            self.gravity
        );
    }

    pub(crate) fn draw(&mut self, display: &mut dyn DisplayInterface) {
        if self.widget.core().visible() {
            self.widget.draw(display);
        }
    }

    pub(crate) fn handle_touch(&mut self, x: i32, y: i32, pressed: bool) -> bool {
        self.widget.handle_touch(x, y, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DirectDisplay;
    use crate::testing::RecordingPanel;
    use crate::ui::widgets::CheckBox;

    fn place(gravity: Gravity, padding: Padding) -> (i32, i32, i32, i32) {
        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut cell = Cell::new(Widget::CheckBox(CheckBox::new(20)), gravity, 0.0);
        cell.set_padding(padding);
        cell.position_widget(0, 0, 100, 50, &mut display);
        let core = cell.widget().core();
        (core.x, core.y, core.w, core.h)
    }

    #[test]
    fn anchors_use_intrinsic_size() {
        assert_eq!(place(Gravity::TopLeft, Padding::default()), (0, 0, 20, 20));
        assert_eq!(place(Gravity::Center, Padding::default()), (40, 15, 20, 20));
        assert_eq!(
            place(Gravity::BottomRight, Padding::default()),
            (80, 30, 20, 20)
        );
        assert_eq!(
            place(Gravity::CenterRight, Padding::default()),
            (80, 15, 20, 20)
        );
        assert_eq!(
            place(Gravity::BottomCenter, Padding::default()),
            (40, 30, 20, 20)
        );
    }

    #[test]
    fn fill_ignores_intrinsic_size() {
        assert_eq!(place(Gravity::Fill, Padding::default()), (0, 0, 100, 50));
        assert_eq!(place(Gravity::Fill, Padding::all(5)), (5, 5, 90, 40));
    }

    #[test]
    fn padding_offsets_anchors() {
        assert_eq!(place(Gravity::TopLeft, Padding::all(5)), (5, 5, 20, 20));
        assert_eq!(
            place(Gravity::BottomRight, Padding::all(5)),
            (75, 25, 20, 20)
        );
        assert_eq!(
            place(Gravity::TopLeft, Padding::symmetric(8, 3)),
            (8, 3, 20, 20)
        );
        assert_eq!(
            place(Gravity::BottomRight, Padding::new(1, 2, 3, 4)),
            (77, 26, 20, 20)
        );
    }

    #[test]
    fn degenerate_cell_is_skipped() {
        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut cell = Cell::new(Widget::CheckBox(CheckBox::new(20)), Gravity::Fill, 0.0);
        cell.set_padding(Padding::all(60));
        // Padding eats the whole cell; geometry must stay untouched.
        cell.position_widget(0, 0, 100, 50, &mut display);
        let core = cell.widget().core();
        assert_eq!((core.x, core.y, core.w, core.h), (0, 0, 20, 20));
    }

    #[test]
    fn nested_layout_gets_layout_flag_instead_of_recursion() {
        use crate::ui::vertical::VerticalLayout;

        let mut display = DirectDisplay::new(RecordingPanel::new(320, 240));
        let mut inner = VerticalLayout::with_margins(0, 0, 0, 0, 0, 0);
        inner.core.layout_dirty = false;
        let mut cell = Cell::new(Widget::Vertical(inner), Gravity::Fill, 1.0);
        cell.position_widget(0, 0, 100, 50, &mut display);
        assert!(cell.widget().core().layout_dirty());
    }
}
