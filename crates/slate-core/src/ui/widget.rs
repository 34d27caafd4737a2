//! Widget base state and the closed widget type.

use crate::display::{DisplayInterface, FALLBACK_CHAR_WIDTH, FALLBACK_LINE_HEIGHT};
use crate::ui::horizontal::HorizontalLayout;
use crate::ui::panel::Panel;
use crate::ui::vertical::VerticalLayout;
use crate::ui::widgets::{
    Button, CheckBox, Gauge, HorizontalLine, Label, ProgressBar, Slider, Spacer,
};

/// Geometry, visibility and dirty state shared by every widget.
///
/// `dirty` means "needs repaint"; `layout_dirty` means "geometry is stale".
/// The two are deliberately separate: a label changing text repaints without
/// forcing its container to redistribute space.
#[derive(Debug, Clone, Copy)]
pub struct WidgetCore {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    visible: bool,
    dirty: bool,
    pub(crate) layout_dirty: bool,
}

impl WidgetCore {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            visible: true,
            dirty: true,
            layout_dirty: true,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.dirty = true;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.w = w;
        self.h = h;
        self.dirty = true;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.dirty = true;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Whether `(px, py)` lies within this widget's bounds.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    pub fn layout_dirty(&self) -> bool {
        self.layout_dirty
    }
}

/// Measure text width with real panel metrics, falling back to the classic
/// 6 px-per-character estimate when the driver reports nothing useful.
pub(crate) fn measure_text_width(
    display: &mut dyn DisplayInterface,
    text: &str,
    text_size: u8,
) -> i32 {
    display.set_text_size(text_size);
    let w = display.text_width(text);
    if w > 0 {
        w
    } else {
        text.chars().count() as i32 * FALLBACK_CHAR_WIDTH * text_size.max(1) as i32
    }
}

/// Measure line height with real panel metrics, with an 8 px fallback.
pub(crate) fn measure_text_height(display: &mut dyn DisplayInterface, text_size: u8) -> i32 {
    display.set_text_size(text_size);
    let h = display.font_height();
    if h > 0 {
        h
    } else {
        FALLBACK_LINE_HEIGHT * text_size.max(1) as i32
    }
}

/// Every widget the framework knows how to lay out, draw and touch.
///
/// A closed sum type instead of trait objects: containers need to recover
/// concrete layout types during recalculation, and the set of widgets is
/// fixed by design.
pub enum Widget {
    Label(Label),
    Button(Button),
    CheckBox(CheckBox),
    Slider(Slider),
    ProgressBar(ProgressBar),
    Gauge(Gauge),
    HorizontalLine(HorizontalLine),
    Spacer(Spacer),
    Vertical(VerticalLayout),
    Horizontal(HorizontalLayout),
    Panel(Panel),
}

macro_rules! each_widget {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            Widget::Label($w) => $body,
            Widget::Button($w) => $body,
            Widget::CheckBox($w) => $body,
            Widget::Slider($w) => $body,
            Widget::ProgressBar($w) => $body,
            Widget::Gauge($w) => $body,
            Widget::HorizontalLine($w) => $body,
            Widget::Spacer($w) => $body,
            Widget::Vertical($w) => $body,
            Widget::Horizontal($w) => $body,
            Widget::Panel($w) => $body,
        }
    };
}

impl Widget {
    pub fn core(&self) -> &WidgetCore {
        each_widget!(self, w => &w.core)
    }

    pub fn core_mut(&mut self) -> &mut WidgetCore {
        each_widget!(self, w => &mut w.core)
    }

    /// Whether this variant participates in layout recalculation.
    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            Widget::Vertical(_) | Widget::Horizontal(_) | Widget::Panel(_)
        )
    }

    /// Content-based preferred width; stored width for plain widgets.
    pub fn intrinsic_width(&self, display: &mut dyn DisplayInterface) -> i32 {
        match self {
            Widget::Label(l) => l.intrinsic_width(display),
            Widget::Button(b) => b.intrinsic_width(display),
            Widget::Spacer(s) => s.intrinsic_width(),
            _ => self.core().w,
        }
    }

    /// Content-based preferred height; stored height for plain widgets.
    pub fn intrinsic_height(&self, display: &mut dyn DisplayInterface) -> i32 {
        match self {
            Widget::Label(l) => l.intrinsic_height(display),
            Widget::Button(b) => b.intrinsic_height(display),
            Widget::Spacer(s) => s.intrinsic_height(),
            Widget::Horizontal(h) => h.intrinsic_height(display),
            _ => self.core().h,
        }
    }

    /// Redraw this widget if it is visible and dirty. Containers refresh
    /// their layout first, then let children gate themselves.
    pub fn draw(&mut self, display: &mut dyn DisplayInterface) {
        match self {
            Widget::Label(l) => l.draw(display),
            Widget::Button(b) => b.draw(display),
            Widget::CheckBox(c) => c.draw(display),
            Widget::Slider(s) => s.draw(display),
            Widget::ProgressBar(p) => p.draw(display),
            Widget::Gauge(g) => g.draw(display),
            Widget::HorizontalLine(l) => l.draw(display),
            Widget::Spacer(_) => {}
            Widget::Vertical(l) => l.draw(display),
            Widget::Horizontal(l) => l.draw(display),
            Widget::Panel(p) => p.draw(display),
        }
    }

    /// Dispatch a touch event. Containers broadcast to every child with no
    /// z-order short-circuit; overlapping widgets all see the event.
    ///
    /// Returns whether any widget state changed (a click fired, a checkbox
    /// toggled, a slider moved), so the caller knows a repaint is due.
    pub fn handle_touch(&mut self, x: i32, y: i32, pressed: bool) -> bool {
        match self {
            Widget::Button(b) => b.handle_touch(x, y, pressed),
            Widget::CheckBox(c) => c.handle_touch(x, y, pressed),
            Widget::Slider(s) => s.handle_touch(x, y, pressed),
            Widget::Vertical(l) => l.children.handle_touch(x, y, pressed),
            Widget::Horizontal(l) => l.children.handle_touch(x, y, pressed),
            Widget::Panel(p) => p.children.handle_touch(x, y, pressed),
            _ => false,
        }
    }

    /// Whether this widget or any nested layout container needs its
    /// geometry recomputed. Leaf dirtiness does not count; only containers
    /// redistribute space.
    pub fn layout_tree_dirty(&self) -> bool {
        match self {
            Widget::Vertical(l) => {
                l.core.layout_dirty || l.children.changed || l.children.any_child_layout_dirty()
            }
            Widget::Horizontal(l) => {
                l.core.layout_dirty || l.children.changed || l.children.any_child_layout_dirty()
            }
            Widget::Panel(p) => {
                p.core.layout_dirty || p.children.changed || p.children.any_child_layout_dirty()
            }
            _ => false,
        }
    }

    /// Recompute stale layout anywhere in this subtree.
    pub fn update_layout_if_needed(&mut self, display: &mut dyn DisplayInterface) {
        match self {
            Widget::Vertical(l) => l.update_layout_if_needed(display),
            Widget::Horizontal(l) => l.update_layout_if_needed(display),
            Widget::Panel(p) => p.update_layout_if_needed(display),
            _ => {}
        }
    }

    pub fn as_vertical_mut(&mut self) -> Option<&mut VerticalLayout> {
        match self {
            Widget::Vertical(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_horizontal_mut(&mut self) -> Option<&mut HorizontalLayout> {
        match self {
            Widget::Horizontal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_panel_mut(&mut self) -> Option<&mut Panel> {
        match self {
            Widget::Panel(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Widget::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Widget::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_checkbox_mut(&mut self) -> Option<&mut CheckBox> {
        match self {
            Widget::CheckBox(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_slider_mut(&mut self) -> Option<&mut Slider> {
        match self {
            Widget::Slider(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_progress_bar_mut(&mut self) -> Option<&mut ProgressBar> {
        match self {
            Widget::ProgressBar(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_gauge_mut(&mut self) -> Option<&mut Gauge> {
        match self {
            Widget::Gauge(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Label> for Widget {
    fn from(w: Label) -> Self {
        Widget::Label(w)
    }
}

impl From<Button> for Widget {
    fn from(w: Button) -> Self {
        Widget::Button(w)
    }
}

impl From<CheckBox> for Widget {
    fn from(w: CheckBox) -> Self {
        Widget::CheckBox(w)
    }
}

impl From<Slider> for Widget {
    fn from(w: Slider) -> Self {
        Widget::Slider(w)
    }
}

impl From<ProgressBar> for Widget {
    fn from(w: ProgressBar) -> Self {
        Widget::ProgressBar(w)
    }
}

impl From<Gauge> for Widget {
    fn from(w: Gauge) -> Self {
        Widget::Gauge(w)
    }
}

impl From<HorizontalLine> for Widget {
    fn from(w: HorizontalLine) -> Self {
        Widget::HorizontalLine(w)
    }
}

impl From<Spacer> for Widget {
    fn from(w: Spacer) -> Self {
        Widget::Spacer(w)
    }
}

impl From<VerticalLayout> for Widget {
    fn from(w: VerticalLayout) -> Self {
        Widget::Vertical(w)
    }
}

impl From<HorizontalLayout> for Widget {
    fn from(w: HorizontalLayout) -> Self {
        Widget::Horizontal(w)
    }
}

impl From<Panel> for Widget {
    fn from(w: Panel) -> Self {
        Widget::Panel(w)
    }
}
