//! Retained-mode widget and layout framework.
//!
//! The tree is a closed set of widget variants (see [`Widget`]): leaves such
//! as labels, buttons and sliders, and three layout containers that own
//! their children through [`Cell`] wrappers. External page code builds a
//! tree once per page switch, hands it to [`UiApp`], and then only pushes
//! values (label text, progress, checked state) and touch events; the app
//! drives layout, dirty-gated redraw and the cache flush each frame.

pub mod app;
pub mod cell;
pub mod container;
pub mod horizontal;
pub mod panel;
pub mod theme;
pub mod vertical;
pub mod widget;
pub mod widgets;

pub use app::UiApp;
pub use cell::{Cell, Gravity, Padding};
pub use container::ContainerCore;
pub use horizontal::HorizontalLayout;
pub use panel::Panel;
pub use theme::Palette;
pub use vertical::VerticalLayout;
pub use widget::{Widget, WidgetCore};
pub use widgets::{
    Button, CheckBox, Gauge, HorizontalLine, Label, ProgressBar, Slider, Spacer,
};

/// Smallest main-axis extent a laid-out cell may receive.
pub const MIN_WIDGET_SIZE: i32 = 1;

/// Main-axis minimum granted to a nested layout that reports no intrinsic
/// size yet, so a row of buttons does not collapse before its first pass.
pub const MIN_LAYOUT_EXTENT: i32 = 44;

/// Extra width a button adds around its caption (10 px each side).
pub const BUTTON_PADDING_HORIZONTAL: i32 = 20;

/// Extra height a button adds around its caption (5 px top and bottom).
pub const BUTTON_PADDING_VERTICAL: i32 = 10;
