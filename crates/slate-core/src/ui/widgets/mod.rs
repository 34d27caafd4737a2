//! Leaf widgets: the visible building blocks of a status page.

mod button;
mod checkbox;
mod gauge;
mod hline;
mod label;
mod progress;
mod slider;
mod spacer;

pub use button::Button;
pub use checkbox::CheckBox;
pub use gauge::Gauge;
pub use hline::HorizontalLine;
pub use label::Label;
pub use progress::ProgressBar;
pub use slider::Slider;
pub use spacer::Spacer;

/// Inline text buffer used by captioned widgets. Long text is clipped
/// rather than reallocated; 64 characters covers a full row of the widest
/// supported panel.
pub type WidgetText = heapless::String<64>;

/// Copy `text` into a fixed buffer, clipping at capacity.
pub(crate) fn clip_text(text: &str) -> WidgetText {
    let mut out = WidgetText::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
