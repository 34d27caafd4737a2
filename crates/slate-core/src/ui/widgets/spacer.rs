//! Invisible spacer occupying layout space.

use crate::ui::widget::WidgetCore;

/// Empty space. A flexible spacer reports zero intrinsic size and soaks up
/// leftover space through its cell weight; a fixed spacer contributes a
/// constant gap.
pub struct Spacer {
    pub core: WidgetCore,
    flexible: bool,
}

impl Spacer {
    pub fn flexible() -> Self {
        Self {
            core: WidgetCore::new(0, 0, 0, 0),
            flexible: true,
        }
    }

    pub fn fixed(size: i32) -> Self {
        Self {
            core: WidgetCore::new(0, 0, size, size),
            flexible: false,
        }
    }

    pub fn is_flexible(&self) -> bool {
        self.flexible
    }

    pub(crate) fn intrinsic_width(&self) -> i32 {
        if self.flexible { 0 } else { self.core.w }
    }

    pub(crate) fn intrinsic_height(&self) -> i32 {
        if self.flexible { 0 } else { self.core.h }
    }
}
