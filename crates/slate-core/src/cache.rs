//! Run-length-encoded pixel cache with per-row dirty tracking.
//!
//! Widget drawing is scanline-dominated, so each row is stored as a sorted
//! list of runs that exactly covers `[0, width)`. Writes split the covering
//! run around the touched span and merge with same-color neighbours, which
//! keeps run counts low for typical UI content. Colors are deduplicated in a
//! table keyed by their raw RGB565 value and referenced by a 16-bit id, so
//! memory scales with distinct colors rather than pixels.
//!
//! Every public call executes under one call-scoped lock, making the cache
//! safe to use from multiple preemptively scheduled execution contexts (the
//! UI loop and e.g. a status task both painting). There is no atomicity
//! guarantee across separate calls.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, trace};

use crate::display::PanelDriver;

/// Index into the cache's color table.
pub type ColorId = u16;

/// Hard cap on distinct colors per cache; ids beyond this are never issued.
const MAX_COLORS: usize = 65_535;

/// Contiguous span of same-colored pixels within one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: u16,
    len: u16,
    color: ColorId,
}

impl Run {
    #[inline]
    fn end(&self) -> u32 {
        self.start as u32 + self.len as u32
    }
}

/// One row of the cache: covering runs plus the dirty flag.
struct Row {
    runs: Vec<Run>,
    dirty: bool,
}

struct CacheState {
    rows: Vec<Row>,
    /// Raw RGB565 value -> color id, for deduplication.
    color_ids: BTreeMap<u16, ColorId>,
    /// Color id -> color, for resolution. Ids are stable for the cache's
    /// lifetime; `clear()` resets rows, not this table.
    colors: Vec<Rgb565>,
}

/// Compressed, mutable store of W×H pixels.
///
/// All methods take `&self`; interior state is protected by a critical
/// section so the cache can be shared between display adapters and tasks.
pub struct PixelCache {
    width: u16,
    height: u16,
    state: Mutex<CriticalSectionRawMutex, RefCell<CacheState>>,
}

impl PixelCache {
    /// Create a cache for a `width` × `height` panel, filled with black.
    ///
    /// All rows start dirty so the first flush repaints the whole panel.
    pub fn new(width: u16, height: u16) -> Self {
        let mut state = CacheState {
            rows: Vec::with_capacity(height as usize),
            color_ids: BTreeMap::new(),
            colors: Vec::new(),
        };
        let background = intern(&mut state, Rgb565::BLACK).unwrap_or(0);
        for _ in 0..height {
            let mut runs = Vec::new();
            if width > 0 {
                runs.push(Run {
                    start: 0,
                    len: width,
                    color: background,
                });
            }
            state.rows.push(Row { runs, dirty: true });
        }
        Self {
            width,
            height,
            state: Mutex::new(RefCell::new(state)),
        }
    }

    /// Panel width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Panel height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut CacheState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Set a single pixel. Out-of-range coordinates are ignored.
    ///
    /// Writing a pixel that already has the requested color is a no-op and
    /// does not dirty the row.
    pub fn set_pixel(&self, x: i32, y: i32, color: Rgb565) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.with_state(|s| {
            let Some(id) = intern(s, color) else { return };
            let row = &mut s.rows[y as usize];
            if write_span(&mut row.runs, x as u16, x as u16 + 1, id) {
                row.dirty = true;
            }
        });
    }

    /// Fill a rectangle, clamped to the panel bounds, under a single lock.
    pub fn fill_rect(&self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0).min(self.width as i32) as u16;
        let x1 = (x.saturating_add(w)).max(0).min(self.width as i32) as u16;
        let y0 = y.max(0).min(self.height as i32) as usize;
        let y1 = (y.saturating_add(h)).max(0).min(self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        self.with_state(|s| {
            let Some(id) = intern(s, color) else { return };
            for row in &mut s.rows[y0..y1] {
                if write_span(&mut row.runs, x0, x1, id) {
                    row.dirty = true;
                }
            }
        });
    }

    /// Color of the pixel at `(x, y)`; out-of-range returns black.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgb565 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return Rgb565::BLACK;
        }
        self.with_state(|s| {
            let runs = &s.rows[y as usize].runs;
            let idx = runs.partition_point(|r| r.end() <= x as u32);
            match runs.get(idx) {
                Some(run) => s.colors[run.color as usize],
                None => Rgb565::BLACK,
            }
        })
    }

    /// Whether `row` changed since it was last flushed or marked clean.
    pub fn is_row_dirty(&self, row: i32) -> bool {
        if row < 0 || row >= self.height as i32 {
            return false;
        }
        self.with_state(|s| s.rows[row as usize].dirty)
    }

    /// Reset a row's dirty flag after it has been pushed downstream.
    pub fn mark_row_clean(&self, row: i32) {
        if row < 0 || row >= self.height as i32 {
            return;
        }
        self.with_state(|s| s.rows[row as usize].dirty = false);
    }

    /// Force a row to be included in the next flush.
    pub fn mark_row_dirty(&self, row: i32) {
        if row < 0 || row >= self.height as i32 {
            return;
        }
        self.with_state(|s| s.rows[row as usize].dirty = true);
    }

    /// Reset every row to one full-width run of `color` and mark all rows
    /// dirty. Row storage is truncated in place, not returned to the
    /// allocator, so a steady-state redraw cycle allocates nothing.
    pub fn clear(&self, color: Rgb565) {
        if self.width == 0 {
            return;
        }
        self.with_state(|s| {
            let Some(id) = intern(s, color) else { return };
            let width = self.width;
            for row in &mut s.rows {
                row.runs.clear();
                row.runs.push(Run {
                    start: 0,
                    len: width,
                    color: id,
                });
                row.dirty = true;
            }
        });
        trace!("cache cleared to {:?}", color);
    }

    /// Flush all dirty rows to the real panel driver, ascending.
    ///
    /// Dirty rows are snapshotted and marked clean under one lock, so the
    /// emitted pixels match `get_pixel` as observed at entry even if another
    /// context keeps painting while the panel transfer runs.
    pub fn flush(&self, panel: &mut dyn PanelDriver) {
        let batches: Vec<(u16, Vec<(u16, u16, Rgb565)>)> = self.with_state(|s| {
            let CacheState { rows, colors, .. } = s;
            let mut out = Vec::new();
            for (y, row) in rows.iter_mut().enumerate() {
                if !row.dirty {
                    continue;
                }
                let spans = row
                    .runs
                    .iter()
                    .map(|r| (r.start, r.len, colors[r.color as usize]))
                    .collect();
                out.push((y as u16, spans));
                row.dirty = false;
            }
            out
        });

        if batches.is_empty() {
            return;
        }
        for (y, spans) in &batches {
            for &(x, len, color) in spans {
                panel.fill_rect(x as i32, *y as i32, len as i32, 1, color);
            }
        }
        debug!("flushed {} dirty rows", batches.len());
    }

    /// Snapshot of a row's runs as `(start, len, color)`, for assertions.
    #[cfg(test)]
    fn row_runs(&self, y: usize) -> Vec<(u16, u16, Rgb565)> {
        self.with_state(|s| {
            s.rows[y]
                .runs
                .iter()
                .map(|r| (r.start, r.len, s.colors[r.color as usize]))
                .collect()
        })
    }

    /// Number of distinct colors registered so far.
    #[cfg(test)]
    fn color_count(&self) -> usize {
        self.with_state(|s| s.colors.len())
    }
}

/// Resolve `color` to its id, registering it on first use.
///
/// Returns `None` when the table is full or storage cannot grow; the caller
/// drops the write rather than aborting.
fn intern(state: &mut CacheState, color: Rgb565) -> Option<ColorId> {
    let raw = color.into_storage();
    if let Some(&id) = state.color_ids.get(&raw) {
        return Some(id);
    }
    if state.colors.len() >= MAX_COLORS || state.colors.try_reserve(1).is_err() {
        return None;
    }
    let id = state.colors.len() as ColorId;
    state.colors.push(color);
    state.color_ids.insert(raw, id);
    Some(id)
}

/// Overwrite `[x0, x1)` of a covering run list with `color`.
///
/// Splits the first and last overlapped runs around the span (at most two
/// remainder runs survive), then widens the new run over any adjacent
/// same-color neighbour so no two adjacent runs share a color id. Returns
/// whether any pixel actually changed.
///
/// Callers guarantee `x0 < x1 <= width` and that `runs` covers the row.
fn write_span(runs: &mut Vec<Run>, x0: u16, x1: u16, color: ColorId) -> bool {
    let i = runs.partition_point(|r| r.end() <= x0 as u32);
    let j = runs.partition_point(|r| r.end() < x1 as u32);
    if i == j && runs[i].color == color {
        // Span already uniformly this color.
        return false;
    }

    let first = runs[i];
    let last = runs[j];

    // Remainders keep the old color; when the boundary run already has the
    // new color the span simply absorbs it instead.
    let left_rem = (first.color != color && first.start < x0).then(|| Run {
        start: first.start,
        len: x0 - first.start,
        color: first.color,
    });
    let right_rem = (last.color != color && (x1 as u32) < last.end()).then(|| Run {
        start: x1,
        len: (last.end() - x1 as u32) as u16,
        color: last.color,
    });

    let mut new_start = if first.color == color { first.start } else { x0 };
    let mut new_end = if last.color == color { last.end() } else { x1 as u32 };
    let mut lo = i;
    let mut hi = j;

    // Merge with the run just before / after the span when it touches and
    // shares the color.
    if left_rem.is_none() && lo > 0 && runs[lo - 1].color == color {
        lo -= 1;
        new_start = runs[lo].start;
    }
    if right_rem.is_none() && hi + 1 < runs.len() && runs[hi + 1].color == color {
        hi += 1;
        new_end = runs[hi].end();
    }

    let merged = Run {
        start: new_start,
        len: (new_end - new_start as u32) as u16,
        color,
    };

    // The replacement can be one run longer than what it removes; degrade to
    // a dropped write if storage cannot grow.
    if runs.try_reserve(2).is_err() {
        return false;
    }
    runs.splice(
        lo..=hi,
        left_rem
            .into_iter()
            .chain(core::iter::once(merged))
            .chain(right_rem),
    );
    true
}
