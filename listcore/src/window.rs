use crate::HeightMode;
use crate::key::ListKey;
use crate::prefix::HeightSums;
use crate::store::{PositionStore, Row};
use crate::{ScrollDirection, Window};

/// Inputs of one window computation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WindowQuery {
    pub(crate) offset: i64,
    pub(crate) lookahead: u32,
    pub(crate) cached_start: usize,
    pub(crate) direction: ScrollDirection,
    pub(crate) window_size: usize,
}

impl WindowQuery {
    /// The offset the window start is searched at, never above the content top.
    pub(crate) fn border_y(&self) -> u64 {
        let y = self.offset.saturating_sub(self.lookahead as i64);
        y.max(0) as u64
    }
}

pub(crate) fn compute_window<K: ListKey, T>(
    rows: &[Row<K, T>],
    store: &PositionStore<K>,
    sums: &HeightSums,
    mode: HeightMode,
    query: WindowQuery,
) -> Window {
    let len = rows.len();
    if !mode.is_windowed() {
        return Window {
            start_index: 0,
            end_index: len,
        };
    }
    if len == 0 {
        return Window::default();
    }

    let y = query.border_y();
    let start = match mode {
        // Spans are half-open here: an offset equal to an entry's bottom selects the next
        // entry, where the border scan would keep the entry itself. Either start is valid.
        HeightMode::Fixed => sums.index_at(y).unwrap_or(0),
        _ => scan_for_border(rows, store, y, query.cached_start, query.direction),
    };

    // Keep the window full whenever there are enough entries.
    let start = start.min(len.saturating_sub(query.window_size));
    Window {
        start_index: start,
        end_index: start.saturating_add(query.window_size).min(len),
    }
}

/// Walks from the cached start towards the scroll direction until it meets a border entry.
///
/// Small scroll deltas therefore cost a few steps; a jump to an arbitrary offset degrades to a
/// linear walk. When no border is found the cached start is kept.
fn scan_for_border<K: ListKey, T>(
    rows: &[Row<K, T>],
    store: &PositionStore<K>,
    y: u64,
    cached_start: usize,
    direction: ScrollDirection,
) -> usize {
    let cached = cached_start.min(rows.len() - 1);
    let found = if direction == ScrollDirection::Down || cached == 0 {
        (cached..rows.len()).find(|&i| is_border(&rows[i], store, y))
    } else {
        (0..=cached).rev().find(|&i| is_border(&rows[i], store, y))
    };
    found.unwrap_or(cached)
}

/// An entry is a border when it straddles `y` or when its position is still unknown.
fn is_border<K: ListKey, T>(row: &Row<K, T>, store: &PositionStore<K>, y: u64) -> bool {
    let Some(record) = store.get(row) else {
        return true;
    };
    if !record.resolved {
        return true;
    }
    match (record.translate_y, record.bottom) {
        (Some(top), Some(bottom)) => top <= y && y <= bottom,
        _ => true,
    }
}
