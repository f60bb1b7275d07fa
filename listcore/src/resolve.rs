use crate::HeightMode;
use crate::key::ListKey;
use crate::store::{PositionStore, Row};

/// What a single successful resolution changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placed {
    /// Change of the resolved total height.
    pub(crate) total_delta: i64,
    /// Change of the entry's recorded height (differs from `total_delta` on first resolution
    /// of an entry that already carried a height).
    pub(crate) height_delta: i64,
    /// The frontier entry that received a `translate_y`, if any.
    pub(crate) propagated: Option<usize>,
}

/// Lays out every row during a refresh and returns the resolved total height.
///
/// Rows form a chain from the top: a row is resolved when its height is known and its
/// predecessor is resolved. The first unresolved row gets its predecessor's bottom as
/// `translate_y`; rows after it stay unpositioned.
pub(crate) fn place_all<K: ListKey, T>(
    rows: &mut [Row<K, T>],
    store: &mut PositionStore<K>,
    mode: HeightMode,
    fixed_item_height: Option<u32>,
    window_size: usize,
) -> u64 {
    let mut total = 0u64;
    // Bottom of the previous row while the chain is unbroken. The content top is 0.
    let mut chain_bottom = Some(0u64);

    for (i, row) in rows.iter_mut().enumerate() {
        let declared = row.declared_height;
        store.ensure(row);
        if !mode.is_windowed() {
            store.set(row, |r| {
                r.reset_geometry();
                r.index = i;
                r.height = declared;
            });
            continue;
        }

        let known = declared
            .or_else(|| store.get(row).and_then(|r| r.height))
            .or(fixed_item_height);
        let placed_top = chain_bottom;
        store.set(row, |r| {
            r.index = i;
            r.order = Some(i % window_size);
            r.height = known;
            match (known, placed_top) {
                (Some(height), Some(top)) => r.place(top, height),
                _ => {
                    r.resolved = false;
                    r.translate_y = placed_top;
                    r.bottom = None;
                }
            }
        });

        chain_bottom = match (known, placed_top) {
            (Some(height), Some(top)) => {
                total = total.saturating_add(height as u64);
                Some(top.saturating_add(height as u64))
            }
            _ => None,
        };
    }
    total
}

/// Records a measured height for `rows[index]`.
///
/// Returns `None` when the predecessor has no bottom yet; the height is kept on the record
/// but the row stays unpositioned.
pub(crate) fn resolve_row<K: ListKey, T>(
    rows: &mut [Row<K, T>],
    store: &mut PositionStore<K>,
    index: usize,
    height: u32,
) -> Option<Placed> {
    let top = match index {
        0 => Some(0),
        _ => store
            .get(&rows[index - 1])
            .filter(|r| r.resolved)
            .and_then(|r| r.bottom),
    };

    let row = &mut rows[index];
    let previous = store.ensure(row);
    let Some(top) = top else {
        store.set(row, |r| r.height = Some(height));
        return None;
    };

    store.set(row, |r| r.place(top, height));
    let old_height = previous.height.unwrap_or(0) as i64;
    let total_delta = if previous.resolved {
        height as i64 - old_height
    } else {
        height as i64
    };

    let propagated = propagate_frontier(rows, store, index + 1);
    Some(Placed {
        total_delta,
        height_delta: height as i64 - old_height,
        propagated,
    })
}

/// First unresolved row at or after `from` whose immediate predecessor is resolved.
pub(crate) fn find_frontier<K: ListKey, T>(
    rows: &[Row<K, T>],
    store: &PositionStore<K>,
    from: usize,
) -> Option<usize> {
    let resolved = |i: usize| store.get(&rows[i]).is_some_and(|r| r.resolved);
    (from.max(1)..rows.len()).find(|&i| !resolved(i) && resolved(i - 1))
}

/// Moves the frontier exactly one step: the frontier row takes its predecessor's bottom as
/// `translate_y`. Rows further down are left alone.
fn propagate_frontier<K: ListKey, T>(
    rows: &mut [Row<K, T>],
    store: &mut PositionStore<K>,
    from: usize,
) -> Option<usize> {
    let frontier = find_frontier(rows, store, from)?;
    let top = store.get(&rows[frontier - 1]).and_then(|r| r.bottom);
    store.set(&mut rows[frontier], |r| r.translate_y = top);
    Some(frontier)
}
