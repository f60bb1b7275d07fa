use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::key::{KeyMap, ListKey};
use crate::prefix::HeightSums;
use crate::resolve::{self, Placed};
use crate::store::{Placement, PositionStore, Row};
use crate::window::{self, WindowQuery};
use crate::{
    Entry, HeightMode, ItemKey, ListError, ListOptions, MeasuredHeight, PositionRecord, Refresh,
    RefreshOutcome, Resolution, ScrollDirection, VisibleItem, Window,
};

/// A headless windowing engine for long or infinite lists.
///
/// The engine decides which entries are live, where each one sits vertically and how much
/// content height is known so far. It never measures or paints anything:
/// - the caller hands it a data source via [`ListEngine::refresh`],
/// - reports scroll offsets via [`ListEngine::on_scroll_to`],
/// - reports measured heights via [`ListEngine::resolve_item`].
///
/// Every state change that alters the output is published through the `on_change` callback.
#[derive(Clone, Debug)]
pub struct ListEngine<K, T> {
    options: ListOptions<K, T>,

    rows: Vec<Row<K, T>>,
    index_by_key: KeyMap<K, usize>,
    store: PositionStore<K>,
    sums: HeightSums,
    mode: HeightMode,

    offset: i64,
    direction: ScrollDirection,
    window: Window,
    visible: Vec<VisibleItem<K, T>>,
    total_height: u64,
    last_outcome: RefreshOutcome,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<K: ListKey, T: Clone> ListEngine<K, T> {
    /// Creates an engine and runs the first refresh with `options`.
    pub fn new<E: Into<Entry<K, T>>>(
        options: ListOptions<K, T>,
        data: impl IntoIterator<Item = E>,
    ) -> Result<Self, ListError> {
        vdebug!(
            infinite = options.infinite,
            window_size = options.window_size,
            lookahead = options.lookahead,
            "ListEngine::new"
        );
        let offset = options.initial_offset;
        let mut engine = Self {
            options,
            rows: Vec::new(),
            index_by_key: KeyMap::new(),
            store: PositionStore::new(),
            sums: HeightSums::default(),
            mode: HeightMode::default(),
            offset,
            direction: ScrollDirection::default(),
            window: Window::default(),
            visible: Vec::new(),
            total_height: 0,
            last_outcome: RefreshOutcome::default(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        };
        // The outcome stays readable through `last_refresh_outcome`.
        let _ = engine.refresh(data, Refresh::default().with_offset(offset))?;
        Ok(engine)
    }

    pub fn options(&self) -> &ListOptions<K, T> {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&[VisibleItem<K, T>], u64) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    /// Changes the lookahead margin. Takes effect on the next window computation.
    pub fn set_lookahead(&mut self, lookahead: u32) {
        self.options.lookahead = lookahead;
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.visible, self.total_height);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Runs `f` and publishes at most one `on_change` notification at the end.
    ///
    /// Useful when a renderer reports several measurements in one frame.
    pub fn batch_update<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        let out = f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
        out
    }

    /// Replaces the data source and recomputes mode, direction, window and total height.
    ///
    /// Position records of keys that survive the refresh are reused, so measured heights are
    /// not lost. `params.refresh_all` discards them instead and every entry without a declared
    /// height goes back to unresolved.
    ///
    /// Fails without touching any state when the data source is empty, when an infinite list
    /// contains an entry without a key, or when an infinite list repeats a key.
    pub fn refresh<E: Into<Entry<K, T>>>(
        &mut self,
        data: impl IntoIterator<Item = E>,
        params: Refresh,
    ) -> Result<RefreshOutcome, ListError> {
        let window_size = params.window_size.unwrap_or(self.options.window_size);
        let infinite = params.infinite.unwrap_or(self.options.infinite);
        let offset = params.offset.unwrap_or(self.offset);
        if window_size == 0 {
            return Err(ListError::ZeroWindowSize);
        }

        let (rows, index_by_key, generated) = self.normalize(data, infinite)?;

        self.options.window_size = window_size;
        self.options.infinite = infinite;
        self.rows = rows;
        self.index_by_key = index_by_key;

        if params.refresh_all {
            for row in self.rows.iter_mut() {
                self.store.set(row, PositionRecord::reset_geometry);
            }
        }

        self.mode = HeightMode::detect(
            &self.rows,
            &self.store,
            self.options.fixed_item_height,
            infinite,
        );
        self.total_height = resolve::place_all(
            &mut self.rows,
            &mut self.store,
            self.mode,
            self.options.fixed_item_height,
            window_size,
        );
        self.rebuild_sums();

        self.direction = ScrollDirection::between(self.offset, offset);
        self.offset = offset;
        self.window = self.compute_window(self.window.start_index);
        self.materialize();

        vdebug!(
            len = self.rows.len(),
            mode = ?self.mode,
            start = self.window.start_index,
            end = self.window.end_index,
            total_height = self.total_height,
            refresh_all = params.refresh_all,
            "refresh"
        );
        if generated > 0 {
            vwarn!(
                generated,
                "entries without a key received generated keys; give every entry a unique key to avoid full re-renders"
            );
        }

        self.last_outcome = RefreshOutcome {
            generated_keys: generated,
        };
        self.notify();
        Ok(self.last_outcome)
    }

    /// Refreshes with a new data source, keeping window size, offset and mode.
    pub fn refresh_with<E: Into<Entry<K, T>>>(
        &mut self,
        data: impl IntoIterator<Item = E>,
    ) -> Result<RefreshOutcome, ListError> {
        self.refresh(data, Refresh::default())
    }

    /// Validates and converts a data source into rows without touching engine state.
    #[allow(clippy::type_complexity)]
    fn normalize<E: Into<Entry<K, T>>>(
        &self,
        data: impl IntoIterator<Item = E>,
        infinite: bool,
    ) -> Result<(Vec<Row<K, T>>, KeyMap<K, usize>, usize), ListError> {
        let data = data.into_iter();
        let mut rows = Vec::with_capacity(data.size_hint().0);
        let mut index_by_key = KeyMap::new();
        // Generated keys count unkeyed entries from 0, so an unchanged data source maps onto
        // the same keys and records on every refresh.
        let mut next_id = 0u64;

        for (index, entry) in data.enumerate() {
            let entry: Entry<K, T> = entry.into();
            let row = match entry {
                Entry::Item(item) => {
                    let key = match item.key {
                        Some(key) => ItemKey::User(key),
                        None if infinite => return Err(ListError::MissingIdentity { index }),
                        None => {
                            let key = ItemKey::Generated(next_id);
                            next_id = next_id.saturating_add(1);
                            key
                        }
                    };
                    Row {
                        key,
                        declared_height: item.height,
                        payload: item.payload,
                        placement: Placement::Table,
                    }
                }
                Entry::Marker(marker) => {
                    let key = ItemKey::User(marker.key);
                    let record = self.previous_marker_record(&key).unwrap_or_default();
                    Row {
                        key,
                        declared_height: marker.height,
                        payload: marker.payload,
                        placement: Placement::Inline(record),
                    }
                }
            };

            if index_by_key.contains_key(&row.key) {
                if infinite {
                    return Err(ListError::DuplicateKey { index });
                }
                vwarn!(index, "duplicate key in data source; lookups resolve to the first entry");
            } else {
                index_by_key.insert(row.key.clone(), index);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(ListError::EmptyDataSource);
        }
        let generated = next_id as usize;
        Ok((rows, index_by_key, generated))
    }

    fn previous_marker_record(&self, key: &ItemKey<K>) -> Option<PositionRecord> {
        let &index = self.index_by_key.get(key)?;
        match &self.rows.get(index)?.placement {
            Placement::Inline(record) => Some(*record),
            Placement::Table => None,
        }
    }

    /// Moves the scroll offset and recomputes the window.
    ///
    /// `manually` marks a jump that did not come from incremental scrolling; the window search
    /// then starts from the top instead of the cached start index.
    ///
    /// Returns `true` when a change was published: the start index moved, or the offset came
    /// back to the origin.
    pub fn on_scroll_to(&mut self, offset: i64, manually: bool) -> bool {
        let prev_offset = self.offset;
        let prev_window = self.window;
        self.direction = ScrollDirection::between(prev_offset, offset);
        self.offset = offset;

        if !self.mode.is_windowed() {
            return false;
        }

        let cached_start = if manually { 0 } else { prev_window.start_index };
        self.window = self.compute_window(cached_start);
        if self.window != prev_window {
            self.materialize();
        }

        let changed = self.window.start_index != prev_window.start_index
            || (offset == 0 && prev_offset != 0);
        vtrace!(
            offset,
            manually,
            start = self.window.start_index,
            changed,
            "on_scroll_to"
        );
        if changed {
            self.notify();
        }
        changed
    }

    /// Records the measured height of the entry identified by `key`.
    ///
    /// The entry is placed directly below its predecessor and the total height changes by the
    /// height difference (the full height on first resolution). The next unresolved entry then
    /// receives its `translate_y`, one step per call.
    ///
    /// When the predecessor has no placement yet the measurement is kept but the entry stays
    /// unpositioned; this returns [`Resolution::Deferred`] and publishes nothing.
    pub fn resolve_item(
        &mut self,
        key: impl Into<ItemKey<K>>,
        height: u32,
    ) -> Result<Resolution, ListError> {
        let key = key.into();
        let &index = self.index_by_key.get(&key).ok_or(ListError::UnknownKey)?;

        let Some(placed) = resolve::resolve_row(&mut self.rows, &mut self.store, index, height)
        else {
            vtrace!(index, height, "resolve_item deferred");
            self.refresh_visible(index);
            return Ok(Resolution::Deferred);
        };

        let Placed {
            total_delta,
            height_delta,
            propagated,
        } = placed;
        self.total_height = self.total_height.saturating_add_signed(total_delta);
        if self.mode == HeightMode::Fixed {
            self.sums.add(index, height_delta);
        }

        self.refresh_visible(index);
        if let Some(frontier) = propagated {
            self.refresh_visible(frontier);
        }

        vtrace!(
            index,
            height,
            total_delta,
            frontier = ?propagated,
            total_height = self.total_height,
            "resolve_item"
        );
        self.notify();
        Ok(Resolution::Resolved { delta: total_delta })
    }

    /// Copies the current record of `rows[index]` into the materialized window, if live.
    fn refresh_visible(&mut self, index: usize) {
        if !self.window.contains(index) {
            return;
        }
        let Some(record) = self.store.get(&self.rows[index]).copied() else {
            return;
        };
        if let Some(item) = self.visible.get_mut(index - self.window.start_index) {
            item.position = record;
        }
    }

    fn compute_window(&self, cached_start: usize) -> Window {
        window::compute_window(
            &self.rows,
            &self.store,
            &self.sums,
            self.mode,
            WindowQuery {
                offset: self.offset,
                lookahead: self.options.lookahead,
                cached_start,
                direction: self.direction,
                window_size: self.options.window_size,
            },
        )
    }

    fn materialize(&mut self) {
        let Window {
            start_index,
            end_index,
        } = self.window;
        let store = &self.store;
        self.visible.clear();
        self.visible
            .extend(self.rows[start_index..end_index].iter().map(|row| VisibleItem {
                key: row.key.clone(),
                is_marker: row.is_marker(),
                position: store.get(row).copied().unwrap_or_default(),
                payload: row.payload.clone(),
            }));
    }

    fn rebuild_sums(&mut self) {
        self.sums = if self.mode == HeightMode::Fixed {
            let store = &self.store;
            HeightSums::from_heights(
                self.rows
                    .iter()
                    .map(|row| store.get(row).and_then(|r| r.height).unwrap_or(0)),
            )
        } else {
            HeightSums::default()
        };
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn start_index(&self) -> usize {
        self.window.start_index
    }

    pub fn end_index(&self) -> usize {
        self.window.end_index
    }

    /// The materialized window: live entries with their geometry merged in.
    pub fn visible_items(&self) -> &[VisibleItem<K, T>] {
        &self.visible
    }

    /// Sum of the heights of all resolved entries.
    pub fn total_height(&self) -> u64 {
        self.total_height
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn height_mode(&self) -> HeightMode {
        self.mode
    }

    pub fn is_height_fixed(&self) -> bool {
        self.mode.is_fixed()
    }

    pub fn is_infinite(&self) -> bool {
        self.options.infinite
    }

    pub fn window_size(&self) -> usize {
        self.options.window_size
    }

    pub fn index_of(&self, key: impl Into<ItemKey<K>>) -> Option<usize> {
        self.index_by_key.get(&key.into()).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<&ItemKey<K>> {
        self.rows.get(index).map(|row| &row.key)
    }

    pub fn is_marker_at(&self, index: usize) -> bool {
        self.rows.get(index).is_some_and(|row| row.is_marker())
    }

    pub fn payload_at(&self, index: usize) -> Option<&T> {
        self.rows.get(index).map(|row| &row.payload)
    }

    pub fn position_at(&self, index: usize) -> Option<PositionRecord> {
        let row = self.rows.get(index)?;
        self.store.get(row).copied()
    }

    pub fn position(&self, key: impl Into<ItemKey<K>>) -> Option<PositionRecord> {
        self.position_at(self.index_of(key)?)
    }

    pub fn is_resolved(&self, key: impl Into<ItemKey<K>>) -> bool {
        self.position(key).is_some_and(|r| r.resolved)
    }

    /// Outcome of the most recent successful refresh, including the one run by
    /// [`ListEngine::new`].
    pub fn last_refresh_outcome(&self) -> RefreshOutcome {
        self.last_outcome
    }

    /// Content offset of the top of `rows[index]`, e.g. to scroll an entry into view.
    ///
    /// Fixed-height lists answer from the prefix sums, so the result follows re-measured entries
    /// before the next refresh rewrites stored positions. Other lists report the entry's
    /// `translate_y`.
    pub fn offset_of_index(&self, index: usize) -> Option<u64> {
        if index >= self.rows.len() {
            return None;
        }
        if self.mode == HeightMode::Fixed {
            return Some(self.sums.prefix_sum(index));
        }
        self.position_at(index).and_then(|r| r.translate_y)
    }

    /// Index of the first unresolved entry whose predecessor is resolved.
    pub fn frontier(&self) -> Option<usize> {
        resolve::find_frontier(&self.rows, &self.store, 1)
    }

    /// Exports measured heights of resolved, caller-owned entries (useful for persistence).
    pub fn export_measurements(&self) -> Vec<MeasuredHeight<K>> {
        let mut out = Vec::new();
        self.store.for_each(|key, record| {
            if let (true, Some(height)) = (record.resolved, record.height) {
                out.push(MeasuredHeight {
                    key: key.clone(),
                    height,
                });
            }
        });
        out
    }

    /// Seeds the position table with previously measured heights and returns how many were
    /// stored.
    ///
    /// Heights are picked up by the next [`ListEngine::refresh`]; current geometry is left as is.
    /// Entries that are already resolved keep their measured height.
    pub fn import_measurements(
        &mut self,
        entries: impl IntoIterator<Item = MeasuredHeight<K>>,
    ) -> usize {
        let store = &mut self.store;
        let seeded = entries
            .into_iter()
            .filter(|MeasuredHeight { key, height }| store.seed_height(key.clone(), *height))
            .count();
        vdebug!(seeded, "import_measurements");
        seeded
    }

    /// Number of records in the position table, including unreachable ones.
    pub fn position_table_len(&self) -> usize {
        self.store.len()
    }

    /// Drops position records whose keys are no longer in the data source.
    pub fn prune_positions(&mut self) {
        let index_by_key = &self.index_by_key;
        self.store.retain_keys(|key| index_by_key.contains_key(key));
    }
}
