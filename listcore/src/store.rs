use crate::key::{KeyMap, ListKey};
use crate::{ItemKey, PositionRecord};

/// Where an entry's position record lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Caller-owned item: the record sits in the store's keyed table.
    Table,
    /// Engine-owned marker: the record travels with the row itself.
    Inline(PositionRecord),
}

/// The engine's normalized copy of one data source entry.
#[derive(Clone, Debug)]
pub(crate) struct Row<K, T> {
    pub(crate) key: ItemKey<K>,
    pub(crate) declared_height: Option<u32>,
    pub(crate) payload: T,
    pub(crate) placement: Placement,
}

impl<K, T> Row<K, T> {
    pub(crate) fn is_marker(&self) -> bool {
        matches!(self.placement, Placement::Inline(_))
    }
}

/// Keyed table of position records.
///
/// Records for keys that disappear from the data source stay in the table until
/// [`PositionStore::retain_keys`] runs; they are never read again in the meantime.
#[derive(Clone, Debug)]
pub(crate) struct PositionStore<K> {
    records: KeyMap<K, PositionRecord>,
}

impl<K: ListKey> PositionStore<K> {
    pub(crate) fn new() -> Self {
        Self {
            records: KeyMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn get<'a, T>(&'a self, row: &'a Row<K, T>) -> Option<&'a PositionRecord> {
        match &row.placement {
            Placement::Inline(record) => Some(record),
            Placement::Table => self.records.get(&row.key),
        }
    }

    /// Merges `f`'s changes into the row's record. Unknown table keys are ignored.
    pub(crate) fn set<T>(&mut self, row: &mut Row<K, T>, f: impl FnOnce(&mut PositionRecord)) {
        match &mut row.placement {
            Placement::Inline(record) => f(record),
            Placement::Table => {
                if let Some(record) = self.records.get_mut(&row.key) {
                    f(record);
                }
            }
        }
    }

    /// Returns the row's record, creating an empty one in the table if needed.
    pub(crate) fn ensure<T>(&mut self, row: &Row<K, T>) -> PositionRecord {
        match &row.placement {
            Placement::Inline(record) => *record,
            Placement::Table => *self.records.entry(row.key.clone()).or_default(),
        }
    }

    /// Stores a known height for `key` without placing it.
    ///
    /// Resolved records are left alone: their height is already counted in the total.
    /// Returns whether the height was stored.
    pub(crate) fn seed_height(&mut self, key: ItemKey<K>, height: u32) -> bool {
        let record = self.records.entry(key).or_default();
        if record.resolved {
            return false;
        }
        record.height = Some(height);
        true
    }

    pub(crate) fn for_each(&self, mut f: impl FnMut(&ItemKey<K>, &PositionRecord)) {
        for (k, record) in self.records.iter() {
            f(k, record);
        }
    }

    /// Drops records whose key fails `keep`.
    pub(crate) fn retain_keys(&mut self, mut keep: impl FnMut(&ItemKey<K>) -> bool) {
        self.records.retain(|k, _| keep(k));
    }
}
