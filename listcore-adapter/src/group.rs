use alloc::vec::Vec;

use listcore::{Entry, Item, ItemKey, ListEngine, ListKey, Marker};

/// Payload of a grouped list row: either a group title or one of the group's items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupRow<H, T> {
    Title(H),
    Item(T),
}

/// One group of a grouped list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<K, H, T> {
    /// Key of the group's title row. Shares the key space with the items.
    pub key: K,
    pub title: H,
    pub title_height: Option<u32>,
    pub items: Vec<Item<K, T>>,
}

impl<K, H, T> Group<K, H, T> {
    pub fn new(key: K, title: H, items: Vec<Item<K, T>>) -> Self {
        Self {
            key,
            title,
            title_height: None,
            items,
        }
    }

    pub fn with_title_height(mut self, height: u32) -> Self {
        self.title_height = Some(height);
        self
    }
}

/// A flattened grouped list: one marker per group followed by the group's items.
///
/// Titles become engine-owned [`Marker`]s, so their geometry never lands in the caller's
/// records.
#[derive(Clone, Debug)]
pub struct GroupedSource<K, H, T> {
    entries: Vec<Entry<K, GroupRow<H, T>>>,
    title_indexes: Vec<usize>,
}

impl<K, H, T> GroupedSource<K, H, T> {
    pub fn new(groups: impl IntoIterator<Item = Group<K, H, T>>) -> Self {
        let mut entries = Vec::new();
        let mut title_indexes = Vec::new();
        for group in groups {
            title_indexes.push(entries.len());
            entries.push(Entry::Marker(Marker {
                key: group.key,
                height: group.title_height,
                payload: GroupRow::Title(group.title),
            }));
            entries.extend(group.items.into_iter().map(|item| {
                Entry::Item(Item {
                    key: item.key,
                    height: item.height,
                    payload: GroupRow::Item(item.payload),
                })
            }));
        }
        Self {
            entries,
            title_indexes,
        }
    }

    pub fn entries(&self) -> &[Entry<K, GroupRow<H, T>>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry<K, GroupRow<H, T>>> {
        self.entries
    }

    /// Data source indexes of the group titles, ascending.
    pub fn title_indexes(&self) -> &[usize] {
        &self.title_indexes
    }

    pub fn group_count(&self) -> usize {
        self.title_indexes.len()
    }

    /// The group that contains data source index `index`.
    pub fn group_of(&self, index: usize) -> Option<usize> {
        let after = self.title_indexes.partition_point(|&t| t <= index);
        after.checked_sub(1)
    }
}

/// The title pinned to the top of the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyHeader<K> {
    pub group: usize,
    pub index: usize,
    pub key: ItemKey<K>,
    /// Non-positive shift applied to the pinned title while the next title pushes it out.
    pub shift: i64,
}

/// Finds the title to pin at scroll `offset`: the last title placed at or above it.
///
/// Titles without a known `translate_y` are skipped; their position settles as the engine
/// resolves the entries above them.
pub fn sticky_header<K: ListKey, H: Clone, T: Clone>(
    engine: &ListEngine<K, GroupRow<H, T>>,
    titles: &[usize],
    offset: i64,
) -> Option<StickyHeader<K>> {
    let top_of = |index: usize| engine.position_at(index).and_then(|p| p.translate_y);

    // Known title tops ascend with the index, so the predicate is monotone.
    let after = titles.partition_point(|&t| top_of(t).is_some_and(|top| top as i64 <= offset));
    let group = after.checked_sub(1)?;
    let index = titles[group];
    let key = engine.key_at(index)?.clone();

    let height = engine
        .position_at(index)
        .and_then(|p| p.height)
        .unwrap_or(0) as i64;
    let shift = titles
        .get(group + 1)
        .and_then(|&next| top_of(next))
        .map(|next_top| (next_top as i64 - offset - height).min(0))
        .unwrap_or(0);

    Some(StickyHeader {
        group,
        index,
        key,
        shift,
    })
}
