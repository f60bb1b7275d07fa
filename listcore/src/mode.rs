use crate::key::ListKey;
use crate::store::{PositionStore, Row};

/// How item heights are known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeightMode {
    /// Not an infinite list: no windowing and no position tracking, every entry stays live.
    Unwindowed,
    /// Every height is known up front; offsets map to indexes in closed form.
    Fixed,
    /// Heights are discovered one measurement at a time.
    #[default]
    Progressive,
}

impl HeightMode {
    /// Classifies a data source.
    ///
    /// A height counts as known when the entry declares one or when an earlier measurement for
    /// the same key is still on record.
    pub(crate) fn detect<K: ListKey, T>(
        rows: &[Row<K, T>],
        store: &PositionStore<K>,
        fixed_item_height: Option<u32>,
        infinite: bool,
    ) -> Self {
        if !infinite {
            return Self::Unwindowed;
        }
        if fixed_item_height.is_some() {
            return Self::Fixed;
        }
        let all_known = rows.iter().all(|row| {
            row.declared_height.is_some()
                || store.get(row).is_some_and(|record| record.height.is_some())
        });
        if all_known {
            Self::Fixed
        } else {
            Self::Progressive
        }
    }

    pub fn is_fixed(self) -> bool {
        !matches!(self, Self::Progressive)
    }

    pub fn is_windowed(self) -> bool {
        !matches!(self, Self::Unwindowed)
    }
}
