use core::fmt;

/// Identity of one entry in the data source.
///
/// Caller-supplied keys are wrapped in [`ItemKey::User`]. Entries that arrive without a key in
/// non-infinite mode receive an [`ItemKey::Generated`] identity: the entry's position among the
/// unkeyed entries of the current data source.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey<K> {
    User(K),
    Generated(u64),
}

impl<K> ItemKey<K> {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    pub fn user(&self) -> Option<&K> {
        match self {
            Self::User(k) => Some(k),
            Self::Generated(_) => None,
        }
    }
}

impl<K> From<K> for ItemKey<K> {
    fn from(key: K) -> Self {
        Self::User(key)
    }
}

impl<K: fmt::Debug> fmt::Debug for ItemKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(k) => k.fmt(f),
            Self::Generated(id) => write!(f, "#{id}"),
        }
    }
}

/// Scroll direction derived from the offset delta. A zero delta counts as `Down`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

impl ScrollDirection {
    pub fn between(prev: i64, next: i64) -> Self {
        if next.saturating_sub(prev) >= 0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// The contiguous index range `[start_index, end_index)` kept live for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl Window {
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Positional facts about one entry.
///
/// `translate_y`/`bottom` stay `None` until the entry's vertical placement is known; a record
/// with `resolved == false` is a normal transient state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionRecord {
    pub height: Option<u32>,
    /// Slot within the window (`index % window_size`), stable across scrolling so renderers can
    /// reuse elements.
    pub order: Option<usize>,
    pub resolved: bool,
    /// Offset from the top of the content.
    pub translate_y: Option<u64>,
    pub bottom: Option<u64>,
    pub index: usize,
}

impl PositionRecord {
    /// Clears every geometry fact, leaving only the index.
    pub(crate) fn reset_geometry(&mut self) {
        *self = Self {
            index: self.index,
            ..Self::default()
        };
    }

    /// Places the record at `translate_y` with `height`, marking it resolved.
    pub(crate) fn place(&mut self, translate_y: u64, height: u32) {
        self.height = Some(height);
        self.translate_y = Some(translate_y);
        self.bottom = Some(translate_y.saturating_add(height as u64));
        self.resolved = true;
    }
}

/// A caller-owned record. The engine never writes position data into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K, T> {
    pub key: Option<K>,
    pub height: Option<u32>,
    pub payload: T,
}

impl<K, T> Item<K, T> {
    pub fn new(key: K, payload: T) -> Self {
        Self {
            key: Some(key),
            height: None,
            payload,
        }
    }

    pub fn unkeyed(payload: T) -> Self {
        Self {
            key: None,
            height: None,
            payload,
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// A synthetic group boundary marker created by a composing layer.
///
/// Its position record lives inline with the engine's copy of the marker instead of in the
/// keyed table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker<K, T> {
    pub key: K,
    pub height: Option<u32>,
    pub payload: T,
}

impl<K, T> Marker<K, T> {
    pub fn new(key: K, payload: T) -> Self {
        Self {
            key,
            height: None,
            payload,
        }
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// One element of a data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry<K, T> {
    Item(Item<K, T>),
    Marker(Marker<K, T>),
}

impl<K, T> Entry<K, T> {
    pub fn height(&self) -> Option<u32> {
        match self {
            Self::Item(item) => item.height,
            Self::Marker(marker) => marker.height,
        }
    }
}

impl<K, T> From<Item<K, T>> for Entry<K, T> {
    fn from(item: Item<K, T>) -> Self {
        Self::Item(item)
    }
}

impl<K, T> From<Marker<K, T>> for Entry<K, T> {
    fn from(marker: Marker<K, T>) -> Self {
        Self::Marker(marker)
    }
}

/// A read-only snapshot of one live entry: its payload merged with its current geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleItem<K, T> {
    pub key: ItemKey<K>,
    pub is_marker: bool,
    pub position: PositionRecord,
    pub payload: T,
}

impl<K, T> VisibleItem<K, T> {
    pub fn index(&self) -> usize {
        self.position.index
    }

    pub fn translate_y(&self) -> Option<u64> {
        self.position.translate_y
    }

    pub fn bottom(&self) -> Option<u64> {
        self.position.bottom
    }

    pub fn is_resolved(&self) -> bool {
        self.position.resolved
    }
}

/// A measured height exported from (or imported into) the engine's measurement cache.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasuredHeight<K> {
    pub key: ItemKey<K>,
    pub height: u32,
}

/// Outcome of a `resolve_item` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The entry was placed. `delta` is the change applied to the total height.
    Resolved { delta: i64 },
    /// The predecessor has no placement yet, so the entry stays unpositioned.
    Deferred,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Parameters of a `refresh` call. `None` keeps the engine's current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Refresh {
    /// Drop every previously resolved geometry fact before recomputing.
    pub refresh_all: bool,
    pub window_size: Option<usize>,
    pub offset: Option<i64>,
    pub infinite: Option<bool>,
}

impl Refresh {
    pub fn all() -> Self {
        Self {
            refresh_all: true,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = Some(infinite);
        self
    }
}

/// Non-fatal conditions raised by a successful `refresh`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct RefreshOutcome {
    /// Number of entries that had no key and received a generated identity.
    pub generated_keys: usize,
}

impl RefreshOutcome {
    pub fn has_warnings(&self) -> bool {
        self.generated_keys > 0
    }
}
