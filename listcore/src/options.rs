use alloc::sync::Arc;

use crate::VisibleItem;

/// A callback fired after a state-mutating call changed the observable output.
///
/// Arguments are the materialized window and the total height of all resolved entries.
pub type OnChangeCallback<K, T> = Arc<dyn Fn(&[VisibleItem<K, T>], u64) + Send + Sync>;

/// Number of entries kept live when no window size is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 12;

/// Configuration for [`crate::ListEngine`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct ListOptions<K, T> {
    /// Scroll offset applied by the first refresh.
    pub initial_offset: i64,
    /// Enables windowing and position tracking. When `false` every entry stays live.
    pub infinite: bool,
    /// A single height shared by every entry that does not declare its own.
    pub fixed_item_height: Option<u32>,
    /// Maximum number of live entries.
    pub window_size: usize,
    /// Distance subtracted from the scroll offset before searching for the window start, so
    /// entries just above the viewport stay live.
    pub lookahead: u32,
    pub on_change: Option<OnChangeCallback<K, T>>,
}

impl<K, T> Default for ListOptions<K, T> {
    fn default() -> Self {
        Self {
            initial_offset: 0,
            infinite: true,
            fixed_item_height: None,
            window_size: DEFAULT_WINDOW_SIZE,
            lookahead: 0,
            on_change: None,
        }
    }
}

impl<K, T> Clone for ListOptions<K, T> {
    fn clone(&self) -> Self {
        Self {
            initial_offset: self.initial_offset,
            infinite: self.infinite,
            fixed_item_height: self.fixed_item_height,
            window_size: self.window_size,
            lookahead: self.lookahead,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K, T> ListOptions<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_offset(mut self, offset: i64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    pub fn with_fixed_item_height(mut self, height: Option<u32>) -> Self {
        self.fixed_item_height = height;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_lookahead(mut self, lookahead: u32) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Derives the lookahead from the viewport height (one fifth of it).
    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.lookahead = viewport_height / 5;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&[VisibleItem<K, T>], u64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K, T> core::fmt::Debug for ListOptions<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("initial_offset", &self.initial_offset)
            .field("infinite", &self.infinite)
            .field("fixed_item_height", &self.fixed_item_height)
            .field("window_size", &self.window_size)
            .field("lookahead", &self.lookahead)
            .finish_non_exhaustive()
    }
}
