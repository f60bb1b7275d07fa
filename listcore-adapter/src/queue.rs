use alloc::vec::Vec;

use listcore::{ItemKey, ListEngine, ListKey, Resolution};

/// Buffers heights reported by a renderer and feeds them to
/// [`ListEngine::resolve_item`] in data source order.
///
/// Renderers finish layout in whatever order they like, but the engine only places an entry
/// whose predecessor is already placed. The queue keeps measurements that were deferred and
/// retries them on the next flush, one `resolve_item` call per measurement.
#[derive(Clone, Debug)]
pub struct MeasureQueue<K> {
    pending: Vec<(ItemKey<K>, u32)>,
}

/// Counters describing one [`MeasureQueue::flush`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlushStats {
    pub resolved: usize,
    pub deferred: usize,
    /// Measurements whose key left the data source.
    pub dropped: usize,
}

impl<K> Default for MeasureQueue<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: ListKey> MeasureQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Records a measurement. A newer measurement for the same key replaces the older one.
    pub fn push(&mut self, key: impl Into<ItemKey<K>>, height: u32) {
        let key = key.into();
        match self.pending.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = height,
            None => self.pending.push((key, height)),
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Submits pending measurements in index order inside a single batch, so the engine
    /// publishes at most one change.
    ///
    /// Ordering by index lets a run of consecutive measurements resolve in one flush; anything
    /// still deferred stays queued.
    pub fn flush<T: Clone>(&mut self, engine: &mut ListEngine<K, T>) -> FlushStats {
        let mut stats = FlushStats::default();
        let mut ordered: Vec<(usize, ItemKey<K>, u32)> = Vec::with_capacity(self.pending.len());
        for (key, height) in self.pending.drain(..) {
            match engine.index_of(key.clone()) {
                Some(index) => ordered.push((index, key, height)),
                None => stats.dropped += 1,
            }
        }
        ordered.sort_by_key(|(index, _, _)| *index);

        let pending = &mut self.pending;
        engine.batch_update(|engine| {
            for (_, key, height) in ordered {
                match engine.resolve_item(key.clone(), height) {
                    Ok(Resolution::Resolved { .. }) => stats.resolved += 1,
                    Ok(Resolution::Deferred) => {
                        stats.deferred += 1;
                        pending.push((key, height));
                    }
                    Err(_) => stats.dropped += 1,
                }
            }
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "listcore_adapter",
            resolved = stats.resolved,
            deferred = stats.deferred,
            dropped = stats.dropped,
            "MeasureQueue::flush"
        );
        stats
    }
}
