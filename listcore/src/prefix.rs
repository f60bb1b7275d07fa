use alloc::vec::Vec;

/// Fenwick tree over item heights, used by fixed-height windowing to map an offset to an index
/// in `O(log n)` and to keep that mapping current when an item is re-measured.
#[derive(Clone, Debug, Default)]
pub(crate) struct HeightSums {
    tree: Vec<u64>, // 1-indexed
    max_bit: usize,
}

impl HeightSums {
    pub(crate) fn from_heights(heights: impl ExactSizeIterator<Item = u32>) -> Self {
        let n = heights.len();
        let mut tree = alloc::vec![0u64; n + 1];
        for (i, h) in (1..=n).zip(heights) {
            tree[i] = tree[i].saturating_add(h as u64);
            let parent = i + lsb(i);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        let mut i = index + 1;
        while i <= n {
            let next = self.tree[i] as i128 + delta as i128;
            debug_assert!(next >= 0, "HeightSums underflow (i={i}, delta={delta})");
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` heights.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = count.min(self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    /// Index of the item that contains `offset`, clamped to the last item.
    ///
    /// Returns `None` for an empty tree.
    pub(crate) fn index_at(&self, offset: u64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        // Largest `consumed` such that prefix_sum(consumed) <= offset.
        let mut target = offset;
        let mut consumed = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = consumed + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                consumed = next;
            }
            bit >>= 1;
        }
        Some(consumed.min(n - 1))
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
