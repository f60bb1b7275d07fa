#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::ItemKey;

/// Keyed lookup table used for position records and key → index resolution.
#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<ItemKey<K>, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<ItemKey<K>, V>;

/// Bounds required of caller-supplied item keys.
///
/// With `std` keys are hashed; without it they are ordered.
#[cfg(feature = "std")]
pub trait ListKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> ListKey for K {}

#[cfg(not(feature = "std"))]
pub trait ListKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> ListKey for K {}
