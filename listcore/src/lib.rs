//! A headless windowing engine for long and infinite lists.
//!
//! For composing-layer helpers (grouped lists, measurement queues), see the `listcore-adapter`
//! crate.
//!
//! The engine answers three questions on every frame:
//! - which contiguous slice of the data source should be live,
//! - where each live entry sits vertically,
//! - how much content height is known so far.
//!
//! Heights may be declared up front (fixed-height mode, closed-form offset → index lookup) or
//! discovered one measurement at a time (progressive mode). It is UI-agnostic. A renderer is
//! expected to provide:
//! - the data source and scroll offsets
//! - measured heights through [`ListEngine::resolve_item`]
//! - a lookahead margin derived from its viewport
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod key;
mod mode;
mod options;
mod prefix;
mod resolve;
mod store;
mod types;
mod window;


pub use engine::ListEngine;
pub use error::ListError;
pub use key::ListKey;
pub use mode::HeightMode;
pub use options::{DEFAULT_WINDOW_SIZE, ListOptions, OnChangeCallback};
pub use types::{
    Entry, Item, ItemKey, Marker, MeasuredHeight, PositionRecord, Refresh, RefreshOutcome,
    Resolution, ScrollDirection, VisibleItem, Window,
};
