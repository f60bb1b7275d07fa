//! Adapter utilities for the `listcore` crate.
//!
//! `listcore` owns the layout state of a single flat list. This crate provides small,
//! framework-neutral helpers that renderers commonly build on top of it:
//!
//! - Grouped lists, with one engine-owned marker per group title
//! - Sticky group titles that follow the scroll offset
//! - A measurement queue that feeds out-of-order layout results back in data source order
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod group;
mod queue;


pub use group::{Group, GroupRow, GroupedSource, StickyHeader, sticky_header};
pub use queue::{FlushStats, MeasureQueue};
