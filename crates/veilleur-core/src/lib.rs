//! Reconciled sensor state store and change-log tracking.
//!
//! This crate is the reconciliation core of Veilleur: it merges updates
//! from two independent, asynchronous sources (push stream and poller)
//! into one consistent, partial, always-fresh snapshot, and derives
//! per-channel change logs from consecutive snapshots.
//!
//! # Modules
//!
//! - [`store`] -- The [`SensorStore`]: current snapshot + pub/sub
//! - [`tracker`] -- The [`ChangeTracker`]: value-transition detection

pub mod store;
pub mod tracker;

pub use store::SensorStore;
pub use tracker::ChangeTracker;
