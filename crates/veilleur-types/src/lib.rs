//! Shared type definitions for the Veilleur sensor dashboard.
//!
//! This crate is the single source of truth for the types used across the
//! Veilleur workspace: the three logical sensor channels, the values they
//! carry, the reconciled snapshot served to presentation consumers, and the
//! wire shapes spoken by the backend.
//!
//! # Modules
//!
//! - [`channel`] -- Channel identity, entity-id mapping, per-channel parsing
//! - [`reading`] -- Readings, the reconciled snapshot, change-log entries
//! - [`wire`] -- JSON payloads of the push stream and the HTTP endpoint
//! - [`error`] -- Parse errors for backend-provided state strings

pub mod channel;
pub mod error;
pub mod reading;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use channel::SensorChannel;
pub use error::StateParseError;
pub use reading::{ChangeLogEntry, ReconciledState, SensorReading, SensorValue};
pub use wire::{ApiResponse, BackendMessage, HistoryRow};
