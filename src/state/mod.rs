//! State management module
//!
//! This module handles all persisted gallery state, including:
//! - Shared data structures (data.rs)
//! - The key-value storage seam and its in-memory backend (store.rs)
//! - The SQLite record store (library.rs)
//! - Typed user / image snapshots over any store (snapshot.rs)

pub mod data;
pub mod library;
pub mod snapshot;
pub mod store;
