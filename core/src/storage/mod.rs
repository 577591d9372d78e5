//! Persistent key-value storage for session state
//!
//! The session layer never touches a concrete backend directly. It talks to a
//! `KeyValueStore`, which mirrors the get/set/remove surface of browser local
//! storage: string keys, string values. JSON values are stored as their text.

pub mod adapters;
pub mod store;

pub use adapters::{FileStore, InMemoryStore};
pub use store::{KeyValueStore, KeyValueStoreRef, StoreError};
