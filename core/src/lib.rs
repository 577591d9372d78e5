// Client layer for the FinWall invoicing API:
// - API client that attaches the stored bearer token and normalizes responses
// - Session management (login, registration, logout)
// - Pluggable key-value storage and navigation hooks
// - Configuration loading
// - Shared error types

// Export client module - API client for FinWall
pub mod client;
pub use client::*;

// Export session module - login/register/logout on top of the client
pub mod session;
pub use session::SessionManager;

// Export storage module - persistent key-value stores
pub mod storage;
pub use storage::{FileStore, InMemoryStore, KeyValueStore, KeyValueStoreRef, StoreError};

// Export navigation module - redirect hooks
pub mod navigation;
pub use navigation::{Navigator, NavigatorRef, NoopNavigator, RecordingNavigator};

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;

pub use reqwest::Method;
