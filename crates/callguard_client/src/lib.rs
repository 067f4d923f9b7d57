//! CallGuard Client - the I/O shell around `callguard_common`.
//!
//! Talks to the risk backend over HTTP, exposes the chat transport as a
//! swappable trait, and wraps the deterministic core in a stateful
//! assistant that the UI layer drives.

pub mod api;
pub mod chat;
pub mod config;
pub mod logging;
pub mod resolver;

pub use api::{ApiClient, ApiError, CallsQuery};
pub use chat::{ChatBackend, ChatError, FakeChatBackend};
pub use config::ApiConfig;
pub use resolver::{resolve, Assistant};
