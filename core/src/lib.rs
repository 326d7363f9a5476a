//! Client core for the hashtag todo service.
//!
//! # Overview
//! Keeps a local todo collection in sync with a remote store. Free-form input
//! like `"buy milk #errands"` is split into an item name and a category, sent
//! to the store, and merged locally once the store confirms it.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response, so the I/O boundary is explicit.
//! - A host-supplied `Transport` performs the round-trip; the core never
//!   opens a socket.
//! - `Synchronizer` owns the collection and applies changes only after the
//!   store confirms them.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sync;
pub mod types;

pub use category::{extract, Extraction};
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation, SyncError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use sync::{Outcome, Synchronizer};
pub use types::{DayOfWeek, NewTodoItem, RecurrencePattern, RecurringType, TodoId, TodoItem, DEFAULT_CATEGORY};
