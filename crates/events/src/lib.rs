//! In-process notification channel for workitem status changes.
//!
//! - [`EventBus`]: publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`WorkitemNotification`]: the payload pushed to browsers on the
//!   [`SOCKET_TOPIC_WORKITEM`] topic.

pub mod bus;

pub use bus::{EventBus, WorkitemNotification, SOCKET_TOPIC_WORKITEM};
