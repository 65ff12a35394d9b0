//! Delivery of bus notifications to WebSocket clients.

pub mod router;

pub use router::NotificationRouter;
