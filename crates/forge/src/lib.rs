//! Clients for the Autodesk Forge/APS web services used by the exporter.
//!
//! - [`api::ForgeApi`]: thin REST wrappers (OAuth, OSS, Design
//!   Automation, Data Management, Model Derivative).
//! - [`auth::ForgeAuth`]: cached two-legged application token.
//! - [`service::ForgeService`]: the operations the HTTP handlers need,
//!   implemented by [`service::ForgeClient`].

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod service;

pub use config::ForgeConfig;
pub use error::ForgeApiError;
pub use service::{ForgeClient, ForgeService};
