//! Domain types for the Revit-to-FBX export service.
//!
//! Nothing in this crate performs I/O. The API and Forge crates build on
//! these types to validate requests, describe workitems, and shape the
//! notifications pushed to browsers.

pub mod error;
pub mod export;
pub mod progress;
pub mod storage;
pub mod types;
pub mod viewables;
pub mod workitem;
