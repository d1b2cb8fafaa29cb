//! Storage abstractions for service layer
//!
//! Contains the file-backed ordered list used by the directory store.

pub mod json_list_store;
