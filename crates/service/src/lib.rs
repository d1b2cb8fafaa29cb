//! Service layer for the directory records API.
//! - `storage` holds the generic JSON file-backed list.
//! - `directory` implements record CRUD semantics on top of it.
//! - `pagination` turns raw query values into page slices.

pub mod errors;
pub mod storage;
pub mod pagination;
pub mod directory;
#[cfg(test)]
pub mod test_support;
