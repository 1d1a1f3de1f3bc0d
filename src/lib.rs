//! Stages the files a run needs into `data/`.
//!
//! Starting from the directory that contains a target, every directory on the way up
//! contributes its files to `data/`, first seen wins. The previous contents of `data/` are
//! snapshotted into `.data/` beforehand and can be put back with [`api::clean`].

// Public API
pub mod api;
pub mod errors;
pub mod paths;
pub mod stage;
pub mod workspace;

mod transactions;
mod tree;
