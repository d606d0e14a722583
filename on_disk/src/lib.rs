//! This crate provides an object store that keeps content on the local file system.
//!
//! It intentionally uses the same `.git/objects` layout as command-line git:
//! each object is zlib-compressed and stored at
//! `objects/<first 2 hex digits>/<remaining 38 hex digits>`.

#![deny(warnings)]

mod on_disk_repo;
pub use on_disk_repo::OnDisk;
