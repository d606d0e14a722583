//! This crate implements the core data model for a content-addressable
//! object store laid out like git's object database.
//!
//! Nothing in this crate touches the file system. The on-disk store lives
//! in `objstore_on_disk`.

#![deny(warnings)]

pub mod object;
pub mod repo;
pub mod zlib;
