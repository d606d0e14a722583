use std::{
    error,
    io::{self, Write},
};

use crate::{App, Result};

use clap::{Error, ErrorKind};
use objstore_core::object::{Id, TreeEntry};

mod cat_file;
mod commit_tree;
mod hash_object;
mod init;
mod ls_tree;
mod write_tree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(cat_file::subcommand())
        .subcommand(commit_tree::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(ls_tree::subcommand())
        .subcommand(write_tree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("cat-file", Some(m)) => cat_file::run(app, &m),
        ("commit-tree", Some(m)) => commit_tree::run(app, &m),
        ("hash-object", Some(m)) => hash_object::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("ls-tree", Some(m)) => ls_tree::run(app, &m),
        ("write-tree", Some(m)) => write_tree::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

// Usage errors are reported through clap's error type so they read
// the same as the ones clap raises itself.
pub(crate) fn usage_error(message: String, kind: ErrorKind) -> Box<dyn error::Error> {
    Box::new(Error {
        message,
        kind,
        info: None,
    })
}

pub(crate) fn parse_id(s: &str) -> Result<Id> {
    Id::from_hex(s)
        .map_err(|_| usage_error(format!("not a valid object name: {}", s), ErrorKind::InvalidValue))
}

// Formats one tree entry the way `git ls-tree` does.
pub(crate) fn write_entry(w: &mut dyn Write, entry: &TreeEntry) -> io::Result<()> {
    writeln!(
        w,
        "{:06o} {} {}\t{}",
        entry.mode.to_value(),
        entry.mode.object_kind(),
        entry.id,
        entry.name
    )
}
