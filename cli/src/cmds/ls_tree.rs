use std::io::Write;

use crate::{find_repo, App, Result};

use super::{parse_id, usage_error, write_entry};

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use objstore_core::object::Object;
use objstore_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("name-only")
                .long("name-only")
                .help("List only file names, one per line"),
        )
        .arg(
            Arg::with_name("tree-ish")
                .required(true)
                .help("A tree, or a commit whose tree should be listed"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_current_dir()?;
    let id = parse_id(args.value_of("tree-ish").unwrap_or_default())?;

    let tree = match repo.get_object(&id)? {
        Object::Tree(tree) => tree,
        Object::Commit(commit) => match repo.get_object(&commit.tree)? {
            Object::Tree(tree) => tree,
            _ => return Err(not_a_tree(&commit.tree.to_string())),
        },
        Object::Blob(_) => return Err(not_a_tree(&id.to_string())),
    };

    // Entries are listed in stored order, which for any tree built here is
    // already sorted by name.
    let name_only = args.is_present("name-only");
    for entry in tree.entries.iter() {
        if name_only {
            writeln!(app, "{}", entry.name)?;
        } else {
            write_entry(&mut *app, entry)?;
        }
    }

    Ok(())
}

fn not_a_tree(name: &str) -> Box<dyn std::error::Error> {
    usage_error(format!("not a tree object: {}", name), ErrorKind::InvalidValue)
}
