use std::io::Write;

use crate::{find_repo, identity, App, Result};

use super::{parse_id, usage_error};

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use objstore_core::object::Id;
use objstore_core::repo::Repo;
use objstore_on_disk::OnDisk;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    let cmd = SubCommand::with_name("commit-tree")
        .about("Create a new commit object")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("An existing tree object"),
        )
        .arg(
            Arg::with_name("p")
                .short("p")
                .value_name("parent")
                .takes_value(true)
                .help("ID of a parent commit object"),
        )
        .arg(
            Arg::with_name("m")
                .short("m")
                .value_name("message")
                .takes_value(true)
                .required(true)
                .help("A paragraph in the commit log message"),
        );

    identity::add_args(cmd)
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_current_dir()?;

    let tree = existing_object(&repo, args.value_of("tree").unwrap_or_default())?;
    let parent = match args.value_of("p") {
        Some(parent) => Some(existing_object(&repo, parent)?),
        None => None,
    };

    let message = args.value_of("m").unwrap_or_default();
    let (author, committer) = identity::from_args(args)?;

    let id = repo.commit_tree(tree, parent, message, author, committer)?;
    writeln!(app, "{}", id)?;

    Ok(())
}

// The commit itself doesn't care whether its references resolve, but
// a command-line user almost certainly made a typo if they don't.
fn existing_object(repo: &OnDisk, name: &str) -> Result<Id> {
    let id = parse_id(name)?;
    if repo.has_object(&id)? {
        Ok(id)
    } else {
        Err(usage_error(
            format!("not a valid object name: {}", name),
            ErrorKind::InvalidValue,
        ))
    }
}
