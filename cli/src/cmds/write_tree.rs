use std::io::Write;

use crate::{find_repo, App, Result};

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("write-tree")
        .about("Store a snapshot of the working directory as a tree object")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_current_dir()?;

    let work_dir = repo.work_dir().to_path_buf();
    let id = repo.write_tree(work_dir)?;

    writeln!(app, "{}", id)?;

    Ok(())
}
