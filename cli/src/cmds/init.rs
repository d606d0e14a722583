use std::{io::Write, path::Path};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use objstore_on_disk::OnDisk;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty repository")
        .arg(
            Arg::with_name("directory")
                .default_value(".")
                .help("The directory to create the repository in"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let dir = args.value_of("directory").unwrap_or(".");

    let path = Path::new(dir);
    OnDisk::init(path)?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        path.display()
    )?;

    Ok(())
}
