use std::{
    fs,
    io::{self, Read, Write},
};

use crate::{find_repo, App, Result};

use super::usage_error;

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use objstore_core::object::{encode, Id, Kind, Object};
use objstore_core::repo::Repo;
use tracing::debug;

// Standard input is buffered in full, so cap how much we'll take.
const MAX_STDIN_SIZE: usize = 20 * 1024 * 1024;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally store the object")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .takes_value(true)
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = kind_from_args(args)?;
    let payload = payload_from_args(app, args)?;

    // Blobs are always valid; trees and commits must parse.
    if Object::from_payload(kind, &payload).is_err() {
        return Err(usage_error(
            format!("corrupt {}", kind),
            ErrorKind::InvalidValue,
        ));
    }

    let encoded = encode(kind, &payload);

    let id = if args.is_present("w") {
        let mut repo = find_repo::from_current_dir()?;
        repo.put_loose_object(&encoded)?
    } else {
        Id::for_encoded(&encoded)
    };

    debug!("hashed {} of {} bytes as {}", kind, payload.len(), id);
    writeln!(app, "{}", id)?;

    Ok(())
}

fn kind_from_args(args: &ArgMatches) -> Result<Kind> {
    match args.value_of("t") {
        Some(name) => Kind::from_name(name.as_bytes()).ok_or_else(|| {
            usage_error(
                "-t must be one of blob, commit, or tree".to_string(),
                ErrorKind::InvalidValue,
            )
        }),
        None => Ok(Kind::Blob),
    }
}

fn payload_from_args(app: &mut App, args: &ArgMatches) -> Result<Vec<u8>> {
    let stdin = args.is_present("stdin");

    match args.value_of("file") {
        Some(file) if !stdin => Ok(fs::read(file)?),
        None if stdin => Ok(read_limited(&mut *app.stdin)?),
        _ => Err(usage_error(
            "content source must be either --stdin or a file path".to_string(),
            ErrorKind::MissingRequiredArgument,
        )),
    }
}

fn read_limited<R: Read + ?Sized>(r: &mut R) -> io::Result<Vec<u8>> {
    let mut content: Vec<u8> = Vec::new();

    let size = r.take(MAX_STDIN_SIZE as u64 + 1).read_to_end(&mut content)?;
    if size > MAX_STDIN_SIZE {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("read beyond {} byte limit", MAX_STDIN_SIZE),
        ))
    } else {
        Ok(content)
    }
}
