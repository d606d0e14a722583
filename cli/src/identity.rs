//! Author and committer identities for new commits.
//!
//! The author comes from command-line flags, falling back to the
//! `GIT_AUTHOR_*` environment variables. The committer comes from the
//! `GIT_COMMITTER_*` environment variables, falling back field by field
//! to the author.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{App, Arg, ArgMatches};
use objstore_core::object::Attribution;

use crate::Result;

const DEFAULT_NAME: &str = "objstore";
const DEFAULT_EMAIL: &str = "objstore@localhost";

pub(crate) fn add_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("author-name")
            .long("author-name")
            .value_name("name")
            .takes_value(true)
            .env("GIT_AUTHOR_NAME")
            .help("Name recorded as author"),
    )
    .arg(
        Arg::with_name("author-email")
            .long("author-email")
            .value_name("email")
            .takes_value(true)
            .env("GIT_AUTHOR_EMAIL")
            .help("E-mail address recorded as author"),
    )
    .arg(
        Arg::with_name("date")
            .long("date")
            .value_name("date")
            .takes_value(true)
            .env("GIT_AUTHOR_DATE")
            .help("Author date as '<unix seconds> <+|-hhmm>' (default: now)"),
    )
}

/// Returns the `(author, committer)` pair for a new commit.
pub(crate) fn from_args(args: &ArgMatches) -> Result<(Attribution, Attribution)> {
    let now = now()?;

    let name = args.value_of("author-name");
    let email = args.value_of("author-email");
    let date = args.value_of("date");
    let author = attribution(name, email, date, now)?;

    let committer_name = env::var("GIT_COMMITTER_NAME").ok();
    let committer_email = env::var("GIT_COMMITTER_EMAIL").ok();
    let committer_date = env::var("GIT_COMMITTER_DATE").ok();
    let committer = attribution(
        committer_name.as_deref().or(name),
        committer_email.as_deref().or(email),
        committer_date.as_deref().or(date),
        now,
    )?;

    Ok((author, committer))
}

fn attribution(
    name: Option<&str>,
    email: Option<&str>,
    date: Option<&str>,
    now: i64,
) -> Result<Attribution> {
    let (timestamp, tz_offset) = match date {
        Some(date) => {
            Attribution::parse_date(date).ok_or_else(|| format!("invalid date format: {}", date))?
        }
        None => (now, 0),
    };

    Ok(Attribution::new(
        name.unwrap_or(DEFAULT_NAME),
        email.unwrap_or(DEFAULT_EMAIL),
        timestamp,
        tz_offset,
    )?)
}

fn now() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}
