use std::io::{Read, Write};

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    cmds::add_subcommands(
        clap::App::new("objstore")
            .version(crate_version!())
            .about("A content-addressable object store in git's on-disk format")
            .settings(&[
                AppSettings::SubcommandRequiredElseHelp,
                AppSettings::VersionlessSubcommands,
            ]),
    )
}

/// One invocation: the parsed command line plus the streams a command
/// reads from and writes to.
pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }
}

#[cfg(test)]
impl App<'_> {
    // Runs a command line in-process, feeding it `stdin` and returning
    // whatever it wrote to stdout.
    pub fn run_with_stdin_and_args<I, T>(stdin: Vec<u8>, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        let argv: Vec<std::ffi::OsString> = std::iter::once("objstore".into())
            .chain(args.into_iter().map(Into::into))
            .collect();
        let arg_matches = clap_app().get_matches_from_safe(argv)?;

        let mut stdin = std::io::Cursor::new(stdin);
        let mut stdout: Vec<u8> = Vec::new();

        App {
            arg_matches,
            stdin: &mut stdin,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }

    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        App::run_with_stdin_and_args(Vec::new(), args)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn usage_without_subcommand() {
        Command::cargo_bin("objstore")
            .unwrap()
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::starts_with("objstore 0."))
            .stderr(predicate::str::contains("USAGE:"))
            .stderr(predicate::str::contains("hash-object"))
            .stderr(predicate::str::contains("write-tree"));
    }

    #[test]
    fn version_goes_to_stdout() {
        Command::cargo_bin("objstore")
            .unwrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("objstore 0."))
            .stderr("");
    }

    #[test]
    fn unknown_subcommand() {
        Command::cargo_bin("objstore")
            .unwrap()
            .arg("push")
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("push"));
    }

    #[test]
    fn in_process_usage_error() {
        let err = crate::App::run_with_args(vec!["hash-object", "--bogus"]).unwrap_err();
        assert!(err.to_string().contains("--bogus"));
    }
}
