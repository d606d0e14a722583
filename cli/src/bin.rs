#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;
mod find_repo;
mod identity;

#[cfg(test)]
mod temp_cwd;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Kept minimal: the binary entry point isn't reachable from coverage,
    // so everything testable lives in `App`.

    init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let (mut stdin, mut stdout) = (stdin.lock(), stdout.lock());

    let mut app = App {
        arg_matches: app::clap_app().get_matches(),
        stdin: &mut stdin,
        stdout: &mut stdout,
    };

    let status = match app.run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    };

    // Nothing useful to do if the final flush fails.
    app.flush();

    std::process::exit(status);
}

// Logs go to stderr; stdout carries only command output.
// RUST_LOG sets verbosity, warnings only by default.
#[cfg(not(tarpaulin_include))]
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
