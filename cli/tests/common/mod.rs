use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

#[allow(dead_code)]
pub const TEST_AUTHOR: [&str; 6] = [
    "--author-name",
    "A U Thor",
    "--author-email",
    "author@example.com",
    "--date",
    "1234567890 +0000",
];

// An `objstore` command running in `dir`, isolated from any identity or
// logging settings in the caller's environment.
pub fn objstore(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("objstore").unwrap();
    cmd.current_dir(dir);

    for var in &[
        "GIT_AUTHOR_NAME",
        "GIT_AUTHOR_EMAIL",
        "GIT_AUTHOR_DATE",
        "GIT_COMMITTER_NAME",
        "GIT_COMMITTER_EMAIL",
        "GIT_COMMITTER_DATE",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

#[allow(dead_code)]
pub fn init_empty_repo() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    objstore(temp.path()).arg("init").assert().success();
    temp
}

// Runs a command that is expected to succeed and returns its stdout
// minus the trailing newline.
#[allow(dead_code)]
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = objstore(dir).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "objstore {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    let mut stdout = String::from_utf8(output.stdout).unwrap();
    if stdout.ends_with('\n') {
        stdout.pop();
    }
    stdout
}
