use predicates::prelude::*;

mod common;

const EMPTY_TREE_ID: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
const FIRST_COMMIT_ID: &str = "ef2cb5f57b4673b3b3d92584c68a24eb561d2996";
const SECOND_COMMIT_ID: &str = "f3df287356f9da0de632a2a424a58dd11066b373";

fn commit_tree(dir: &std::path::Path, args: &[&str]) -> String {
    let mut all = vec!["commit-tree"];
    all.extend_from_slice(args);
    all.extend_from_slice(&common::TEST_AUTHOR);
    common::stdout_of(dir, &all)
}

#[test]
fn root_commit() {
    let temp = common::init_empty_repo();
    let tree = common::stdout_of(temp.path(), &["write-tree"]);
    assert_eq!(tree, EMPTY_TREE_ID);

    let commit = commit_tree(temp.path(), &[tree.as_str(), "-m", "msg"]);
    assert_eq!(commit, FIRST_COMMIT_ID);

    common::objstore(temp.path())
        .args(&["cat-file", "commit", commit.as_str()])
        .assert()
        .success()
        .stdout(
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author A U Thor <author@example.com> 1234567890 +0000\n\
             committer A U Thor <author@example.com> 1234567890 +0000\n\
             \n\
             msg\n",
        );
}

#[test]
fn commit_with_parent() {
    let temp = common::init_empty_repo();
    common::stdout_of(temp.path(), &["write-tree"]);

    commit_tree(temp.path(), &[EMPTY_TREE_ID, "-m", "msg"]);
    let second = commit_tree(
        temp.path(),
        &[EMPTY_TREE_ID, "-p", FIRST_COMMIT_ID, "-m", "second"],
    );
    assert_eq!(second, SECOND_COMMIT_ID);

    common::objstore(temp.path())
        .args(&["cat-file", "-p", SECOND_COMMIT_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "parent {}\n",
            FIRST_COMMIT_ID
        )));
}

#[test]
fn identity_from_environment() {
    let temp = common::init_empty_repo();
    common::stdout_of(temp.path(), &["write-tree"]);

    common::objstore(temp.path())
        .args(&["commit-tree", EMPTY_TREE_ID, "-m", "msg"])
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_AUTHOR_DATE", "1234567890 +0000")
        .assert()
        .success()
        .stdout(format!("{}\n", FIRST_COMMIT_ID));
}

#[test]
fn committer_from_environment() {
    let temp = common::init_empty_repo();
    common::stdout_of(temp.path(), &["write-tree"]);

    let output = common::objstore(temp.path())
        .args(&["commit-tree", EMPTY_TREE_ID, "-m", "msg"])
        .args(&common::TEST_AUTHOR)
        .env("GIT_COMMITTER_NAME", "C O Mitter")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com")
        .env("GIT_COMMITTER_DATE", "1234567999 -0700")
        .output()
        .unwrap();
    assert!(output.status.success());

    let id = String::from_utf8(output.stdout).unwrap();
    common::objstore(temp.path())
        .args(&["cat-file", "-p", id.trim_end()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "author A U Thor <author@example.com> 1234567890 +0000\n\
             committer C O Mitter <committer@example.com> 1234567999 -0700\n",
        ));
}

#[test]
fn default_identity() {
    let temp = common::init_empty_repo();
    common::stdout_of(temp.path(), &["write-tree"]);

    let id = common::stdout_of(temp.path(), &["commit-tree", EMPTY_TREE_ID, "-m", "msg"]);

    common::objstore(temp.path())
        .args(&["cat-file", "-p", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("author objstore <objstore@localhost> "));
}

#[test]
fn error_missing_tree() {
    let temp = common::init_empty_repo();

    common::objstore(temp.path())
        .args(&["commit-tree", EMPTY_TREE_ID, "-m", "msg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid object name"));
}

#[test]
fn error_no_message() {
    let temp = common::init_empty_repo();

    common::objstore(temp.path())
        .args(&["commit-tree", EMPTY_TREE_ID])
        .assert()
        .failure()
        .stdout("");
}
