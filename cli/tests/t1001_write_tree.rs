use std::fs;

mod common;

fn populate(dir: &std::path::Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = dir.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

#[test]
fn empty_work_dir() {
    let temp = common::init_empty_repo();
    assert_eq!(
        common::stdout_of(temp.path(), &["write-tree"]),
        "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
    );
}

#[test]
fn sorted_and_nested() {
    let temp = common::init_empty_repo();
    populate(
        temp.path(),
        &[("top.txt", "top\n"), ("sub/inner.txt", "inner\n")],
    );
    fs::create_dir(temp.path().join("nothing-here")).unwrap();

    assert_eq!(
        common::stdout_of(temp.path(), &["write-tree"]),
        "b1e8d48190d5cced53d5c6b026914f917af10273"
    );

    // Running again picks up nothing new from the object database.
    assert_eq!(
        common::stdout_of(temp.path(), &["write-tree"]),
        "b1e8d48190d5cced53d5c6b026914f917af10273"
    );
}

#[test]
fn same_content_same_objects() {
    let a = common::init_empty_repo();
    populate(a.path(), &[("a.txt", "a\n"), ("b.txt", "b\n"), ("c.txt", "c\n")]);

    let b = common::init_empty_repo();
    populate(b.path(), &[("c.txt", "c\n"), ("a.txt", "a\n"), ("b.txt", "b\n")]);

    let a_id = common::stdout_of(a.path(), &["write-tree"]);
    let b_id = common::stdout_of(b.path(), &["write-tree"]);
    assert_eq!(a_id, "d11b5fac254c4b7a5a8e078cbad43ba15d6494ff");
    assert_eq!(a_id, b_id);

    assert!(!dir_diff::is_different(a.path(), b.path()).unwrap());
}

#[test]
fn changed_content_changes_id() {
    let temp = common::init_empty_repo();
    populate(temp.path(), &[("a.txt", "a\n")]);
    let before = common::stdout_of(temp.path(), &["write-tree"]);

    populate(temp.path(), &[("a.txt", "b\n")]);
    let after = common::stdout_of(temp.path(), &["write-tree"]);

    assert_ne!(before, after);
}
