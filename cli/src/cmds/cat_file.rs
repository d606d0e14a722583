use std::io::Write;

use crate::{find_repo, App, Result};

use super::{parse_id, usage_error, write_entry};

use clap::{Arg, ArgMatches, ErrorKind, SubCommand};
use objstore_core::object::{split_header, Kind, Tree};
use objstore_core::repo::Repo;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content, type, or size information for a stored object")
        .arg(
            Arg::with_name("p")
                .short("p")
                .conflicts_with_all(&["t", "s"])
                .help("Pretty-print the object's content"),
        )
        .arg(
            Arg::with_name("t")
                .short("t")
                .conflicts_with("s")
                .help("Show the object's type"),
        )
        .arg(
            Arg::with_name("s")
                .short("s")
                .help("Show the object's payload size"),
        )
        .arg(
            Arg::with_name("type_or_object")
                .required(true)
                .value_name("type")
                .help("Expected object type (or the object, with -p, -t, or -s)"),
        )
        .arg(
            Arg::with_name("object")
                .value_name("object")
                .help("The object to show"),
        )
}

enum Show {
    Pretty,
    Kind,
    Size,
    Raw(Kind),
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let (show, object) = show_from_args(args)?;

    let repo = find_repo::from_current_dir()?;
    let id = parse_id(object)?;
    let encoded = repo.get_loose_object(&id)?;
    let (kind, payload) = split_header(&encoded)?;

    match show {
        Show::Kind => writeln!(app, "{}", kind)?,
        Show::Size => writeln!(app, "{}", payload.len())?,
        Show::Pretty if kind == Kind::Tree => {
            for entry in Tree::parse(payload)?.entries.iter() {
                write_entry(&mut *app, entry)?;
            }
        }
        Show::Pretty => app.write_all(payload)?,
        Show::Raw(expected) if expected == kind => app.write_all(payload)?,
        Show::Raw(expected) => {
            return Err(usage_error(
                format!("object {} is a {}, not a {}", id, kind, expected),
                ErrorKind::InvalidValue,
            ));
        }
    }

    Ok(())
}

fn show_from_args<'a>(args: &'a ArgMatches) -> Result<(Show, &'a str)> {
    let first = args.value_of("type_or_object").unwrap_or_default();

    let flag = if args.is_present("p") {
        Some(Show::Pretty)
    } else if args.is_present("t") {
        Some(Show::Kind)
    } else if args.is_present("s") {
        Some(Show::Size)
    } else {
        None
    };

    match (flag, args.value_of("object")) {
        (Some(show), None) => Ok((show, first)),
        (None, Some(object)) => {
            let kind = Kind::from_name(first.as_bytes()).ok_or_else(|| {
                usage_error(
                    format!("invalid object type \"{}\"", first),
                    ErrorKind::InvalidValue,
                )
            })?;
            Ok((Show::Raw(kind), object))
        }
        (Some(_), Some(_)) => Err(usage_error(
            "only one of -p, -t, -s, or <type> may be given".to_string(),
            ErrorKind::ArgumentConflict,
        )),
        (None, None) => Err(usage_error(
            "one of -p, -t, -s, or <type> is required".to_string(),
            ErrorKind::MissingRequiredArgument,
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::temp_cwd::TempCwd;
    use crate::App;

    use objstore_core::object::{Attribution, FileMode, Object, Tree, TreeEntry};
    use objstore_core::repo::Repo;
    use objstore_on_disk::OnDisk;
    use serial_test::serial;

    const BLOB_ID: &str = "d670460b4b4aece5915caf5c68d12f560a9fe3e4";

    fn run_in(dir: &Path, args: Vec<&str>) -> crate::Result<Vec<u8>> {
        let _tcwd = TempCwd::new(dir);
        App::run_with_args(args)
    }

    fn fixture() -> (tempfile::TempDir, OnDisk) {
        let temp = tempfile::tempdir().unwrap();
        let mut repo = OnDisk::init(temp.path()).unwrap();
        repo.put_object(&Object::Blob(b"test content\n".to_vec()))
            .unwrap();
        (temp, repo)
    }

    #[test]
    #[serial]
    fn pretty_blob() {
        let (temp, _repo) = fixture();
        let stdout = run_in(temp.path(), vec!["cat-file", "-p", BLOB_ID]).unwrap();
        assert_eq!(stdout, b"test content\n");
    }

    #[test]
    #[serial]
    fn blob_type_and_size() {
        let (temp, _repo) = fixture();

        let stdout = run_in(temp.path(), vec!["cat-file", "-t", BLOB_ID]).unwrap();
        assert_eq!(stdout, b"blob\n");

        let stdout = run_in(temp.path(), vec!["cat-file", "-s", BLOB_ID]).unwrap();
        assert_eq!(stdout, b"13\n");
    }

    #[test]
    #[serial]
    fn raw_with_expected_kind() {
        let (temp, _repo) = fixture();
        let stdout = run_in(temp.path(), vec!["cat-file", "blob", BLOB_ID]).unwrap();
        assert_eq!(stdout, b"test content\n");
    }

    #[test]
    #[serial]
    fn error_wrong_kind() {
        let (temp, _repo) = fixture();
        let err = run_in(temp.path(), vec!["cat-file", "tree", BLOB_ID]).unwrap_err();
        assert!(err.to_string().contains("is a blob, not a tree"));
    }

    #[test]
    #[serial]
    fn pretty_tree() {
        let (temp, mut repo) = fixture();

        let blob = BLOB_ID.parse().unwrap();
        let tree = Tree::new(vec![
            TreeEntry::new(FileMode::Normal, "a.txt", blob),
            TreeEntry::new(FileMode::Executable, "b.sh", blob),
        ]);
        let tree_id = repo.put_object(&Object::Tree(tree)).unwrap().to_string();

        let stdout = run_in(temp.path(), vec!["cat-file", "-p", tree_id.as_str()]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "100644 blob d670460b4b4aece5915caf5c68d12f560a9fe3e4\ta.txt\n\
             100755 blob d670460b4b4aece5915caf5c68d12f560a9fe3e4\tb.sh\n"
        );

        let stdout = run_in(temp.path(), vec!["cat-file", "-t", tree_id.as_str()]).unwrap();
        assert_eq!(stdout, b"tree\n");
    }

    #[test]
    #[serial]
    fn pretty_commit() {
        let (temp, mut repo) = fixture();

        let a = Attribution::new("A U Thor", "author@example.com", 1234567890, 0).unwrap();
        let tree = "4b825dc642cb6eb9a060e54bf8d69288fbee4904".parse().unwrap();
        let commit_id = repo
            .commit_tree(tree, None, "msg", a.clone(), a)
            .unwrap()
            .to_string();
        assert_eq!(commit_id, "ef2cb5f57b4673b3b3d92584c68a24eb561d2996");

        let stdout = run_in(temp.path(), vec!["cat-file", "-p", commit_id.as_str()]).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
             author A U Thor <author@example.com> 1234567890 +0000\n\
             committer A U Thor <author@example.com> 1234567890 +0000\n\
             \n\
             msg\n"
        );
    }

    #[test]
    #[serial]
    fn error_not_found() {
        let (temp, _repo) = fixture();
        let err = run_in(
            temp.path(),
            vec!["cat-file", "-p", "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"],
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    #[serial]
    fn error_bad_object_name() {
        let (temp, _repo) = fixture();
        let err = run_in(temp.path(), vec!["cat-file", "-p", "HEAD"]).unwrap_err();
        assert!(err.to_string().contains("not a valid object name"));
    }

    #[test]
    fn error_no_mode() {
        let err = App::run_with_args(vec!["cat-file", BLOB_ID]).unwrap_err();
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn error_flag_and_type() {
        let err = App::run_with_args(vec!["cat-file", "-p", "blob", BLOB_ID]).unwrap_err();
        assert!(err.to_string().contains("only one of"));
    }

    #[test]
    fn error_conflicting_flags() {
        assert!(App::run_with_args(vec!["cat-file", "-p", "-t", BLOB_ID]).is_err());
    }

    #[test]
    fn error_bad_type() {
        let err = App::run_with_args(vec!["cat-file", "bogus", BLOB_ID]).unwrap_err();
        assert!(err.to_string().contains("invalid object type"));
    }
}
