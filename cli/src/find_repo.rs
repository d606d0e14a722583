use std::{env, path::Path};

use objstore_core::repo::Result;
use objstore_on_disk::OnDisk;

// Every command that touches stored objects goes through here to find them.
//
// Only `<dir>/.git` is considered. There is no search of parent
// directories and no GIT_DIR override.
pub fn from_path<P: AsRef<Path>>(dir: P) -> Result<OnDisk> {
    OnDisk::new(dir)
}

#[cfg(not(tarpaulin_include))]
pub fn from_current_dir() -> Result<OnDisk> {
    from_path(env::current_dir()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use objstore_core::repo::Error;

    #[test]
    fn finds_initialized_repo() {
        let temp = tempfile::tempdir().unwrap();
        OnDisk::init(temp.path()).unwrap();

        let repo = from_path(temp.path()).unwrap();
        assert_eq!(repo.git_dir(), temp.path().join(".git").as_path());
    }

    #[test]
    fn missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("nope");

        match from_path(&missing) {
            Err(Error::WorkDirDoesntExist(path)) => assert_eq!(path, missing),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn plain_dir_is_not_a_repo() {
        let temp = tempfile::tempdir().unwrap();

        // A subdirectory's repo doesn't count either.
        OnDisk::init(temp.path().join("inner")).unwrap();

        match from_path(temp.path()) {
            Err(Error::GitDirDoesntExist(path)) => assert_eq!(path, temp.path().join(".git")),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
