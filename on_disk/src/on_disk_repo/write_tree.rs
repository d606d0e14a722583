use std::fs::{self, DirEntry, FileType};
use std::path::Path;

use objstore_core::object::{encode_blob, FileMode, Id, Object, Tree, TreeEntry};
use objstore_core::repo::{Error, Repo, Result};

use tracing::{debug, trace};

use super::OnDisk;

impl OnDisk {
    /// Snapshots `dir` recursively: every regular file becomes a blob and
    /// every non-empty subdirectory a nested tree. Returns the ID of the
    /// top-level tree, which is stored even if it has no entries.
    ///
    /// The repository's own `.git` directory is never included, at any depth.
    /// Subdirectories with nothing to record are left out of their parent.
    pub fn write_tree<P: AsRef<Path>>(&mut self, dir: P) -> Result<Id> {
        let dir = dir.as_ref().canonicalize()?;
        let git_dir = self.git_dir().canonicalize()?;

        let tree = self.build_tree(&dir, &git_dir)?;
        self.put_object(&Object::Tree(tree))
    }

    fn build_tree(&mut self, dir: &Path, git_dir: &Path) -> Result<Tree> {
        let mut entries = Vec::new();

        for dir_entry in fs::read_dir(dir)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();

            let file_type = dir_entry.file_type()?;

            if is_git_dir(&path, file_type, git_dir) {
                trace!("skipping object database at {}", path.display());
                continue;
            }

            if file_type.is_dir() {
                let subtree = self.build_tree(&path, git_dir)?;
                if subtree.is_empty() {
                    continue;
                }

                let id = self.put_object(&Object::Tree(subtree))?;
                entries.push(TreeEntry::new(FileMode::Tree, entry_name(&dir_entry)?, id));
            } else if let Some((mode, content)) = blob_content(&dir_entry, file_type)? {
                let id = self.put_loose_object(&encode_blob(&content))?;
                entries.push(TreeEntry::new(mode, entry_name(&dir_entry)?, id));
            } else {
                trace!("skipping special file {}", path.display());
            }
        }

        let mut tree = Tree::new(entries);
        tree.sort();

        debug!(
            "snapshotted {} ({} entries)",
            dir.display(),
            tree.entries.len()
        );

        Ok(tree)
    }
}

// `git_dir` is canonical, so a symbolic link that resolves to it is
// skipped along with the directory itself.
fn is_git_dir(path: &Path, file_type: FileType, git_dir: &Path) -> bool {
    path == git_dir
        || (file_type.is_symlink()
            && path
                .canonicalize()
                .map(|target| target == git_dir)
                .unwrap_or(false))
}

fn entry_name(dir_entry: &DirEntry) -> Result<String> {
    dir_entry
        .file_name()
        .into_string()
        .map_err(|_| Error::InvalidPathName(dir_entry.path()))
}

// Returns the mode and blob content for files and symbolic links, or
// `None` for anything else (sockets, fifos, devices).
fn blob_content(dir_entry: &DirEntry, file_type: FileType) -> Result<Option<(FileMode, Vec<u8>)>> {
    if file_type.is_file() {
        let content = fs::read(dir_entry.path())?;
        Ok(Some((file_mode(dir_entry)?, content)))
    } else if file_type.is_symlink() {
        symlink_content(dir_entry)
    } else {
        Ok(None)
    }
}

#[cfg(unix)]
fn file_mode(dir_entry: &DirEntry) -> Result<FileMode> {
    use std::os::unix::fs::PermissionsExt;

    let mode = dir_entry.metadata()?.permissions().mode();
    if mode & 0o111 != 0 {
        Ok(FileMode::Executable)
    } else {
        Ok(FileMode::Normal)
    }
}

#[cfg(not(unix))]
fn file_mode(_dir_entry: &DirEntry) -> Result<FileMode> {
    Ok(FileMode::Normal)
}

#[cfg(unix)]
fn symlink_content(dir_entry: &DirEntry) -> Result<Option<(FileMode, Vec<u8>)>> {
    use std::os::unix::ffi::OsStrExt;

    let target = fs::read_link(dir_entry.path())?;
    Ok(Some((
        FileMode::SymbolicLink,
        target.as_os_str().as_bytes().to_vec(),
    )))
}

#[cfg(not(unix))]
fn symlink_content(_dir_entry: &DirEntry) -> Result<Option<(FileMode, Vec<u8>)>> {
    Ok(None)
}
