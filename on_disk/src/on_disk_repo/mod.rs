//! An object store that keeps content on the local file system.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use objstore_core::object::Id;
use objstore_core::repo::{Error, Repo, Result};
use objstore_core::zlib;

use tempfile::NamedTempFile;
use tracing::debug;

mod write_tree;

/// Implementation of `Repo` that stores content on the local file system.
///
/// It uses the same `.git` folder layout as command-line `git` for the
/// parts it touches, so objects it writes can be read by other tools.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
}

impl OnDisk {
    /// Open an existing on-disk repository.
    ///
    /// `work_dir` should be the top-level working directory. A `.git` directory should
    /// exist at this path. Use `init` function to create an empty on-disk repository if
    /// necessary.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(".git");
        if !git_dir.exists() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        Ok(OnDisk { work_dir, git_dir })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init), but only
    /// creates the pieces this store uses: `objects`, `refs`, a `HEAD` that
    /// points at `refs/heads/main`, and a minimal `config`.
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref();
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        fs::create_dir_all(&git_dir)?;

        create_config(&git_dir)?;
        create_head(&git_dir)?;
        create_objects_dir(&git_dir)?;
        create_refs_dir(&git_dir)?;

        debug!("initialized repository in {}", git_dir.display());

        Ok(OnDisk {
            work_dir: work_dir.to_path_buf(),
            git_dir,
        })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the path to the object database.
    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// Return the path at which the object with this ID is (or would be) stored.
    pub fn loose_object_path(&self, id: &Id) -> PathBuf {
        let (dir_name, file_name) = id.loose_path_parts();
        self.objects_dir().join(dir_name).join(file_name)
    }

    fn read_loose_object(&self, id: &Id, path: &Path) -> Result<Vec<u8>> {
        let compressed = match fs::read(path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(Error::NotFound(*id)),
            Err(err) => return Err(err.into()),
        };

        zlib::decompress(&compressed).map_err(|source| Error::CorruptData { id: *id, source })
    }

    // An object file already exists under this ID. Content addressing means it
    // should hold exactly these bytes; anything else is reported, never overwritten.
    fn verify_existing(&self, id: &Id, path: &Path, encoded: &[u8]) -> Result<()> {
        if self.read_loose_object(id, path)? == encoded {
            debug!("object {} already present", id);
            Ok(())
        } else {
            Err(Error::Collision(*id))
        }
    }
}

impl Repo for OnDisk {
    fn put_loose_object(&mut self, encoded: &[u8]) -> Result<Id> {
        let id = Id::for_encoded(encoded);
        let path = self.loose_object_path(&id);

        if path.exists() {
            self.verify_existing(&id, &path, encoded)?;
            return Ok(id);
        }

        let compressed = zlib::compress(encoded)?;

        // `path` always has a parent: the fan-out directory.
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        // Write to a temporary file beside the destination, then link it into
        // place without clobbering so readers never see a partial object.
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&compressed)?;
        temp.as_file().sync_all()?;

        match temp.persist_noclobber(&path) {
            Ok(_) => {
                sync_dir(dir);
                debug!("wrote object {} ({} bytes compressed)", id, compressed.len());
                Ok(id)
            }
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                // Lost a race with another writer of the same object.
                self.verify_existing(&id, &path, encoded)?;
                Ok(id)
            }
            Err(err) => Err(err.error.into()),
        }
    }

    fn get_loose_object(&self, id: &Id) -> Result<Vec<u8>> {
        let path = self.loose_object_path(id);
        let encoded = self.read_loose_object(id, &path)?;
        debug!("read object {}", id);
        Ok(encoded)
    }

    fn has_object(&self, id: &Id) -> Result<bool> {
        Ok(self.loose_object_path(id).is_file())
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    // Best effort: makes the new directory entry durable.
    let synced = fs::File::open(dir).and_then(|d| d.sync_all());
    if let Err(err) = synced {
        debug!("couldn't sync directory {}: {}", dir.display(), err);
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

fn create_config(git_dir: &Path) -> io::Result<()> {
    let config_path = git_dir.join("config");
    let config_txt = "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n";

    fs::write(config_path, config_txt)
}

fn create_head(git_dir: &Path) -> io::Result<()> {
    let head_path = git_dir.join("HEAD");
    let head_txt = "ref: refs/heads/main\n";

    fs::write(head_path, head_txt)
}

fn create_objects_dir(git_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(git_dir.join("objects"))
}

fn create_refs_dir(git_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(git_dir.join("refs/heads"))?;
    fs::create_dir_all(git_dir.join("refs/tags"))
}
