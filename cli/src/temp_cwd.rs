use std::{
    env,
    path::{Path, PathBuf},
};

// Switches the process working directory for the lifetime of the guard
// and switches back on drop. Commands locate their repo from the current
// directory, so in-process tests need this to aim them at a scratch repo.
//
// The working directory is process-wide state: every test that creates
// a TempCwd must be marked #[serial]. Test-only, so failures panic.
pub(crate) struct TempCwd {
    restore_to: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let restore_to = env::current_dir().expect("current dir is unreadable");
        env::set_current_dir(path.as_ref()).expect("can't enter temporary dir");

        TempCwd { restore_to }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.restore_to).expect("can't restore working dir");
    }
}
