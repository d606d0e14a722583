use std::fmt::{self, Display, Formatter};

use super::Kind;

/// Describes the file type as recorded in a tree entry.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
        }
    }

    /// Parse the octal text form stored in a tree entry (e.g. `b"100644"`).
    ///
    /// Leading zeros are rejected because the canonical encoding never
    /// writes them.
    pub fn from_octal_slice(s: &[u8]) -> Option<FileMode> {
        if s.is_empty() || s.len() > 6 || s[0] == b'0' {
            return None;
        }

        let mut value: u32 = 0;
        for &c in s {
            match c {
                b'0'..=b'7' => value = value * 8 + u32::from(c - b'0'),
                _ => return None,
            }
        }

        FileMode::from_value(value)
    }

    /// Returns the kind of object an entry with this mode points at.
    pub fn object_kind(self) -> Kind {
        match self {
            FileMode::Tree => Kind::Tree,
            FileMode::Submodule => Kind::Commit,
            _ => Kind::Blob,
        }
    }
}

/// Formats the mode the way tree entries store it: octal, no leading zeros.
impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:o}", self.to_value())
    }
}
