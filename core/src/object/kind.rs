use std::fmt::{self, Display, Formatter};

/// Describes the fundamental object type (blob, tree, or commit).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// Parses the kind name used in object headers.
    ///
    /// Returns `None` for anything other than `blob`, `tree`, or `commit`.
    pub fn from_name(name: &[u8]) -> Option<Kind> {
        match name {
            b"blob" => Some(Kind::Blob),
            b"tree" => Some(Kind::Tree),
            b"commit" => Some(Kind::Commit),
            _ => None,
        }
    }

    /// Returns the kind name used in object headers.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
