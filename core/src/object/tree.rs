use super::{DecodeError, FileMode, Id, ID_LEN};

/// A single (mode, name, target) triple inside a tree object.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub name: String,
    pub id: Id,
}

impl TreeEntry {
    pub fn new<S: Into<String>>(mode: FileMode, name: S, id: Id) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.into(),
            id,
        }
    }
}

/// A directory snapshot: an ordered list of entries.
///
/// The codec writes entries in the order given. Callers that build trees
/// from a directory are responsible for sorting by name first (see
/// `Tree::sort`) so that the encoded form is deterministic.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Tree {
        Tree { entries }
    }

    /// Sorts entries by name, byte-wise ascending.
    pub fn sort(&mut self) {
        self.entries
            .sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the payload: `<mode> <name>\0<20 raw id bytes>` per entry.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        for entry in &self.entries {
            payload.extend_from_slice(entry.mode.to_string().as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(entry.name.as_bytes());
            payload.push(0);
            payload.extend_from_slice(entry.id.as_bytes());
        }
        payload
    }

    /// Parses a tree payload.
    pub fn parse(payload: &[u8]) -> Result<Tree, DecodeError> {
        let mut entries = Vec::new();
        let mut state = ScanState::Mode;
        let mut rest = payload;

        let mut mode = FileMode::Normal;
        let mut name = String::new();

        while !rest.is_empty() {
            state = match state {
                ScanState::Mode => {
                    let end = position(rest, b' ')
                        .ok_or(DecodeError::MalformedHeader("tree entry is missing its mode"))?;
                    mode = FileMode::from_octal_slice(&rest[..end])
                        .ok_or(DecodeError::MalformedHeader("tree entry has an unknown mode"))?;
                    rest = &rest[end + 1..];
                    ScanState::Name
                }

                ScanState::Name => {
                    let end = position(rest, 0)
                        .ok_or(DecodeError::MalformedHeader("tree entry name is unterminated"))?;
                    if end == 0 {
                        return Err(DecodeError::MalformedHeader("tree entry name is empty"));
                    }
                    name = String::from_utf8(rest[..end].to_vec()).map_err(|_| {
                        DecodeError::MalformedHeader("tree entry name is not valid UTF-8")
                    })?;
                    rest = &rest[end + 1..];
                    ScanState::Id
                }

                ScanState::Id => {
                    if rest.len() < ID_LEN {
                        return Err(DecodeError::MalformedHeader("tree entry ID is truncated"));
                    }
                    let (id, tail) = rest.split_at(ID_LEN);
                    let id = Id::new(id)
                        .map_err(|_| DecodeError::MalformedHeader("tree entry ID is truncated"))?;

                    entries.push(TreeEntry {
                        mode,
                        name: std::mem::take(&mut name),
                        id,
                    });
                    rest = tail;
                    ScanState::Mode
                }
            };
        }

        match state {
            ScanState::Mode => Ok(Tree { entries }),
            ScanState::Name => Err(DecodeError::MalformedHeader(
                "tree entry name is unterminated",
            )),
            ScanState::Id => Err(DecodeError::MalformedHeader("tree entry ID is truncated")),
        }
    }
}

// Which field of the current entry the scanner expects next.
#[derive(Clone, Copy, Debug)]
enum ScanState {
    Mode,
    Name,
    Id,
}

fn position(s: &[u8], c: u8) -> Option<usize> {
    s.iter().position(|b| *b == c)
}
