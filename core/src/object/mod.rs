//! Represents the git concept of an "object": a kind tag plus a payload,
//! identified by the digest of its encoded form.
//!
//! The encoded form shared by all kinds is
//! `"<kind> <payload length>\0<payload>"`. Everything in this module is a
//! pure transformation; no I/O happens here.

use std::str;

use thiserror::Error;

mod attribution;
pub use attribution::{Attribution, AttributionError};

mod commit;
pub use commit::Commit;

mod file_mode;
pub use file_mode::FileMode;

mod id;
pub use id::{Id, ParseIdError, ID_LEN};

mod kind;
pub use kind::Kind;

pub(crate) mod parse_utils;

mod tree;
pub use tree::{Tree, TreeEntry};

/// Describes why encoded bytes could not be read as an object.
///
/// These errors mean the bytes were readable but are not a valid object,
/// as opposed to bytes that could not be decompressed at all.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// The `<kind> <length>\0` header (or a structured payload such as a
    /// tree entry or commit header line) does not follow the grammar.
    #[error("malformed object header: {0}")]
    MalformedHeader(&'static str),

    /// The header's declared length disagrees with the payload.
    #[error("object header declares {declared} bytes but payload has {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}

/// An immutable object value, one of the three supported kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Object {
    Blob(Vec<u8>),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        match self {
            Object::Blob(_) => Kind::Blob,
            Object::Tree(_) => Kind::Tree,
            Object::Commit(_) => Kind::Commit,
        }
    }

    /// Returns the payload bytes (the encoded form without its header).
    pub fn to_payload(&self) -> Vec<u8> {
        match self {
            Object::Blob(content) => content.clone(),
            Object::Tree(tree) => tree.to_payload(),
            Object::Commit(commit) => commit.to_payload(),
        }
    }

    /// Returns the canonical encoded form: header followed by payload.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Object::Blob(content) => encode(Kind::Blob, content),
            _ => encode(self.kind(), &self.to_payload()),
        }
    }

    /// Computes the object's ID from its encoded form.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn id(&self) -> Id {
        Id::for_encoded(&self.encode())
    }

    /// Parses a payload of the given kind.
    pub fn from_payload(kind: Kind, payload: &[u8]) -> Result<Object, DecodeError> {
        Ok(match kind {
            Kind::Blob => Object::Blob(payload.to_vec()),
            Kind::Tree => Object::Tree(Tree::parse(payload)?),
            Kind::Commit => Object::Commit(Commit::parse(payload)?),
        })
    }

    /// Decodes an encoded object (header and payload).
    pub fn decode(encoded: &[u8]) -> Result<Object, DecodeError> {
        let (kind, payload) = split_header(encoded)?;
        Object::from_payload(kind, payload)
    }
}

/// Encodes a payload of the given kind by prefixing the
/// `<kind> <length>\0` header.
pub fn encode(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, payload.len());

    let mut encoded = Vec::with_capacity(header.len() + payload.len());
    encoded.extend_from_slice(header.as_bytes());
    encoded.extend_from_slice(payload);
    encoded
}

/// Encodes a file's bytes as a blob.
pub fn encode_blob(content: &[u8]) -> Vec<u8> {
    encode(Kind::Blob, content)
}

/// Encodes already-sorted tree entries as a tree.
pub fn encode_tree(tree: &Tree) -> Vec<u8> {
    encode(Kind::Tree, &tree.to_payload())
}

/// Encodes a commit.
pub fn encode_commit(commit: &Commit) -> Vec<u8> {
    encode(Kind::Commit, &commit.to_payload())
}

/// Splits an encoded object at the first null byte and validates the
/// `<kind> <length>` header against the remaining payload.
pub fn split_header(encoded: &[u8]) -> Result<(Kind, &[u8]), DecodeError> {
    let nul = encoded
        .iter()
        .position(|b| *b == 0)
        .ok_or(DecodeError::MalformedHeader("missing null terminator"))?;

    let (header, payload) = (&encoded[..nul], &encoded[nul + 1..]);

    let space = header
        .iter()
        .position(|b| *b == b' ')
        .ok_or(DecodeError::MalformedHeader("missing space after kind"))?;

    let kind = Kind::from_name(&header[..space])
        .ok_or(DecodeError::MalformedHeader("unknown object kind"))?;

    let declared = parse_length(&header[space + 1..])
        .ok_or(DecodeError::MalformedHeader("invalid payload length"))?;

    if declared != payload.len() {
        return Err(DecodeError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok((kind, payload))
}

fn parse_length(s: &[u8]) -> Option<usize> {
    if s.is_empty() || !s.iter().all(u8::is_ascii_digit) || (s.len() > 1 && s[0] == b'0') {
        return None;
    }

    str::from_utf8(s).ok()?.parse().ok()
}
