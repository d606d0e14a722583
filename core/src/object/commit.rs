use std::str;

use super::parse_utils::{header, next_line};
use super::{Attribution, DecodeError, Id};

/// A point-in-time record referencing a tree and an optional parent commit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    pub tree: Id,
    pub parent: Option<Id>,
    pub author: Attribution,
    pub committer: Attribution,
    pub message: String,
}

impl Commit {
    /// Encodes the payload text:
    ///
    /// ```text
    /// tree <hex>
    /// parent <hex>        (only if present)
    /// author <attribution>
    /// committer <attribution>
    ///
    /// <message>
    /// ```
    ///
    /// The message is terminated with a single newline unless it already
    /// ends with one.
    pub fn to_payload(&self) -> Vec<u8> {
        let mut text = format!("tree {}\n", self.tree);
        if let Some(parent) = &self.parent {
            text.push_str(&format!("parent {}\n", parent));
        }
        text.push_str(&format!("author {}\n", self.author));
        text.push_str(&format!("committer {}\n", self.committer));
        text.push('\n');
        text.push_str(&self.message);
        if !self.message.ends_with('\n') {
            text.push('\n');
        }
        text.into_bytes()
    }

    /// Parses a commit payload.
    ///
    /// Unknown header lines after `committer` (e.g. `gpgsig`) are skipped.
    /// The single trailing newline written by `to_payload` is removed from
    /// the message.
    pub fn parse(payload: &[u8]) -> Result<Commit, DecodeError> {
        let (line, rest) = next_line(payload).ok_or(MISSING_TREE)?;
        let tree = header(line, b"tree").ok_or(MISSING_TREE)?;
        let tree = parse_id(tree)?;

        let (mut line, mut rest) = next_line(rest).ok_or(MISSING_AUTHOR)?;

        let mut parent = None;
        if let Some(parent_id) = header(line, b"parent") {
            parent = Some(parse_id(parent_id)?);
            let (next, tail) = next_line(rest).ok_or(MISSING_AUTHOR)?;
            line = next;
            rest = tail;
        }

        if header(line, b"parent").is_some() {
            return Err(DecodeError::MalformedHeader(
                "commit has more than one parent",
            ));
        }

        let author = header(line, b"author").ok_or(MISSING_AUTHOR)?;
        let author = Attribution::parse(author).ok_or(BAD_ATTRIBUTION)?;

        let (line, mut rest) = next_line(rest).ok_or(MISSING_COMMITTER)?;
        let committer = header(line, b"committer").ok_or(MISSING_COMMITTER)?;
        let committer = Attribution::parse(committer).ok_or(BAD_ATTRIBUTION)?;

        // Skip any extra headers (and their continuation lines) up to the blank line.
        loop {
            let (line, tail) = next_line(rest).ok_or(DecodeError::MalformedHeader(
                "commit is missing the blank line before its message",
            ))?;
            rest = tail;
            if line.is_empty() {
                break;
            }
        }

        let message = str::from_utf8(rest)
            .map_err(|_| DecodeError::MalformedHeader("commit message is not valid UTF-8"))?;
        let message = message.strip_suffix('\n').unwrap_or(message);

        Ok(Commit {
            tree,
            parent,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

const MISSING_TREE: DecodeError = DecodeError::MalformedHeader("commit is missing its tree");
const MISSING_AUTHOR: DecodeError = DecodeError::MalformedHeader("commit is missing its author");
const MISSING_COMMITTER: DecodeError =
    DecodeError::MalformedHeader("commit is missing its committer");
const BAD_ATTRIBUTION: DecodeError =
    DecodeError::MalformedHeader("commit has a corrupt author or committer");

fn parse_id(hex: &[u8]) -> Result<Id, DecodeError> {
    Id::from_hex(hex).map_err(|_| DecodeError::MalformedHeader("commit has an invalid object ID"))
}
