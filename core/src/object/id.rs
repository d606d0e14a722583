use std::fmt::{self, Write};
use std::str::FromStr;

use sha1::{Digest, Sha1};
use thiserror::Error;

/// An error which can be returned when parsing an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains an uppercase letter.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID string is too large to store in target integer type.
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID string is too small to store in target integer type.
    #[error("value is less than 40 digits long")]
    Underflow,

    /// Value was zero.
    #[error("ID would be zero")]
    Zero,
}

/// Number of raw bytes in an object ID.
pub const ID_LEN: usize = 20;

/// An object ID identifies an object by the SHA-1 digest of its encoded form.
/// It is stored as a 20-byte signature, but is always rendered as 40 lowercase
/// hex digits when it crosses the storage boundary.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut raw = [0u8; ID_LEN];
                raw.copy_from_slice(id);
                Ok(Id { id: raw })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Computes the ID for an already-encoded object (header and payload).
    pub fn for_encoded(encoded: &[u8]) -> Id {
        let mut hasher = Sha1::new();
        hasher.update(encoded);

        let mut id = [0u8; ID_LEN];
        id.copy_from_slice(hasher.finalize().as_slice());
        Id { id }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut raw = [0u8; ID_LEN];
                for (byte, pair) in raw.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }

                if raw.iter().all(|x| *x == 0) {
                    Err(ParseIdError::Zero)
                } else {
                    Ok(Id { id: raw })
                }
            }
            0 => Err(ParseIdError::Empty),
            n if n < 40 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Returns the raw 20-byte form, as stored inside tree entries.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Splits the hex form into the two-character fan-out directory name
    /// and the remaining 38-character file name.
    pub fn loose_path_parts(&self) -> (String, String) {
        let mut hex = self.to_string();
        let file_name = hex.split_off(2);
        (hex, file_name)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
