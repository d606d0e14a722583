//! The compression envelope used for objects at rest: a complete zlib
//! stream (header, deflate body, and Adler-32 checksum), as git writes it.

use std::io::{self, Write};

use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};
use thiserror::Error;

/// Reasons a byte sequence is not a valid zlib stream.
#[derive(Debug, Error)]
pub enum DecompressError {
    /// The stream ended before the final block and checksum.
    #[error("zlib stream is truncated")]
    Truncated,

    /// Extra bytes follow the end of the stream.
    #[error("unexpected data after end of zlib stream")]
    TrailingData,

    /// Bad header, bad deflate data, or checksum mismatch.
    #[error("invalid zlib stream: {0}")]
    Invalid(#[from] flate2::DecompressError),
}

/// Compresses `data` into a zlib stream using git's default level.
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let out = Vec::with_capacity(data.len() / 2 + 16);
    let mut encoder = ZlibEncoder::new(out, Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Decompresses a complete zlib stream.
///
/// Succeeds only if the stream is complete, its checksum verifies, and no
/// bytes follow it.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let mut inflater = Decompress::new(true);
    let mut out: Vec<u8> = Vec::with_capacity(data.len() * 2 + 64);

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(4096));
        }

        let total_in = inflater.total_in();
        let total_out = inflater.total_out();

        let status = inflater.decompress_vec(
            &data[total_in as usize..],
            &mut out,
            FlushDecompress::None,
        )?;

        if status == Status::StreamEnd {
            break;
        }

        // No progress with room left in `out` means the input ran dry.
        if inflater.total_in() == total_in && inflater.total_out() == total_out {
            return Err(DecompressError::Truncated);
        }
    }

    if inflater.total_in() as usize != data.len() {
        return Err(DecompressError::TrailingData);
    }

    Ok(out)
}
