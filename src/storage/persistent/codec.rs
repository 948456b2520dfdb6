//! Framing for snapshot files.
//!
//! Every file written by the file backend holds exactly one value:
//!
//! ```text
//! [magic: 4 bytes "CCZS"][version: 1 byte][length: 4 bytes LE][data: N bytes UTF-8][crc32: 4 bytes LE]
//! ```
//!
//! The CRC covers `data` only. Any mismatch, truncation or trailing garbage is
//! reported as `InvalidData` so a damaged snapshot fails loudly on open.

use std::io::{Error as IoError, ErrorKind, Result as IoResult};

use crc32fast::Hasher;

/// Current frame version.
const FRAME_VERSION: u8 = 1;

/// Magic bytes identifying a snapshot file.
pub const MAGIC: [u8; 4] = *b"CCZS";

const HEADER_LEN: usize = MAGIC.len() + 1 + 4;
const TRAILER_LEN: usize = 4;

/// Reject absurd lengths before allocating (64 MB is far beyond any origin quota).
const MAX_VALUE_SIZE: usize = 64 * 1024 * 1024;

fn invalid(message: String) -> IoError {
    IoError::new(ErrorKind::InvalidData, message)
}

fn checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Frame a value for writing.
pub fn encode(value: &str) -> IoResult<Vec<u8>> {
    let data = value.as_bytes();
    if data.len() > MAX_VALUE_SIZE {
        return Err(invalid(format!(
            "value size {} exceeds maximum {MAX_VALUE_SIZE}",
            data.len()
        )));
    }
    let len = u32::try_from(data.len()).map_err(|_| invalid("value too large".to_string()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + data.len() + TRAILER_LEN);
    out.extend_from_slice(&MAGIC);
    out.push(FRAME_VERSION);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(&checksum(data).to_le_bytes());
    Ok(out)
}

/// Unframe a value read from disk, verifying magic, version, length and CRC.
pub fn decode(bytes: &[u8]) -> IoResult<String> {
    if bytes.len() < HEADER_LEN + TRAILER_LEN {
        return Err(invalid(format!("snapshot truncated: {} bytes", bytes.len())));
    }
    if bytes[..4] != MAGIC {
        return Err(invalid(format!(
            "invalid magic bytes: expected {MAGIC:?}, got {:?}",
            &bytes[..4]
        )));
    }
    if bytes[4] != FRAME_VERSION {
        return Err(invalid(format!(
            "unsupported frame version: {} (expected {FRAME_VERSION})",
            bytes[4]
        )));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&bytes[5..9]);
    let len = u32::from_le_bytes(len_bytes) as usize;
    if len > MAX_VALUE_SIZE {
        return Err(invalid(format!("value size {len} exceeds maximum {MAX_VALUE_SIZE}")));
    }
    if bytes.len() != HEADER_LEN + len + TRAILER_LEN {
        return Err(invalid(format!(
            "snapshot length mismatch: header says {len} data bytes, file has {}",
            bytes.len().saturating_sub(HEADER_LEN + TRAILER_LEN)
        )));
    }

    let data = &bytes[HEADER_LEN..HEADER_LEN + len];
    let mut crc_bytes = [0u8; 4];
    crc_bytes.copy_from_slice(&bytes[HEADER_LEN + len..]);
    let stored = u32::from_le_bytes(crc_bytes);
    let computed = checksum(data);
    if stored != computed {
        return Err(invalid(format!(
            "CRC mismatch: stored={stored:08x}, computed={computed:08x} (data corrupted)"
        )));
    }

    String::from_utf8(data.to_vec()).map_err(|e| invalid(format!("snapshot is not UTF-8: {e}")))
}
