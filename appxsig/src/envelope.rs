// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! P7X envelope parsing.
//!
//! A P7X envelope is a 4-byte little-endian magic value followed by the raw
//! signed-message bytes, running to the end of the stream:
//!
//! ```text
//! offset 0:  u32 magic            (must equal P7X_FILE_ID)
//! offset 4:  payload to EOF       (raw signed-message bytes)
//! ```
//!
//! The total stream length must be greater than 8 bytes and at most 2 MiB.

use std::io::{Read, Seek, SeekFrom};

use appxsig_abstractions::{Result, SignatureError};

/// Helper trait for `Read + Seek` as a single trait object.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Magic value at offset 0 of a P7X stream ("PKCX" when read as bytes).
pub const P7X_FILE_ID: u32 = 0x5843_4b50;

/// Largest P7X stream accepted, in bytes.
pub const MAX_P7X_STREAM_LEN: u64 = 2 << 20;

/// Smallest P7X stream accepted is strictly larger than this, in bytes.
const MIN_P7X_STREAM_LEN: u64 = 8;

/// Validate the envelope framing of `stream` and return the raw
/// signed-message payload.
///
/// Any structural problem or I/O error fails with the single
/// `AppxSignatureInvalid` error kind; there are no retries and no partial
/// results.
pub fn read_envelope(stream: &mut dyn ReadSeek) -> Result<Vec<u8>> {
    let len = stream
        .seek(SeekFrom::End(0))
        .map_err(|e| SignatureError::invalid(format!("failed to determine stream length: {e}")))?;

    if len <= MIN_P7X_STREAM_LEN || len > MAX_P7X_STREAM_LEN {
        return Err(SignatureError::invalid(format!(
            "stream length {len} is outside the valid P7X range"
        )));
    }

    stream
        .seek(SeekFrom::Start(0))
        .map_err(|e| SignatureError::invalid(format!("failed to rewind stream: {e}")))?;

    let mut magic = [0u8; 4];
    stream
        .read_exact(&mut magic)
        .map_err(|e| SignatureError::invalid(format!("failed to read P7X header: {e}")))?;

    if u32::from_le_bytes(magic) != P7X_FILE_ID {
        return Err(SignatureError::invalid("unexpected P7X header"));
    }

    let payload_len = (len - 4) as usize;
    let mut payload = vec![0u8; payload_len];
    let mut filled = 0usize;
    while filled < payload_len {
        let count = stream
            .read(&mut payload[filled..])
            .map_err(|e| SignatureError::invalid(format!("failed to read P7X payload: {e}")))?;
        if count == 0 {
            break;
        }
        filled += count;
    }

    if filled != payload_len {
        return Err(SignatureError::invalid(format!(
            "short read of P7X payload: got {filled} of {payload_len} bytes"
        )));
    }

    Ok(payload)
}
