// src/utils/encoding.rs
use std::borrow::Cow;

use sha2::{Digest, Sha256};

/// Decodes raw export bytes into text.
///
/// Exports are usually UTF-8, but older installations of the design tool
/// write latin-1. `encoding_rs` maps latin-1 onto windows-1252, which is a
/// superset for every printable byte.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => {
            tracing::debug!("Document is not valid UTF-8, decoding as latin-1");
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            text
        }
    }
}

/// Hex SHA-256 of the document text, used to key stored extractions.
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
