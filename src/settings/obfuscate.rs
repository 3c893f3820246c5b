//! Password obfuscation for the settings file
//!
//! This keeps the password from being readable at a glance in the settings
//! file. It is NOT encryption: anyone with the file can reverse it.
//! The encoding is base64, then zlib, then base64 again.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use std::io::{Read, Write};

use crate::error::{DwcError, Result};

/// Encode a plain-text password for storage
pub fn obfuscate(plain: &str) -> Result<String> {
    let inner = BASE64.encode(plain.as_bytes());

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(inner.as_bytes())?;
    let compressed = encoder.finish()?;

    Ok(BASE64.encode(compressed))
}

/// Decode a stored password
pub fn reveal(stored: &str) -> Result<String> {
    let compressed = BASE64
        .decode(stored.trim())
        .map_err(|e| DwcError::Config(format!("Stored password is not valid base64: {}", e)))?;

    let mut inner = String::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_string(&mut inner)
        .map_err(|e| DwcError::Config(format!("Stored password cannot be decoded: {}", e)))?;

    let plain = BASE64
        .decode(inner.trim())
        .map_err(|e| DwcError::Config(format!("Stored password is corrupt: {}", e)))?;

    String::from_utf8(plain)
        .map_err(|e| DwcError::Config(format!("Stored password is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obfuscated_value_hides_password() {
        let stored = obfuscate("s3cret!").unwrap();
        assert!(!stored.contains("s3cret"));
        assert_eq!(reveal(&stored).unwrap(), "s3cret!");
    }

    #[test]
    fn test_reveal_non_ascii_password() {
        let stored = obfuscate("pässwörd €").unwrap();
        assert_eq!(reveal(&stored).unwrap(), "pässwörd €");
    }

    #[test]
    fn test_reveal_rejects_garbage() {
        assert!(matches!(reveal("not base64 at all!"), Err(DwcError::Config(_))));
        // valid base64 but not zlib data
        assert!(matches!(reveal("aGVsbG8="), Err(DwcError::Config(_))));
    }
}
