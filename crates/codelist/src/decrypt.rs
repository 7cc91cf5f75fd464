//! Decryption seam for encrypted listings.
//!
//! Encrypted codes ship as `XXXX-XXXX-XXXXX` lines that decode to full
//! instructions. The algorithm itself lives outside this crate: hosts wrap
//! whichever community-compatible implementation they trust behind
//! [`Decryptor`], and the parser buffers blocks per code and hands them
//! over at each code boundary.

use cheat_core::ArEntry;
use thiserror::Error;

/// Failure decoding one buffered block sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptError {
    /// No decryption implementation is wired into this host.
    #[error("encrypted codes are not supported by this host")]
    Unavailable,
    /// The implementation rejected a block.
    #[error("invalid encrypted block: {0}")]
    InvalidBlock(String),
}

/// Decodes buffered encrypted blocks into instructions.
pub trait Decryptor {
    /// Appends the instructions decoded from `blocks` (13-character
    /// concatenations of the dash-separated groups, in listing order) onto
    /// `ops`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecryptError`] when the block sequence cannot be decoded;
    /// the parser reports it against the owning code.
    fn decrypt(&self, blocks: &[String], ops: &mut Vec<ArEntry>) -> Result<(), DecryptError>;
}

/// Default seam implementation for hosts without a decryption backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecryptUnavailable;

impl Decryptor for DecryptUnavailable {
    fn decrypt(&self, _blocks: &[String], _ops: &mut Vec<ArEntry>) -> Result<(), DecryptError> {
        Err(DecryptError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{DecryptError, DecryptUnavailable, Decryptor};

    #[test]
    fn unavailable_backend_rejects_every_block() {
        let mut ops = Vec::new();
        let result = DecryptUnavailable.decrypt(&["0123ABCD01234".into()], &mut ops);
        assert_eq!(result, Err(DecryptError::Unavailable));
        assert!(ops.is_empty());
    }
}
