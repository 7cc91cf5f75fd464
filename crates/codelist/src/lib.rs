//! Listing ingestion for the Action Replay cheat engine.
//!
//! Turns sectioned listing text into [`cheat_core::ArCode`] values, writes
//! user-defined codes back out, and exposes the decryption seam for
//! encrypted listings.

/// Decryption seam for encrypted listings.
pub mod decrypt;
pub use decrypt::{DecryptError, DecryptUnavailable, Decryptor};

/// Section-addressed listing text.
pub mod listing;
pub use listing::Listing;

/// Listing parser and persistence.
pub mod parser;
pub use parser::{
    load_codes, save_codes, LoadOutcome, ParseError, ParseErrorKind, CODES_SECTION,
    ENABLED_SECTION,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
