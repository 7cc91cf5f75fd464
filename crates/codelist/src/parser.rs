//! Listing parser and persistence for AR codes.
//!
//! Two listings feed the parser: the distributed global one and the user's
//! local one. Codes open with a `$name` line; the body is either plain
//! `XXXXXXXX XXXXXXXX` instruction lines or encrypted `XXXX-XXXX-XXXXX`
//! lines buffered per code and handed to the decryptor at the code
//! boundary. Malformed lines are reported and skipped; the parse never
//! aborts.

use std::collections::HashSet;

use cheat_core::{ArCode, ArEntry};
use thiserror::Error;

use crate::decrypt::{DecryptError, Decryptor};
use crate::listing::Listing;

/// Section holding code bodies.
pub const CODES_SECTION: &str = "ActionReplay";
/// Section holding enabled-code markers, read from the local listing only.
pub const ENABLED_SECTION: &str = "ActionReplay_Enabled";

/// A recoverable problem at one listing line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-indexed line number within the codes section.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Classification of listing parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// First token of a plain instruction line is not valid hex.
    #[error("invalid instruction address: {0}")]
    InvalidAddress(String),
    /// Second token of a plain instruction line is not valid hex.
    #[error("invalid instruction value: {0}")]
    InvalidValue(String),
    /// Line matches neither a name, a plain instruction, nor an encrypted
    /// block.
    #[error("unrecognized line: {0}")]
    UnrecognizedLine(String),
    /// The decryptor rejected a code's buffered blocks.
    #[error("cannot decrypt code {name}: {source}")]
    Decrypt {
        /// Name of the owning code.
        name: String,
        /// Backend failure.
        source: DecryptError,
    },
}

/// Result of parsing a pair of listings.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Parsed codes, global listing first, in listing order.
    pub codes: Vec<ArCode>,
    /// Recoverable errors, in discovery order.
    pub errors: Vec<ParseError>,
}

/// Parses the codes of both listings.
///
/// Enablement comes from the local listing's enabled section; codes from the
/// local listing are marked user-defined.
#[must_use]
pub fn load_codes(global: &Listing, local: &Listing, decryptor: &dyn Decryptor) -> LoadOutcome {
    let enabled_names: HashSet<&str> = local
        .lines(ENABLED_SECTION)
        .iter()
        .filter_map(|line| line.strip_prefix('$'))
        .collect();

    let mut outcome = LoadOutcome::default();
    for (listing, user_defined) in [(global, false), (local, true)] {
        parse_section(listing, user_defined, &enabled_names, decryptor, &mut outcome);
    }
    outcome
}

fn parse_section(
    listing: &Listing,
    user_defined: bool,
    enabled_names: &HashSet<&str>,
    decryptor: &dyn Decryptor,
    outcome: &mut LoadOutcome,
) {
    let mut current = ArCode::default();
    let mut encrypted: Vec<String> = Vec::new();
    let mut last_line = 0;

    for (index, line) in listing.lines(CODES_SECTION).iter().enumerate() {
        let number = index + 1;
        last_line = number;

        if let Some(name) = line.strip_prefix('$') {
            commit(&mut current, &mut encrypted, number, decryptor, outcome);
            current.name = name.to_string();
            current.active = enabled_names.contains(name);
            current.user_defined = user_defined;
            continue;
        }

        let pieces: Vec<&str> = line.split_whitespace().collect();
        if pieces.len() == 2 && pieces[0].len() == 8 && pieces[1].len() == 8 {
            match parse_entry(pieces[0], pieces[1]) {
                Ok(entry) => current.ops.push(entry),
                Err(kind) => outcome.errors.push(ParseError { line: number, kind }),
            }
            continue;
        }

        let groups: Vec<&str> = line.split('-').collect();
        if groups.len() == 3
            && groups[0].len() == 4
            && groups[1].len() == 4
            && groups[2].len() == 5
        {
            encrypted.push(format!("{}{}{}", groups[0], groups[1], groups[2]));
            continue;
        }

        outcome.errors.push(ParseError {
            line: number,
            kind: ParseErrorKind::UnrecognizedLine(line.clone()),
        });
    }

    commit(&mut current, &mut encrypted, last_line, decryptor, outcome);
}

/// Commits the in-progress code exactly once, decrypting any buffered
/// blocks into it first.
fn commit(
    current: &mut ArCode,
    encrypted: &mut Vec<String>,
    line: usize,
    decryptor: &dyn Decryptor,
    outcome: &mut LoadOutcome,
) {
    if current.ops.is_empty() && encrypted.is_empty() {
        return;
    }

    if !encrypted.is_empty() {
        if let Err(source) = decryptor.decrypt(encrypted, &mut current.ops) {
            outcome.errors.push(ParseError {
                line,
                kind: ParseErrorKind::Decrypt {
                    name: current.name.clone(),
                    source,
                },
            });
        }
        encrypted.clear();
    }

    let user_defined = current.user_defined;
    outcome.codes.push(std::mem::take(current));
    current.user_defined = user_defined;
}

fn parse_entry(addr: &str, value: &str) -> Result<ArEntry, ParseErrorKind> {
    let cmd_addr = u32::from_str_radix(addr, 16)
        .map_err(|_| ParseErrorKind::InvalidAddress(addr.to_string()))?;
    let value = u32::from_str_radix(value, 16)
        .map_err(|_| ParseErrorKind::InvalidValue(value.to_string()))?;
    Ok(ArEntry::new(cmd_addr, value))
}

/// Writes the enabled-names list and the user-defined codes back into the
/// local listing's sections.
pub fn save_codes(local: &mut Listing, codes: &[ArCode]) {
    let mut enabled_lines = Vec::new();
    let mut code_lines = Vec::new();

    for code in codes {
        if code.active {
            enabled_lines.push(format!("${}", code.name));
        }
        if code.user_defined {
            code_lines.push(format!("${}", code.name));
            for op in &code.ops {
                code_lines.push(format!("{:08X} {:08X}", op.cmd_addr, op.value));
            }
        }
    }

    local.set_lines(ENABLED_SECTION, enabled_lines);
    local.set_lines(CODES_SECTION, code_lines);
}
