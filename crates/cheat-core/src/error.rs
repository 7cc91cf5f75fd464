//! Interpreter failure taxonomy and the user-visible reporting seam.

use thiserror::Error;

/// A failure that removes one code from the active set.
///
/// Every variant names the failing code so hosts can surface actionable
/// messages; sibling codes are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    /// Write-family subtype 3. Master codes set up the hardware engine and
    /// have no meaning in an emulated interpreter.
    #[error("master codes are not needed and not supported ({name})")]
    MasterCode {
        /// Name of the failing code.
        name: String,
    },
    /// Zero-code `0x3`, row execution.
    #[error("row-execution zero-code is not supported ({name})")]
    RowCode {
        /// Name of the failing code.
        name: String,
    },
    /// Zero-code outside the known set.
    #[error("unknown zero-code {opcode:#x} ({name})")]
    UnknownZeroCode {
        /// Name of the failing code.
        name: String,
        /// The three opcode bits of the value word.
        opcode: u8,
    },
    /// Instruction targets the engine's own code region.
    #[error("codes that modify the cheat engine itself are not supported ({name})")]
    SelfModifying {
        /// Name of the failing code.
        name: String,
    },
    /// Fill-and-slide with the float width, which has no defined stride.
    #[error("invalid width for fill and slide ({name})")]
    FillWidth {
        /// Name of the failing code.
        name: String,
    },
    /// Memory-copy parameter word with reserved bits set.
    #[error("invalid value {value:#010x} in memory copy ({name})")]
    CopyValue {
        /// Name of the failing code.
        name: String,
        /// The rejected parameter bits.
        value: u32,
    },
}

/// Destination for user-visible interpreter errors.
///
/// The engine never renders dialogs itself; embedders inject a reporter and
/// decide how failures reach the user.
pub trait ErrorReporter {
    /// Records one code failure.
    fn report(&mut self, error: &CodeError);
}

/// Reporter that accumulates failures for later inspection.
#[derive(Debug, Default)]
pub struct CollectedReports {
    /// Failures in report order.
    pub errors: Vec<CodeError>,
}

impl CollectedReports {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// True when nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ErrorReporter for CollectedReports {
    fn report(&mut self, error: &CodeError) {
        self.errors.push(error.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{CodeError, CollectedReports, ErrorReporter};

    #[test]
    fn messages_name_the_failing_code() {
        let error = CodeError::MasterCode {
            name: "Infinite Lives".into(),
        };
        assert!(error.to_string().contains("Infinite Lives"));

        let error = CodeError::UnknownZeroCode {
            name: "X".into(),
            opcode: 0x5,
        };
        assert!(error.to_string().contains("0x5"));
    }

    #[test]
    fn collected_reports_preserve_order() {
        let mut reports = CollectedReports::new();
        assert!(reports.is_empty());
        reports.report(&CodeError::RowCode { name: "a".into() });
        reports.report(&CodeError::SelfModifying { name: "b".into() });
        assert_eq!(reports.errors.len(), 2);
        assert!(matches!(reports.errors[0], CodeError::RowCode { .. }));
        assert!(matches!(reports.errors[1], CodeError::SelfModifying { .. }));
    }
}
