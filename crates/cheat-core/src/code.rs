//! Code and instruction data model.

/// One decoded AR instruction: a packed command word and its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArEntry {
    /// Packed command word; zero marks a zero-code.
    pub cmd_addr: u32,
    /// Operand word.
    pub value: u32,
}

impl ArEntry {
    /// Builds an entry from its two words.
    #[must_use]
    pub const fn new(cmd_addr: u32, value: u32) -> Self {
        Self { cmd_addr, value }
    }
}

/// A named AR code: an ordered instruction list with enablement flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ArCode {
    /// Name as written in the listing, without the leading `$`.
    pub name: String,
    /// True when the name appears in the enabled-names list.
    pub active: bool,
    /// True when the code came from the user's local listing.
    pub user_defined: bool,
    /// Instructions in listing order.
    pub ops: Vec<ArEntry>,
}

#[cfg(test)]
mod tests {
    use super::{ArCode, ArEntry};

    #[test]
    fn entry_holds_both_words() {
        let entry = ArEntry::new(0x0010_0000, 0x0000_00FF);
        assert_eq!(entry.cmd_addr, 0x0010_0000);
        assert_eq!(entry.value, 0x0000_00FF);
    }

    #[test]
    fn default_code_is_inactive_and_empty() {
        let code = ArCode::default();
        assert!(code.name.is_empty());
        assert!(!code.active);
        assert!(!code.user_defined);
        assert!(code.ops.is_empty());
    }
}
