//! Section-addressed listing text.
//!
//! Code listings are plain text split into named `[Section]` blocks. This
//! container keeps sections in file order, hands out their lines, and
//! renders back to text for the save path.

/// A listing file split into named sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    sections: Vec<(String, Vec<String>)>,
}

impl Listing {
    /// Creates an empty listing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Parses listing text. Lines before the first section header are
    /// ignored, as are blank lines; everything else is kept verbatim after
    /// trimming surrounding whitespace.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<(String, Vec<String>)> = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push((name.to_string(), Vec::new()));
                continue;
            }

            if let Some((_, lines)) = sections.last_mut() {
                lines.push(line.to_string());
            }
        }

        Self { sections }
    }

    /// Returns the lines of `section`, empty when the section is absent.
    #[must_use]
    pub fn lines(&self, section: &str) -> &[String] {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .map_or(&[], |(_, lines)| lines.as_slice())
    }

    /// Replaces the lines of `section`, appending the section when absent.
    pub fn set_lines(&mut self, section: &str, lines: Vec<String>) {
        match self.sections.iter_mut().find(|(name, _)| name == section) {
            Some((_, existing)) => *existing = lines,
            None => self.sections.push((section.to_string(), lines)),
        }
    }

    /// Renders the listing back to text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, lines) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}
