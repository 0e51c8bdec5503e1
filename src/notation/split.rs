//! Splitting multi-tune documents at their `X:` reference lines.

/// Line prefix that opens a tune inside a document.
pub const TUNE_HEADER_MARKER: &str = "X:";

/// One tune cut out of a larger document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TuneSection {
    /// Trimmed value of the `X:` line (usually a number, may be empty).
    pub reference: String,
    /// The tune's text, from its `X:` line to the line before the next one.
    pub text: String,
}

impl TuneSection {
    /// Returns true if the tune header reaches a `K:` line.
    #[must_use]
    pub fn has_key_field(&self) -> bool {
        self.text.lines().any(|line| line.starts_with("K:"))
    }
}

/// Splits `text` into tunes, one per line beginning with `X:`.
///
/// Anything before the first `X:` line (a file header, free text) belongs to
/// no tune and is dropped. Trailing whitespace of each section is trimmed and
/// a single newline kept. A document with no `X:` line yields no sections.
#[must_use]
pub fn split_collection(text: &str) -> Vec<TuneSection> {
    let mut sections: Vec<TuneSection> = Vec::new();

    for line in text.split_inclusive('\n') {
        if let Some(reference) = line.strip_prefix(TUNE_HEADER_MARKER) {
            sections.push(TuneSection {
                reference: reference.trim().to_string(),
                text: String::new(),
            });
        }
        if let Some(current) = sections.last_mut() {
            current.text.push_str(line);
        }
    }

    for section in &mut sections {
        let trimmed_len = section.text.trim_end().len();
        section.text.truncate(trimmed_len);
        section.text.push('\n');
    }
    sections
}
