//! Flat header-field extraction for ABC documents.

use serde::Serialize;

/// Header fields read from a notation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    /// `T:`
    Title,
    /// `C:`
    Composer,
    /// `K:`
    Key,
    /// `M:`
    Meter,
    /// `Q:`
    Tempo,
    /// `L:`
    DefaultNoteLength,
}

impl MetadataField {
    /// The line prefix that introduces this field, colon included.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Title => "T:",
            Self::Composer => "C:",
            Self::Key => "K:",
            Self::Meter => "M:",
            Self::Tempo => "Q:",
            Self::DefaultNoteLength => "L:",
        }
    }
}

/// Metadata derived from a document's text. Recomputed on every call; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Composer")]
    pub composer: Option<String>,
    #[serde(rename = "Key")]
    pub key: Option<String>,
    #[serde(rename = "Meter")]
    pub meter: Option<String>,
    #[serde(rename = "Tempo")]
    pub tempo: Option<String>,
    #[serde(rename = "Default-Note-Length")]
    pub default_note_length: Option<String>,
    /// Everything after the first `K:` line, trimmed. Empty without a `K:` line.
    pub body: String,
}

impl MetadataRecord {
    /// Returns the value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: MetadataField) -> Option<&str> {
        let value = match field {
            MetadataField::Title => &self.title,
            MetadataField::Composer => &self.composer,
            MetadataField::Key => &self.key,
            MetadataField::Meter => &self.meter,
            MetadataField::Tempo => &self.tempo,
            MetadataField::DefaultNoteLength => &self.default_note_length,
        };
        value.as_deref()
    }
}

/// Extracts header fields and the tune body from `text`.
///
/// A field is taken from the first line that starts literally with its marker
/// (`T:` for Title, and so on); the value is the rest of that line, trimmed.
/// Each field is looked up independently and a missing one is simply `None`.
///
/// # Example
///
/// ```
/// use auto_fiddler::notation::extract_metadata;
///
/// let record = extract_metadata("X:1\nT:Some Title\nK:Cmaj\nCDEF GABc|\n");
/// assert_eq!(record.title.as_deref(), Some("Some Title"));
/// assert_eq!(record.body, "CDEF GABc|");
/// ```
#[must_use]
pub fn extract_metadata(text: &str) -> MetadataRecord {
    MetadataRecord {
        title: first_field_value(text, MetadataField::Title),
        composer: first_field_value(text, MetadataField::Composer),
        key: first_field_value(text, MetadataField::Key),
        meter: first_field_value(text, MetadataField::Meter),
        tempo: first_field_value(text, MetadataField::Tempo),
        default_note_length: first_field_value(text, MetadataField::DefaultNoteLength),
        body: body_after_key(text).to_string(),
    }
}

fn first_field_value(text: &str, field: MetadataField) -> Option<String> {
    let marker = field.marker();
    text.lines()
        .find_map(|line| line.strip_prefix(marker))
        .map(|value| value.trim().to_string())
}

fn body_after_key(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.starts_with(MetadataField::Key.marker()) {
            return text[offset..].trim();
        }
    }
    ""
}
