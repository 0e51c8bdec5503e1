//! Shape detection for notation documents.
//!
//! Classification only needs to know what a document *is* (one tune, a
//! collection, something else, or garbage), so interpretation is a small trait
//! returning a closed enum. `AbcInterpreter` is a structural reader of ABC
//! headers; it does not parse the music itself.

use super::split::{TUNE_HEADER_MARKER, split_collection};

/// What a document turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// A single tune.
    Tune,
    /// Several tunes bundled in one document (an opus).
    Collection {
        /// Number of tunes found.
        tunes: usize,
    },
    /// Readable text, but neither a tune nor a collection.
    Unrecognized,
    /// The content could not be read as notation at all.
    ParseFailed {
        /// Why reading failed.
        reason: String,
    },
}

/// Capability to interpret raw document bytes.
pub trait Interpreter: Send + Sync {
    /// Decides the shape of `content`.
    fn interpret(&self, content: &[u8]) -> Interpretation;
}

/// Structural interpreter for ABC notation.
///
/// Rules, in order:
/// - empty or binary (NUL-containing) content fails to parse;
/// - every `X:` tune header must reach a `K:` line, or parsing fails;
/// - two or more tune headers make a collection, exactly one a tune;
/// - with no `X:` header, a `K:` line alone still makes a tune;
/// - anything else is unrecognized.
///
/// Non-UTF-8 bytes are decoded lossily: older tune sites serve Latin-1.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbcInterpreter;

impl Interpreter for AbcInterpreter {
    fn interpret(&self, content: &[u8]) -> Interpretation {
        if content.contains(&0) {
            return Interpretation::ParseFailed {
                reason: "binary content".to_string(),
            };
        }

        let text = String::from_utf8_lossy(content);
        if text.trim().is_empty() {
            return Interpretation::ParseFailed {
                reason: "empty document".to_string(),
            };
        }

        let sections = split_collection(&text);
        if let Some(broken) = sections.iter().find(|s| !s.has_key_field()) {
            return Interpretation::ParseFailed {
                reason: format!(
                    "tune {}{} has no K: field",
                    TUNE_HEADER_MARKER, broken.reference
                ),
            };
        }

        match sections.len() {
            0 if text.lines().any(|line| line.starts_with("K:")) => Interpretation::Tune,
            0 => Interpretation::Unrecognized,
            1 => Interpretation::Tune,
            tunes => Interpretation::Collection { tunes },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(text: &str) -> Interpretation {
        AbcInterpreter.interpret(text.as_bytes())
    }

    #[test]
    fn test_single_tune() {
        assert_eq!(
            interpret("X:1\nT:Butterfly\nM:9/8\nK:Em\nB2E G2E F3|\n"),
            Interpretation::Tune
        );
    }

    #[test]
    fn test_key_without_reference_is_a_tune() {
        assert_eq!(interpret("T:Loose\nK:D\nABcd|\n"), Interpretation::Tune);
    }

    #[test]
    fn test_collection_counts_tunes() {
        let text = "X:1\nT:One\nK:G\nG|\n\nX:2\nT:Two\nK:D\nD|\n\nX:3\nT:Three\nK:A\nA|\n";
        assert_eq!(interpret(text), Interpretation::Collection { tunes: 3 });
    }

    #[test]
    fn test_plain_text_is_unrecognized() {
        assert_eq!(
            interpret("These are my notes about fiddling.\nNothing to see.\n"),
            Interpretation::Unrecognized
        );
    }

    #[test]
    fn test_header_without_key_fails() {
        let result = interpret("X:7\nT:Unfinished\nM:4/4\n");
        assert!(
            matches!(&result, Interpretation::ParseFailed { reason } if reason.contains("X:7")),
            "got {result:?}"
        );
    }

    #[test]
    fn test_empty_and_binary_fail() {
        assert!(matches!(
            interpret("  \n\n"),
            Interpretation::ParseFailed { .. }
        ));
        assert!(matches!(
            AbcInterpreter.interpret(b"PK\x03\x04\x00\x00zip"),
            Interpretation::ParseFailed { .. }
        ));
    }

    #[test]
    fn test_latin1_content_is_still_read() {
        let content = b"X:1\nT:Caf\xe9 Reel\nK:D\nd|\n";
        assert_eq!(AbcInterpreter.interpret(content), Interpretation::Tune);
    }
}
