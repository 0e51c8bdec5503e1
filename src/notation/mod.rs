//! ABC notation support: header metadata, document shape, collection splitting.
//!
//! Only flat `key:value` header lines and raw body text are handled here;
//! the music itself is never parsed.

mod interpret;
mod metadata;
mod split;

pub use interpret::{AbcInterpreter, Interpretation, Interpreter};
pub use metadata::{MetadataField, MetadataRecord, extract_metadata};
pub use split::{TUNE_HEADER_MARKER, TuneSection, split_collection};
