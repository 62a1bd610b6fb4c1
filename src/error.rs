use std::fmt;

/// Taxonomy shared by every error type in the crate.
///
/// Each module keeps its own error enum; `class()` on any of them says which
/// bucket a failure belongs to without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed bencode grammar.
    Format,
    /// Duplicate or non-string keys, unsupported kinds, missing or mistyped fields.
    Schema,
    /// An accessor used on a node of the wrong kind.
    Access,
    /// Piece metadata or an offset that does not fit the declared file.
    Range,
    /// The resolver failed or returned something that is not a byte stream.
    Resolution,
    /// The context was cancelled.
    Cancellation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::Format => "format",
            ErrorClass::Schema => "schema",
            ErrorClass::Access => "access",
            ErrorClass::Range => "range",
            ErrorClass::Resolution => "resolution",
            ErrorClass::Cancellation => "cancellation",
        };
        f.write_str(name)
    }
}
