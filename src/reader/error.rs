use super::Reader;
use crate::ParseError;
use thiserror::Error;

#[doc = r#"
Why decoding stopped, and the byte offset it stopped at.

The offset points at the first byte of the offending field: the signature of
a bad chunk, the status byte of an unknown event, the payload of a short meta
event. For truncated input it is where the missing bytes should have begun.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("At byte {position}: {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// Malformed content, or simply not enough bytes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The bytes are there but do not form a valid file
    #[error("{0}")]
    ParseError(#[from] ParseError),
    /// The input ended in the middle of a chunk or event
    #[error("unexpected end of input")]
    OutOfBounds,
}

impl ReaderError {
    /// True when the input was cut short rather than malformed
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// Malformed or truncated
    pub const fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// The content error, `None` for truncated input
    pub const fn parse_error_kind(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => Some(e),
            ReaderErrorKind::OutOfBounds => None,
        }
    }

    /// Byte offset into the decoded buffer
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Malformed content at `position`
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Input exhausted at `position`
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }
}

/// Result of every decoding step
pub type ReadResult<T> = Result<T, ReaderError>;

/// Malformed content at the reader's cursor.
pub(crate) fn inv_data(reader: &Reader<'_>, v: impl Into<ParseError>) -> ReaderError {
    ReaderError::parse_error(reader.buffer_position(), v.into())
}

#[test]
fn error_reports_kind_and_position() {
    use crate::TrackError;
    let truncated = ReaderError::oob(12);
    assert!(truncated.is_out_of_bounds());
    assert_eq!(truncated.parse_error_kind(), None);
    assert_eq!(truncated.kind(), &ReaderErrorKind::OutOfBounds);

    let malformed = ReaderError::parse_error(9, TrackError::Empty.into());
    assert!(!malformed.is_out_of_bounds());
    assert_eq!(malformed.position(), 9);
    assert_eq!(
        malformed.parse_error_kind(),
        Some(&ParseError::Track(TrackError::Empty))
    );
}
