//! Error types shared by every stage of the coder.

use thiserror::Error;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied something the coder cannot work with (empty input, no table).
    Precondition,
    /// A serialized stream is malformed or corrupt.
    Format,
    /// The coder broke one of its own invariants.
    InternalInvariant,
    /// Reading or writing the underlying stream failed.
    Io,
}

/// Stage of the pipeline in which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Counting,
    TreeBuild,
    TableParse,
    Encode,
    BitMatch,
    Io,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Counting => "counting",
            Phase::TreeBuild => "tree build",
            Phase::TableParse => "table parse",
            Phase::Encode => "encode",
            Phase::BitMatch => "bit match",
            Phase::Io => "io",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("input is empty, there are no symbols to count")]
    EmptyInput,

    #[error("frequency table has no entries")]
    EmptyFrequencyTable,

    #[error("code table is empty")]
    EmptyTable,

    #[error("malformed table header: {0}")]
    MalformedHeader(String),

    #[error("malformed table row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("symbol {symbol:#04x} appears more than once in the table")]
    DuplicateSymbol { symbol: u8 },

    #[error("codeword {first:?} collides with codeword {second:?}")]
    CodewordCollision { first: String, second: String },

    #[error("invalid byte {byte:#04x} at payload offset {offset}")]
    InvalidBit { byte: u8, offset: usize },

    #[error("bits {pending:?} ending at payload offset {offset} match no codeword")]
    UnmatchedBits { pending: String, offset: usize },

    #[error("payload ends inside a codeword, {pending:?} left unmatched")]
    TruncatedPayload { pending: String },

    #[error("symbol {symbol:#04x} has no codeword")]
    MissingCodeword { symbol: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput | Error::EmptyTable => ErrorKind::Precondition,
            Error::MalformedHeader(_)
            | Error::MalformedRow { .. }
            | Error::DuplicateSymbol { .. }
            | Error::CodewordCollision { .. }
            | Error::InvalidBit { .. }
            | Error::UnmatchedBits { .. }
            | Error::TruncatedPayload { .. } => ErrorKind::Format,
            Error::EmptyFrequencyTable | Error::MissingCodeword { .. } => {
                ErrorKind::InternalInvariant
            }
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Error::EmptyInput => Phase::Counting,
            Error::EmptyFrequencyTable => Phase::TreeBuild,
            Error::EmptyTable
            | Error::MalformedHeader(_)
            | Error::MalformedRow { .. }
            | Error::DuplicateSymbol { .. }
            | Error::CodewordCollision { .. } => Phase::TableParse,
            Error::InvalidBit { .. }
            | Error::UnmatchedBits { .. }
            | Error::TruncatedPayload { .. } => Phase::BitMatch,
            Error::MissingCodeword { .. } => Phase::Encode,
            Error::Io(_) => Phase::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_phase() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::Precondition);
        assert_eq!(Error::EmptyInput.phase(), Phase::Counting);

        let truncated = Error::TruncatedPayload {
            pending: "01".to_string(),
        };
        assert_eq!(truncated.kind(), ErrorKind::Format);
        assert_eq!(truncated.phase(), Phase::BitMatch);

        let missing = Error::MissingCodeword { symbol: b'x' };
        assert_eq!(missing.kind(), ErrorKind::InternalInvariant);
        assert_eq!(missing.phase(), Phase::Encode);
    }

    #[test]
    fn test_display_mentions_context() {
        let err = Error::MalformedRow {
            row: 3,
            reason: "missing tab".to_string(),
        };
        assert_eq!(err.to_string(), "malformed table row 3: missing tab");
        assert_eq!(Phase::TableParse.to_string(), "table parse");
    }
}
