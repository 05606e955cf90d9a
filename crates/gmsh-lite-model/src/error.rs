// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for MSH parsing operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Broad classification of a [`ParseError`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    /// The input file could not be opened
    Open,
    /// Missing or mismatched section markers, premature end of input
    Structural,
    /// A token was coerced to the wrong kind
    TypeMismatch,
    /// Unsupported version, data size, file type or byte order
    UnsupportedFormat,
    /// Element type code absent from the arity table
    UnknownElementType,
    /// Underlying I/O failure after the file was opened
    Io,
}

/// Errors that can occur during MSH parsing
#[derive(Error, Debug)]
pub enum ParseError {
    /// The file could not be opened
    #[error("Unable to open file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token other than a section marker was found between sections
    #[error("Expected start of section marker not found (line {line}).")]
    MissingSectionStart { line: usize },

    /// A modeled section (or end of input) was reached before `$MeshFormat`
    #[error("Expected $MeshFormat section marker not found, got {found}.")]
    MissingMeshFormat { found: String },

    /// A section did not close with its own end marker
    #[error("{expected} tag not found (line {line}).")]
    MissingEndMarker { expected: String, line: usize },

    /// Input ended in the middle of a section
    #[error("Unexpected end of file while reading {context}")]
    UnexpectedEndOfStream { context: String },

    /// A quoted string was never closed
    #[error("Unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    /// Header totals disagree with per-block counts (strict mode only)
    #[error("{section}: header declares {declared} entries, blocks contain {actual}")]
    CountMismatch {
        section: String,
        declared: u64,
        actual: u64,
    },

    /// Token kind does not match what the grammar expects
    #[error("Type mismatch at line {line}: expected {expected}, got {found} '{text}'")]
    TypeMismatch {
        line: usize,
        expected: &'static str,
        found: &'static str,
        text: String,
    },

    /// Unsupported MSH format version
    #[error("Unsupported MSH version '{0}'")]
    UnsupportedVersion(String),

    /// Floating point width other than the host's `f64`
    #[error("Unsupported data size {found}, expected {expected}")]
    UnsupportedDataSize { found: i64, expected: usize },

    /// File type flag other than 0 (ASCII) or 1 (binary)
    #[error("Invalid file type {0}, expected 0 (ASCII) or 1 (binary)")]
    InvalidFileType(i64),

    /// Binary endianness marker decodes to 1 in neither byte order
    #[error("Unable to detect byte order from marker {0:#010x}")]
    UnknownByteOrder(u32),

    /// Element type code outside the arity table
    #[error("Unknown element type '{0}'")]
    UnknownElementType(i32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while parsing a file opened by path
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Open { .. } => ErrorKind::Open,
            ParseError::MissingSectionStart { .. }
            | ParseError::MissingMeshFormat { .. }
            | ParseError::MissingEndMarker { .. }
            | ParseError::UnexpectedEndOfStream { .. }
            | ParseError::UnterminatedString { .. }
            | ParseError::CountMismatch { .. } => ErrorKind::Structural,
            ParseError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ParseError::UnsupportedVersion(_)
            | ParseError::UnsupportedDataSize { .. }
            | ParseError::InvalidFileType(_)
            | ParseError::UnknownByteOrder(_) => ErrorKind::UnsupportedFormat,
            ParseError::UnknownElementType(_) => ErrorKind::UnknownElementType,
            ParseError::Io(_) => ErrorKind::Io,
            ParseError::File { source, .. } => source.kind(),
        }
    }

    /// Create an end-of-stream error
    pub fn eof(context: impl Into<String>) -> Self {
        ParseError::UnexpectedEndOfStream {
            context: context.into(),
        }
    }

    /// Attach the path of the file being parsed
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ParseError::Open { .. } | ParseError::File { .. } => self,
            other => ParseError::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_end_marker_message() {
        let err = ParseError::MissingEndMarker {
            expected: "$EndMeshFormat".to_string(),
            line: 3,
        };
        assert!(err.to_string().starts_with("$EndMeshFormat tag not found"));
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_file_wrapper_keeps_kind() {
        let err = ParseError::UnknownElementType(42).in_file("mesh.msh");
        assert_eq!(err.kind(), ErrorKind::UnknownElementType);
        assert_eq!(err.to_string(), "mesh.msh: Unknown element type '42'");
    }

    #[test]
    fn test_open_error_is_not_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ParseError::Open {
            path: PathBuf::from("a.msh"),
            source: io,
        }
        .in_file("a.msh");
        assert_eq!(err.kind(), ErrorKind::Open);
        assert!(err.to_string().contains("'a.msh'"));
    }
}
