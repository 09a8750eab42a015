/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Error classification shared by all parsers
//!
//! Every error type in the zune header crates can report an [`ErrorKind`],
//! which lets callers tell a truncated file apart from a malformed one
//! without matching on each crate's error enum.

/// Broad classification of a parsing failure
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Signature mismatch, malformed or missing required field, or a value
    /// the parser does not understand
    Format,
    /// An out of range byte or integer access into a buffer
    Index,
    /// The source ran out before the bytes a parser required were available
    UnexpectedEnd,
    /// The underlying source failed, or lacks a capability the parser needed
    Io
}

impl ErrorKind {
    /// A short lowercase name for this kind
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Format => "format",
            ErrorKind::Index => "index",
            ErrorKind::UnexpectedEnd => "unexpected end",
            ErrorKind::Io => "io"
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
