/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_core::bytestream::ZByteIoError;
use zune_core::errors::ErrorKind;

/// Errors that can occur while parsing an OpenEXR header
#[non_exhaustive]
pub enum ExrDecodeErrors {
    /// The file does not start with the OpenEXR magic number
    NotAnExrFile,
    /// A required attribute is absent or not of the expected type
    MissingAttribute(&'static str),
    /// The channel names do not map to an image mode
    UnsupportedChannels(Vec<String>),
    /// More attributes than the configured limit
    TooManyAttributes(usize),
    GenericStatic(&'static str),
    /// Dimension name, configured limit, found value
    TooLargeDimensions(&'static str, usize, usize),
    IoErrors(ZByteIoError)
}

impl ExrDecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IoErrors(err) => err.kind(),
            _ => ErrorKind::Format
        }
    }
}

impl Debug for ExrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotAnExrFile => writeln!(f, "Not an OpenEXR file"),
            Self::MissingAttribute(name) => {
                writeln!(f, "Missing or malformed required attribute {name}")
            }
            Self::UnsupportedChannels(channels) => {
                writeln!(f, "No image mode for channels {channels:?}")
            }
            Self::TooManyAttributes(limit) => {
                writeln!(f, "Header has more than {limit} attributes")
            }
            Self::GenericStatic(err) => writeln!(f, "{err}"),
            Self::TooLargeDimensions(dimension, expected, found) => writeln!(
                f,
                "Too large dimensions for {dimension}, {found} exceeds {expected}"
            ),
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for ExrDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ExrDecodeErrors {}

impl From<ZByteIoError> for ExrDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        ExrDecodeErrors::IoErrors(value)
    }
}
