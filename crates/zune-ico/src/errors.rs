/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use zune_bmp::BmpDecoderErrors;
use zune_core::bytestream::ZByteIoError;
use zune_core::errors::ErrorKind;
use zune_png::PngDecodeErrors;

/// Errors that can occur while parsing an icon directory
#[non_exhaustive]
pub enum IcoDecodeErrors {
    /// The file does not start with the icon signature
    NotAnIcoFile,
    GenericStatic(&'static str),
    /// The selected image is a bitmap and the bitmap parser failed
    Bmp(BmpDecoderErrors),
    /// The selected image is a PNG and the PNG parser failed
    Png(PngDecodeErrors),
    IoErrors(ZByteIoError)
}

impl IcoDecodeErrors {
    /// Classify this error, errors of embedded images keep their own kind
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAnIcoFile | Self::GenericStatic(_) => ErrorKind::Format,
            Self::Bmp(err) => err.kind(),
            Self::Png(err) => err.kind(),
            Self::IoErrors(err) => err.kind()
        }
    }
}

impl Debug for IcoDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotAnIcoFile => writeln!(f, "not an ICO file"),
            Self::GenericStatic(err) => writeln!(f, "{err}"),
            Self::Bmp(err) => writeln!(f, "Embedded bitmap: {err:?}"),
            Self::Png(err) => writeln!(f, "Embedded png: {err:?}"),
            Self::IoErrors(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for IcoDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for IcoDecodeErrors {}

impl From<ZByteIoError> for IcoDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        IcoDecodeErrors::IoErrors(value)
    }
}

impl From<BmpDecoderErrors> for IcoDecodeErrors {
    fn from(value: BmpDecoderErrors) -> Self {
        IcoDecodeErrors::Bmp(value)
    }
}

impl From<PngDecodeErrors> for IcoDecodeErrors {
    fn from(value: PngDecodeErrors) -> Self {
        IcoDecodeErrors::Png(value)
    }
}
