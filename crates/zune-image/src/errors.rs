/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when sniffing and parsing an image header
use std::fmt::{Debug, Display, Formatter};

use zune_bmp::BmpDecoderErrors;
use zune_core::bytestream::ZByteIoError;
use zune_core::errors::ErrorKind;
use zune_exr::ExrDecodeErrors;
use zune_ico::IcoDecodeErrors;
use zune_png::PngDecodeErrors;
use zune_webp::WebpDecodeErrors;

/// All errors possible when reading an image header
///
/// Errors raised by a format parser are carried unchanged
pub enum ImageErrors {
    /// No parser recognised the first bytes of the file
    UnknownFormat([u8; 16], usize),
    IcoDecodeErrors(IcoDecodeErrors),
    ExrDecodeErrors(ExrDecodeErrors),
    WebpDecodeErrors(WebpDecodeErrors),
    PngDecodeErrors(PngDecodeErrors),
    BmpDecodeErrors(BmpDecoderErrors),
    IoErrors(ZByteIoError)
}

impl ImageErrors {
    /// Classify this error, delegating to the wrapped parser error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownFormat(..) => ErrorKind::Format,
            Self::IcoDecodeErrors(err) => err.kind(),
            Self::ExrDecodeErrors(err) => err.kind(),
            Self::WebpDecodeErrors(err) => err.kind(),
            Self::PngDecodeErrors(err) => err.kind(),
            Self::BmpDecodeErrors(err) => err.kind(),
            Self::IoErrors(err) => err.kind()
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFormat(prefix, len) => {
                writeln!(
                    f,
                    "Unknown image format, first bytes are {:02x?}",
                    &prefix[..*len]
                )
            }
            Self::IcoDecodeErrors(err) => {
                writeln!(f, "ico: {err:?}")
            }
            Self::ExrDecodeErrors(err) => {
                writeln!(f, "exr: {err:?}")
            }
            Self::WebpDecodeErrors(err) => {
                writeln!(f, "webp: {err:?}")
            }
            Self::PngDecodeErrors(err) => {
                writeln!(f, "png: {err:?}")
            }
            Self::BmpDecodeErrors(err) => {
                writeln!(f, "bmp: {err:?}")
            }
            Self::IoErrors(err) => {
                writeln!(f, "I/O error: {err:?}")
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

macro_rules! impl_from_errors {
    ($($error:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$error> for ImageErrors {
                fn from(from: $error) -> Self {
                    ImageErrors::$variant(from)
                }
            }
        )*
    };
}

impl_from_errors!(
    IcoDecodeErrors => IcoDecodeErrors,
    ExrDecodeErrors => ExrDecodeErrors,
    WebpDecodeErrors => WebpDecodeErrors,
    PngDecodeErrors => PngDecodeErrors,
    BmpDecoderErrors => BmpDecodeErrors,
    ZByteIoError => IoErrors,
);
