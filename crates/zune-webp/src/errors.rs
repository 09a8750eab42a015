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

/// Possible errors that may occur while parsing WebP headers
pub enum WebpDecodeErrors {
    /// The image does not start with a RIFF header naming a `VP8 ` chunk
    NotAWebpFile,
    /// The VP8 frame does not carry the `9d 01 2a` start code
    UnsupportedFrameSignature([u8; 3]),
    /// The first frame is an inter frame or is not shown
    NotAVisibleFrame,
    /// Generic message
    Generic(String),
    IoErrors(ZByteIoError)
}

impl WebpDecodeErrors {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            WebpDecodeErrors::IoErrors(err) => err.kind(),
            _ => ErrorKind::Format
        }
    }
}

impl Debug for WebpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            WebpDecodeErrors::NotAWebpFile => {
                writeln!(f, "not a WebP file")
            }
            WebpDecodeErrors::UnsupportedFrameSignature(signature) => {
                writeln!(
                    f,
                    "unsupported WebP frame signature {signature:02x?}, expected [9d, 01, 2a]"
                )
            }
            WebpDecodeErrors::NotAVisibleFrame => {
                writeln!(f, "not a visible WebP frame")
            }
            WebpDecodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
            WebpDecodeErrors::IoErrors(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl Display for WebpDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for WebpDecodeErrors {}

impl From<ZByteIoError> for WebpDecodeErrors {
    fn from(value: ZByteIoError) -> Self {
        WebpDecodeErrors::IoErrors(value)
    }
}
