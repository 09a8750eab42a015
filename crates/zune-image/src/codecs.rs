/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported header parsers
//!
//! A parser is picked by looking at the first [`PREFIX_SIZE`] bytes of the
//! source, each parser's probe function decides whether it understands them.
use zune_bmp::{probe_bmp, BmpDecoder};
use zune_core::bytestream::{ZByteReaderTrait, ZReader};
use zune_core::header::ImageHeader;
use zune_core::log::trace;
use zune_core::options::DecoderOptions;
use zune_exr::{probe_exr, ExrDecoder};
use zune_ico::{probe_ico, IcoDecoder};
use zune_png::{probe_png, PngDecoder};
use zune_webp::{probe_webp, WebpDecoder};

use crate::errors::ImageErrors;

/// Number of bytes looked at when guessing a format
pub const PREFIX_SIZE: usize = 16;

/// All image formats whose headers can be read
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Windows icon directory
    Ico,
    /// OpenEXR
    OpenExr,
    /// Lossy WebP
    WebP,
    /// Portable Network Graphics
    Png,
    /// Windows bitmap
    Bmp,
    /// Any other format
    Unknown
}

impl ImageFormat {
    /// Short name of the format, matches the format tag of headers it produces
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ico => "ICO",
            Self::OpenExr => "EXR",
            Self::WebP => "WEBP",
            Self::Png => "PNG",
            Self::Bmp => "BMP",
            Self::Unknown => "UNKNOWN"
        }
    }

    /// Return true if a header parser exists for this format
    pub const fn has_decoder(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Guess a format from the first bytes of a file
    ///
    /// See [`guess_format`]
    pub fn guess_format(prefix: &[u8]) -> ImageFormat {
        guess_format(prefix)
    }

    /// Parse the header of an image already known to be in this format
    pub fn read_header<T>(
        self, source: T, options: DecoderOptions
    ) -> Result<ImageHeader, ImageErrors>
    where
        T: ZByteReaderTrait
    {
        let header = match self {
            Self::Ico => IcoDecoder::new_with_options(source, options).decode_headers()?,
            Self::OpenExr => ExrDecoder::new_with_options(source, options).decode_headers()?,
            Self::WebP => WebpDecoder::new_with_options(source, options).decode_headers()?,
            Self::Png => PngDecoder::new_with_options(source, options).decode_headers()?,
            Self::Bmp => BmpDecoder::new_with_options(source, options).decode_headers()?,
            Self::Unknown => {
                return Err(ImageErrors::UnknownFormat([0; PREFIX_SIZE], 0));
            }
        };
        Ok(header)
    }
}

/// Guess the format of an image from its first bytes
///
/// Probes run in a fixed order and the first parser that accepts the
/// prefix wins. Returns [`ImageFormat::Unknown`] when none does.
pub fn guess_format(prefix: &[u8]) -> ImageFormat {
    let probes: [(fn(&[u8]) -> bool, ImageFormat); 5] = [
        (probe_ico, ImageFormat::Ico),
        (probe_exr, ImageFormat::OpenExr),
        (probe_webp, ImageFormat::WebP),
        (probe_png, ImageFormat::Png),
        (probe_bmp, ImageFormat::Bmp)
    ];

    for (probe, format) in probes {
        if probe(prefix) {
            return format;
        }
    }
    ImageFormat::Unknown
}

/// Sniff the format of `source` and parse its header
///
/// The first [`PREFIX_SIZE`] bytes are peeked, so the source must be
/// seekable. Parsing starts from the position the source was at when
/// passed in.
pub fn read_header<T>(source: T, options: DecoderOptions) -> Result<ImageHeader, ImageErrors>
where
    T: ZByteReaderTrait
{
    let mut reader = ZReader::new_with_options(source, &options);
    let prefix = reader.peek(PREFIX_SIZE)?;

    let format = guess_format(prefix.as_bytes());

    trace!("Guessed image format: {:?}", format);

    if format == ImageFormat::Unknown {
        let mut bytes = [0; PREFIX_SIZE];
        bytes[..prefix.len()].copy_from_slice(prefix.as_bytes());
        return Err(ImageErrors::UnknownFormat(bytes, prefix.len()));
    }
    format.read_header(reader.get_mut(), options)
}
